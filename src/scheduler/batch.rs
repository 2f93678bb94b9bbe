//! Batch orchestration.
//!
//! Drives one batch through `Pending → Assigning → Resolved`:
//!
//! 1. **Pending**: validate the input; any problem aborts the batch.
//! 2. **Assigning**: greedy placement in priority order.
//! 3. **Resolved**: backtracking repair, then statistics.
//!
//! The orchestrator is consumed by [`BatchOrchestrator::run`]; each batch
//! owns its ledger, so independent batches can run on separate threads.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::conflict::ConflictDetector;
use crate::error::RosterResult;
use crate::models::{Assignment, Employee, PlanningHorizon, RoleLocationMatrix, ShiftRequest};
use crate::scoring::FitnessScorer;
use crate::validation::validate_batch;

use super::{BatchStats, ConflictResolver, GreedyAssigner, Unfulfilled};

/// Lifecycle of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchState {
    Pending,
    Assigning,
    Resolved,
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BatchState::Pending => "pending",
            BatchState::Assigning => "assigning",
            BatchState::Resolved => "resolved",
        })
    }
}

/// Final output of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Final assignments, in placement order.
    pub assignments: Vec<Assignment>,
    /// Requests left short, in request order.
    pub unfulfilled: Vec<Unfulfilled>,
    pub stats: BatchStats,
    /// Lifecycle state the batch ended in.
    pub state: BatchState,
}

impl BatchResult {
    /// Assignments of one employee.
    pub fn assignments_for(&self, employee_id: u64) -> impl Iterator<Item = &Assignment> {
        self.assignments
            .iter()
            .filter(move |a| a.employee_id == employee_id)
    }

    /// Assignments filling one request.
    pub fn assignments_of_request(
        &self,
        request_index: usize,
    ) -> impl Iterator<Item = &Assignment> {
        self.assignments
            .iter()
            .filter(move |a| a.request_index == request_index)
    }

    /// Whether every request was fully staffed.
    pub fn is_fully_staffed(&self) -> bool {
        self.unfulfilled.is_empty()
    }
}

/// Runs one batch over borrowed input.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_roster::config::EngineConfig;
/// use u_roster::models::*;
/// use u_roster::scheduler::BatchOrchestrator;
///
/// let date = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();
/// let requests = vec![
///     ShiftRequest::new(date, Location::Icu, ShiftType::Pagi).with_priority(Priority::Urgent),
///     ShiftRequest::new(date, Location::GawatDarurat, ShiftType::Malam),
/// ];
/// let employees = vec![
///     Employee::new(1, "Siti", Role::Nurse),
///     Employee::new(2, "Budi", Role::Physician),
/// ];
/// let matrix = RoleLocationMatrix::hospital_default();
///
/// let result = BatchOrchestrator::new(&requests, &employees, &matrix)
///     .with_config(EngineConfig::default())
///     .with_horizon(PlanningHorizon::day(date))
///     .run()
///     .unwrap();
///
/// assert_eq!(result.assignments.len(), 2);
/// assert!(result.unfulfilled.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BatchOrchestrator<'a> {
    requests: &'a [ShiftRequest],
    employees: &'a [Employee],
    matrix: &'a RoleLocationMatrix,
    config: EngineConfig,
    horizon: Option<PlanningHorizon>,
    state: BatchState,
}

impl<'a> BatchOrchestrator<'a> {
    /// Creates a pending batch with the default configuration.
    pub fn new(
        requests: &'a [ShiftRequest],
        employees: &'a [Employee],
        matrix: &'a RoleLocationMatrix,
    ) -> Self {
        Self {
            requests,
            employees,
            matrix,
            config: EngineConfig::default(),
            horizon: None,
            state: BatchState::Pending,
        }
    }

    /// Sets the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Restricts requests to a planning horizon.
    pub fn with_horizon(mut self, horizon: PlanningHorizon) -> Self {
        self.horizon = Some(horizon);
        self
    }

    /// Current state. Always `Pending` before [`run`](Self::run); the
    /// final state is reported on [`BatchResult::state`].
    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Runs the batch to completion.
    ///
    /// # Errors
    ///
    /// - [`RosterError::Config`](crate::error::RosterError::Config) if the
    ///   configuration is inconsistent.
    /// - [`RosterError::InvalidInput`](crate::error::RosterError::InvalidInput)
    ///   with every validation problem found. No partial result is produced.
    pub fn run(mut self) -> RosterResult<BatchResult> {
        info!(
            requests = self.requests.len(),
            employees = self.employees.len(),
            "batch started"
        );

        self.config.validate()?;
        let catalog = self.config.shift_catalog()?;
        validate_batch(
            self.requests,
            self.employees,
            self.matrix,
            &catalog,
            self.horizon.as_ref(),
        )?;

        self.advance(BatchState::Assigning);
        let detector = ConflictDetector::with_limits(&catalog, &self.config.limits);
        let scorer = FitnessScorer::from_config(detector, self.matrix, &self.config.scoring);
        let greedy = GreedyAssigner::new(&scorer).assign(self.requests, self.employees);
        debug!(
            tentative = greedy.ledger.len(),
            short_requests = greedy.shortfalls.len(),
            "greedy pass finished"
        );

        self.advance(BatchState::Resolved);
        let mut ledger = greedy.ledger;
        let resolution = ConflictResolver::new(&scorer, &self.config.limits, self.config.resolution)
            .resolve(self.requests, self.employees, &mut ledger);

        let assignments = ledger.into_assignments();
        let unfulfilled = Unfulfilled::collect(self.requests, &assignments);
        let stats = BatchStats::calculate(self.requests, &assignments, &resolution);

        info!(
            requested = stats.total_requested,
            assigned = stats.total_assigned,
            fulfillment_rate = stats.fulfillment_rate,
            conflicts_found = stats.conflicts_found,
            conflicts_resolved = stats.conflicts_resolved,
            unresolved = stats.unresolved_conflicts,
            "batch finished"
        );

        Ok(BatchResult {
            assignments,
            unfulfilled,
            stats,
            state: self.state,
        })
    }

    fn advance(&mut self, next: BatchState) {
        debug!(from = %self.state, to = %next, "batch state");
        self.state = next;
    }
}

/// Runs a batch with the default configuration and no horizon.
pub fn run_batch(
    requests: &[ShiftRequest],
    employees: &[Employee],
    matrix: &RoleLocationMatrix,
) -> RosterResult<BatchResult> {
    BatchOrchestrator::new(requests, employees, matrix).run()
}
