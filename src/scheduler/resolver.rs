//! Post-greedy conflict resolution by backtracking.
//!
//! # Algorithm
//!
//! Each sweep walks every employee's tentative assignments from highest
//! priority to lowest (placement order breaks ties) and keeps one only if
//!
//! - fewer than `max_shifts_per_batch` were already kept, and
//! - the conflict detector accepts it against history plus the kept set.
//!
//! Everything else is released. Each released slot is offered to the
//! best remaining candidate: same ranking as the greedy pass, excluding
//! the released employee, anyone already on the request and anyone at
//! the batch cap. A slot with no taker becomes a shortfall.
//!
//! Refills are scored against history plus the ledger and respect the
//! batch cap, so a ledger built by the greedy pass is clean after one
//! sweep and bounded mode gives the same result. Extra sweeps and the
//! final check only matter for ledgers assembled by hand: bounded mode
//! repeats sweeps until the ledger is clean or the pass limit is reached,
//! and conflicts still present after the last sweep are stripped and
//! counted as unresolved.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{LimitsConfig, ResolutionMode};
use crate::conflict::ConflictKind;
use crate::models::{Assignment, BookingRef, Employee, ShiftRecord, ShiftRequest};
use crate::scoring::{AssignmentLedger, FitnessScorer};

use super::greedy::rank_candidates;

/// Why a tentative assignment was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseReason {
    /// The employee already kept `max_shifts_per_batch` assignments.
    BatchLimit,
    /// A hard rule against history or higher-priority assignments.
    Conflict(ConflictKind),
}

/// A released tentative assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Released {
    pub assignment: Assignment,
    pub reason: ReleaseReason,
}

/// Outcome of conflict resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Tentative assignments released across all sweeps.
    pub conflicts_found: usize,
    /// Released slots that were refilled.
    pub conflicts_resolved: usize,
    /// Conflicts still present after the last sweep.
    pub unresolved: usize,
    /// Sweeps that released something.
    pub passes: usize,
    pub released: Vec<Released>,
}

/// Backtracking conflict resolver.
#[derive(Debug, Clone, Copy)]
pub struct ConflictResolver<'s, 'a> {
    scorer: &'s FitnessScorer<'a>,
    max_shifts_per_batch: usize,
    mode: ResolutionMode,
}

impl<'s, 'a> ConflictResolver<'s, 'a> {
    /// Creates a resolver.
    pub fn new(scorer: &'s FitnessScorer<'a>, limits: &LimitsConfig, mode: ResolutionMode) -> Self {
        Self {
            scorer,
            max_shifts_per_batch: limits.max_shifts_per_batch,
            mode,
        }
    }

    /// Resolves conflicts in `ledger` in place.
    pub fn resolve(
        &self,
        requests: &[ShiftRequest],
        employees: &[Employee],
        ledger: &mut AssignmentLedger,
    ) -> Resolution {
        let by_id: HashMap<u64, &Employee> = employees.iter().map(|e| (e.id, e)).collect();
        let mut excluded: HashSet<(u64, usize)> = HashSet::new();
        let mut resolution = Resolution::default();

        for pass in 1..=self.mode.max_passes().max(1) {
            let releases = self.find_releases(&by_id, ledger);
            if releases.is_empty() {
                break;
            }
            resolution.passes = pass;
            resolution.conflicts_found += releases.len();

            let mut released = Self::take(ledger, releases);
            // Refill urgent slots first; placement order breaks ties.
            released.sort_by(|a, b| b.assignment.priority.cmp(&a.assignment.priority));

            for r in &released {
                let a = &r.assignment;
                excluded.insert((a.employee_id, a.request_index));
                let refilled = self.refill(requests, employees, ledger, a, &excluded);
                debug!(
                    pass,
                    employee = a.employee_id,
                    request_index = a.request_index,
                    reason = ?r.reason,
                    refilled,
                    "assignment released"
                );
                if refilled {
                    resolution.conflicts_resolved += 1;
                }
            }
            resolution.released.extend(released);
        }

        let residual = self.find_releases(&by_id, ledger);
        if !residual.is_empty() {
            warn!(count = residual.len(), "conflicts left after final pass");
            resolution.unresolved = residual.len();
            resolution.conflicts_found += residual.len();
            let stripped = Self::take(ledger, residual);
            resolution.released.extend(stripped);
        }

        resolution
    }

    /// Ledger positions to release, in ascending position order.
    fn find_releases(
        &self,
        by_id: &HashMap<u64, &Employee>,
        ledger: &AssignmentLedger,
    ) -> Vec<(usize, ReleaseReason)> {
        let detector = self.scorer.detector();
        let assignments = ledger.assignments();
        let employee_ids: BTreeSet<u64> = assignments.iter().map(|a| a.employee_id).collect();
        let mut releases = Vec::new();

        for id in employee_ids {
            let mut positions = ledger.positions_for(id).to_vec();
            positions.sort_by(|&a, &b| assignments[b].priority.cmp(&assignments[a].priority));

            let mut booked: Vec<BookingRef<'_>> = by_id
                .get(&id)
                .map(|e| e.history.iter().map(ShiftRecord::as_booking).collect())
                .unwrap_or_default();
            let mut kept = 0usize;

            for p in positions {
                let a = &assignments[p];
                let reason = if kept >= self.max_shifts_per_batch {
                    Some(ReleaseReason::BatchLimit)
                } else {
                    detector
                        .check(&booked, a.date, Some(a.as_booking()))
                        .map(ReleaseReason::Conflict)
                };
                match reason {
                    Some(reason) => releases.push((p, reason)),
                    None => {
                        booked.push(a.as_booking());
                        kept += 1;
                    }
                }
            }
        }

        releases.sort_by_key(|(p, _)| *p);
        releases
    }

    /// Removes released positions from the ledger.
    fn take(ledger: &mut AssignmentLedger, releases: Vec<(usize, ReleaseReason)>) -> Vec<Released> {
        let positions: BTreeSet<usize> = releases.iter().map(|(p, _)| *p).collect();
        let removed = ledger.remove_positions(&positions);
        releases
            .into_iter()
            .zip(removed)
            .map(|((_, reason), assignment)| Released { assignment, reason })
            .collect()
    }

    /// Offers a released slot to the best remaining candidate.
    fn refill(
        &self,
        requests: &[ShiftRequest],
        employees: &[Employee],
        ledger: &mut AssignmentLedger,
        released: &Assignment,
        excluded: &HashSet<(u64, usize)>,
    ) -> bool {
        let Some(request) = requests.get(released.request_index) else {
            return false;
        };
        let request_index = released.request_index;

        let ranked = rank_candidates(self.scorer, employees, request, ledger, |e| {
            !excluded.contains(&(e.id, request_index))
                && ledger.count_for(e.id) < self.max_shifts_per_batch
                && !ledger.holds(e.id, request_index)
        });

        match ranked.first() {
            Some(best) => {
                ledger.push(Assignment::new(best.employee_id, request_index, request, best.score));
                true
            }
            None => false,
        }
    }
}
