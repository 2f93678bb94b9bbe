//! Priority-driven greedy assignment.
//!
//! # Algorithm
//!
//! 1. Stable-sort requests by priority (urgent, high, normal, low).
//! 2. For each request, score every employee against the current ledger.
//! 3. Drop zero scores, rank by score desc, then fewer period shifts,
//!    then employee ID.
//! 4. Place the top `headcount` employees and push them into the ledger
//!    at once, so later requests see them.
//!
//! Requests that cannot be fully staffed keep what qualifies; the gap is
//! recorded as a shortfall and the batch carries on.
//!
//! # Complexity
//! O(r * e * h) where r=requests, e=employees, h=bookings per employee.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::models::{Assignment, Employee, ShiftRequest};
use crate::scoring::{period_shifts, AssignmentLedger, FitnessScorer};

/// A request that could not be fully staffed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unfulfilled {
    /// Index of the request in the caller's list.
    pub request_index: usize,
    pub request: ShiftRequest,
    /// Slots left empty.
    pub shortfall: u32,
}

impl Unfulfilled {
    /// Shortfalls of `requests` given a final assignment set, in request order.
    pub fn collect(requests: &[ShiftRequest], assignments: &[Assignment]) -> Vec<Unfulfilled> {
        let mut filled = vec![0u32; requests.len()];
        for a in assignments {
            if let Some(n) = filled.get_mut(a.request_index) {
                *n += 1;
            }
        }
        requests
            .iter()
            .zip(filled)
            .enumerate()
            .filter(|(_, (req, n))| *n < req.headcount)
            .map(|(request_index, (req, n))| Unfulfilled {
                request_index,
                request: req.clone(),
                shortfall: req.headcount - n,
            })
            .collect()
    }
}

/// A ranked candidate for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedCandidate {
    pub employee_id: u64,
    pub score: u8,
    pub period_shifts: u32,
}

/// Scores and ranks eligible employees for a request.
///
/// Zero scores are dropped. Order: score desc, period shifts asc,
/// employee ID asc.
pub(crate) fn rank_candidates(
    scorer: &FitnessScorer<'_>,
    employees: &[Employee],
    request: &ShiftRequest,
    ledger: &AssignmentLedger,
    mut eligible: impl FnMut(&Employee) -> bool,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = employees
        .iter()
        .filter(|e| eligible(e))
        .filter_map(|e| {
            let score = scorer.score(e, request, ledger);
            trace!(employee = e.id, score, "candidate scored");
            (score > 0).then(|| RankedCandidate {
                employee_id: e.id,
                score,
                period_shifts: period_shifts(e, ledger),
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.period_shifts.cmp(&b.period_shifts))
            .then(a.employee_id.cmp(&b.employee_id))
    });
    ranked
}

/// Result of the greedy pass.
#[derive(Debug, Clone, Default)]
pub struct GreedyOutcome {
    /// Tentative assignments in placement order.
    pub ledger: AssignmentLedger,
    /// Requests left short, in processing order.
    pub shortfalls: Vec<Unfulfilled>,
}

/// Greedy assigner.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_roster::conflict::ConflictDetector;
/// use u_roster::models::*;
/// use u_roster::scheduler::GreedyAssigner;
/// use u_roster::scoring::FitnessScorer;
///
/// let catalog = ShiftCatalog::hospital_default();
/// let matrix = RoleLocationMatrix::hospital_default();
/// let scorer = FitnessScorer::new(ConflictDetector::new(&catalog), &matrix);
///
/// let date = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();
/// let requests = vec![ShiftRequest::new(date, Location::Icu, ShiftType::Pagi).with_headcount(2)];
/// let employees = vec![Employee::new(1, "Siti", Role::Nurse)];
///
/// let outcome = GreedyAssigner::new(&scorer).assign(&requests, &employees);
/// assert_eq!(outcome.ledger.len(), 1);
/// assert_eq!(outcome.shortfalls[0].shortfall, 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GreedyAssigner<'s, 'a> {
    scorer: &'s FitnessScorer<'a>,
}

impl<'s, 'a> GreedyAssigner<'s, 'a> {
    /// Creates an assigner using the given scorer.
    pub fn new(scorer: &'s FitnessScorer<'a>) -> Self {
        Self { scorer }
    }

    /// Request indices by priority descending; ties keep input order.
    pub fn priority_order(requests: &[ShiftRequest]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..requests.len()).collect();
        indices.sort_by(|&a, &b| requests[b].priority.cmp(&requests[a].priority));
        indices
    }

    /// Runs the greedy pass on an empty ledger.
    pub fn assign(&self, requests: &[ShiftRequest], employees: &[Employee]) -> GreedyOutcome {
        let mut ledger = AssignmentLedger::new();
        let shortfalls = self.assign_into(requests, employees, &mut ledger);
        GreedyOutcome { ledger, shortfalls }
    }

    /// Runs the greedy pass on top of an existing ledger.
    ///
    /// Slots already filled in the ledger count towards each request's
    /// headcount.
    pub fn assign_into(
        &self,
        requests: &[ShiftRequest],
        employees: &[Employee],
        ledger: &mut AssignmentLedger,
    ) -> Vec<Unfulfilled> {
        let mut shortfalls = Vec::new();

        for request_index in Self::priority_order(requests) {
            let request = &requests[request_index];
            let already = u32::try_from(ledger.filled(request_index)).unwrap_or(u32::MAX);
            let needed = request.headcount.saturating_sub(already);
            if needed == 0 {
                continue;
            }

            let ranked = rank_candidates(self.scorer, employees, request, ledger, |e| {
                !ledger.holds(e.id, request_index)
            });

            let mut placed = 0u32;
            for candidate in ranked.into_iter().take(needed as usize) {
                ledger.push(Assignment::new(
                    candidate.employee_id,
                    request_index,
                    request,
                    candidate.score,
                ));
                placed += 1;
            }

            debug!(
                request = %request,
                request_index,
                placed,
                needed,
                "request processed"
            );

            if placed < needed {
                shortfalls.push(Unfulfilled {
                    request_index,
                    request: request.clone(),
                    shortfall: needed - placed,
                });
            }
        }

        shortfalls
    }
}
