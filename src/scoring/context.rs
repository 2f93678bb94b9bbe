//! Scoring context for rule evaluation.

use crate::models::{Affinity, Employee, RoleLocationMatrix, ShiftRequest};

use super::AssignmentLedger;

/// Everything a scoring rule may look at for one candidate.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub employee: &'a Employee,
    pub request: &'a ShiftRequest,
    /// Assignments placed earlier in the same batch.
    pub ledger: &'a AssignmentLedger,
    pub matrix: &'a RoleLocationMatrix,
}

impl<'a> ScoringContext<'a> {
    /// Creates a context.
    pub fn new(
        employee: &'a Employee,
        request: &'a ShiftRequest,
        ledger: &'a AssignmentLedger,
        matrix: &'a RoleLocationMatrix,
    ) -> Self {
        Self {
            employee,
            request,
            ledger,
            matrix,
        }
    }

    /// Shifts in the current period: this month's count plus batch placements.
    pub fn period_shifts(&self) -> u32 {
        period_shifts(self.employee, self.ledger)
    }

    /// The employee's affinity for the requested location.
    pub fn affinity(&self) -> Option<Affinity> {
        self.matrix
            .affinity(self.employee.role, &self.request.location)
    }
}

/// Current-period shift count of an employee given the batch so far.
pub(crate) fn period_shifts(employee: &Employee, ledger: &AssignmentLedger) -> u32 {
    let in_batch = u32::try_from(ledger.count_for(employee.id)).unwrap_or(u32::MAX);
    employee.month_shift_count.saturating_add(in_batch)
}
