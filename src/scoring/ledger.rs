//! Batch-scoped assignment accumulator.

use std::collections::{BTreeSet, HashMap};

use crate::models::{Assignment, BookingRef};

/// Assignments placed so far in one batch run.
///
/// The ledger is the only mutable state of a batch. It is owned by the
/// batch and passed by reference into every scoring call, so later
/// requests see earlier placements and batches stay isolated from each
/// other.
#[derive(Debug, Clone, Default)]
pub struct AssignmentLedger {
    assignments: Vec<Assignment>,
    /// employee_id → indices into `assignments`, in placement order.
    by_employee: HashMap<u64, Vec<usize>>,
}

impl AssignmentLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an assignment.
    pub fn push(&mut self, assignment: Assignment) {
        self.by_employee
            .entry(assignment.employee_id)
            .or_default()
            .push(self.assignments.len());
        self.assignments.push(assignment);
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether nothing has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// All assignments, in placement order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Assignments of one employee, in placement order.
    pub fn for_employee(&self, employee_id: u64) -> impl Iterator<Item = &Assignment> {
        self.by_employee
            .get(&employee_id)
            .into_iter()
            .flatten()
            .map(|&i| &self.assignments[i])
    }

    /// Positions of one employee's assignments, in placement order.
    pub fn positions_for(&self, employee_id: u64) -> &[usize] {
        self.by_employee.get(&employee_id).map_or(&[], Vec::as_slice)
    }

    /// Number of assignments held by one employee.
    pub fn count_for(&self, employee_id: u64) -> usize {
        self.by_employee.get(&employee_id).map_or(0, Vec::len)
    }

    /// Booking views of one employee's assignments.
    pub fn bookings_for(&self, employee_id: u64) -> Vec<BookingRef<'_>> {
        self.for_employee(employee_id).map(Assignment::as_booking).collect()
    }

    /// Whether the employee already fills a slot of the given request.
    pub fn holds(&self, employee_id: u64, request_index: usize) -> bool {
        self.for_employee(employee_id)
            .any(|a| a.request_index == request_index)
    }

    /// Number of slots filled for a request.
    pub fn filled(&self, request_index: usize) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.request_index == request_index)
            .count()
    }

    /// Keeps only assignments matching the predicate.
    pub fn retain(&mut self, keep: impl FnMut(&Assignment) -> bool) {
        self.assignments.retain(keep);
        self.reindex();
    }

    /// Removes the assignments at the given positions and returns them in
    /// placement order.
    pub fn remove_positions(&mut self, positions: &BTreeSet<usize>) -> Vec<Assignment> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.assignments)
            .into_iter()
            .enumerate()
            .partition(|(i, _)| positions.contains(i));
        self.assignments = kept.into_iter().map(|(_, a)| a).collect();
        self.reindex();
        removed.into_iter().map(|(_, a)| a).collect()
    }

    /// Consumes the ledger, returning assignments in placement order.
    pub fn into_assignments(self) -> Vec<Assignment> {
        self.assignments
    }

    fn reindex(&mut self) {
        self.by_employee.clear();
        for (i, a) in self.assignments.iter().enumerate() {
            self.by_employee.entry(a.employee_id).or_default().push(i);
        }
    }
}

impl FromIterator<Assignment> for AssignmentLedger {
    fn from_iter<I: IntoIterator<Item = Assignment>>(iter: I) -> Self {
        let mut ledger = Self::new();
        for a in iter {
            ledger.push(a);
        }
        ledger
    }
}
