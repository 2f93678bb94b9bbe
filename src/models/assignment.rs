//! Assignment (engine output) model.
//!
//! An assignment records that one employee works one requested shift.
//! Assignments are created by the greedy pass, may be released and
//! re-placed by the resolver, and are finalized by the orchestrator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Location, Priority, ShiftRequest, ShiftType};

/// Borrowed view of anything that occupies an employee on a date.
///
/// Both historical [`ShiftRecord`](super::ShiftRecord)s and new
/// [`Assignment`]s reduce to this shape for conflict checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRef<'a> {
    pub date: NaiveDate,
    pub shift_type: &'a ShiftType,
    pub location: &'a Location,
}

/// A proposed employee-to-shift assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub employee_id: u64,
    pub date: NaiveDate,
    pub shift_type: ShiftType,
    pub location: Location,
    /// Fitness score at the time of placement (1..=100).
    pub score: u8,
    /// Priority of the originating request.
    pub priority: Priority,
    /// Index of the originating request in the caller's request list.
    pub request_index: usize,
}

impl Assignment {
    /// Creates an assignment of `employee_id` to a request.
    pub fn new(employee_id: u64, request_index: usize, request: &ShiftRequest, score: u8) -> Self {
        Self {
            employee_id,
            date: request.date,
            shift_type: request.shift_type.clone(),
            location: request.location.clone(),
            score,
            priority: request.priority,
            request_index,
        }
    }

    /// Borrowed view used by the conflict detector.
    pub fn as_booking(&self) -> BookingRef<'_> {
        BookingRef {
            date: self.date,
            shift_type: &self.shift_type,
            location: &self.location,
        }
    }
}
