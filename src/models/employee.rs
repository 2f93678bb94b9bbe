//! Employee model.
//!
//! An employee is a staff member who can be assigned to shifts. Besides
//! identity and role it carries workload state loaded by the surrounding
//! system: previously recorded shifts and two counters. The engine reads
//! this state and never changes it; new work is proposed as
//! [`Assignment`](super::Assignment)s instead.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BookingRef, Location, Role, ShiftType};

/// A shift the employee already holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRecord {
    pub date: NaiveDate,
    pub shift_type: ShiftType,
    pub location: Location,
}

impl ShiftRecord {
    /// Creates a shift record.
    pub fn new(date: NaiveDate, shift_type: ShiftType, location: Location) -> Self {
        Self {
            date,
            shift_type,
            location,
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

/// A staff member in the eligible pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    pub role: Role,
    /// Existing shifts, ordered as supplied.
    #[serde(default)]
    pub history: Vec<ShiftRecord>,
    /// Days worked in a row up to the planning start.
    #[serde(default)]
    pub consecutive_days_worked: u32,
    /// Shifts already worked in the current month.
    #[serde(default)]
    pub month_shift_count: u32,
}

impl Employee {
    /// Creates an employee with no workload history.
    pub fn new(id: u64, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            history: Vec::new(),
            consecutive_days_worked: 0,
            month_shift_count: 0,
        }
    }

    /// Adds an existing shift.
    pub fn with_shift(
        mut self,
        date: NaiveDate,
        shift_type: ShiftType,
        location: Location,
    ) -> Self {
        self.history.push(ShiftRecord::new(date, shift_type, location));
        self
    }

    /// Sets the consecutive-days counter.
    pub fn with_consecutive_days(mut self, days: u32) -> Self {
        self.consecutive_days_worked = days;
        self
    }

    /// Sets the current-month shift count.
    pub fn with_month_shift_count(mut self, count: u32) -> Self {
        self.month_shift_count = count;
        self
    }

    /// Existing shifts on a given date.
    pub fn shifts_on(&self, date: NaiveDate) -> impl Iterator<Item = &ShiftRecord> {
        self.history.iter().filter(move |s| s.date == date)
    }

    /// Whether the employee has worked at the location before.
    pub fn has_worked_at(&self, location: &Location) -> bool {
        self.history.iter().any(|s| &s.location == location)
    }
}
