//! Shift request model.
//!
//! A request asks for `headcount` employees to work one shift type at one
//! location on one date. Requests are built by the caller for a planning
//! horizon and consumed once per batch run.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Location, ShiftType};

/// Request priority (`Urgent > High > Normal > Low`).
///
/// Variants are declared in ascending order so the derived `Ord` matches
/// business priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    /// Every priority, highest first.
    pub const DESCENDING: [Priority; 4] = [
        Priority::Urgent,
        Priority::High,
        Priority::Normal,
        Priority::Low,
    ];
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        })
    }
}

/// A request to staff one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// Calendar day of the shift.
    pub date: NaiveDate,
    pub location: Location,
    pub shift_type: ShiftType,
    /// Number of employees needed (must be positive).
    pub headcount: u32,
    #[serde(default)]
    pub priority: Priority,
}

impl ShiftRequest {
    /// Creates a normal-priority request for a single employee.
    pub fn new(date: NaiveDate, location: Location, shift_type: ShiftType) -> Self {
        Self {
            date,
            location,
            shift_type,
            headcount: 1,
            priority: Priority::Normal,
        }
    }

    /// Sets the required headcount.
    pub fn with_headcount(mut self, headcount: u32) -> Self {
        self.headcount = headcount;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

impl fmt::Display for ShiftRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @ {} x{} ({})",
            self.date, self.shift_type, self.location, self.headcount, self.priority
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Urgent > Priority::High);
        assert!(Priority::High > Priority::Normal);
        assert!(Priority::Normal > Priority::Low);

        let mut ps = vec![Priority::Low, Priority::Urgent, Priority::Normal, Priority::High];
        ps.sort_by(|a, b| b.cmp(a));
        assert_eq!(ps, Priority::DESCENDING.to_vec());
    }

    #[test]
    fn test_request_builder() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();
        let r = ShiftRequest::new(date, Location::Icu, ShiftType::Malam)
            .with_headcount(3)
            .with_priority(Priority::Urgent);

        assert_eq!(r.headcount, 3);
        assert_eq!(r.priority, Priority::Urgent);
        assert_eq!(r.to_string(), "2025-08-06 MALAM @ ICU x3 (urgent)");
    }

    #[test]
    fn test_request_deserialize() {
        let r: ShiftRequest = serde_json::from_str(
            r#"{"date":"2025-08-06","location":"GAWAT_DARURAT","shift_type":"SIANG","headcount":2}"#,
        )
        .unwrap();
        assert_eq!(r.location, Location::GawatDarurat);
        assert_eq!(r.shift_type, ShiftType::Siang);
        assert_eq!(r.priority, Priority::Normal);
    }
}
