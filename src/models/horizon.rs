//! Planning horizons and recurring shift templates.
//!
//! A batch is planned for a day, a week, or a month starting at a given
//! date. Templates describe the staffing a unit needs every day; expanding
//! them over a horizon yields the concrete [`ShiftRequest`]s for the batch.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Location, Priority, ShiftRequest, ShiftType};

/// Length of a planning horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizonSpan {
    Day,
    Week,
    /// From the start date up to (excluding) the same day next month.
    Month,
}

/// Inclusive date range a batch plans for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningHorizon {
    pub start: NaiveDate,
    pub span: HorizonSpan,
}

impl PlanningHorizon {
    /// Creates a horizon.
    pub fn new(start: NaiveDate, span: HorizonSpan) -> Self {
        Self { start, span }
    }

    /// Single-day horizon.
    pub fn day(start: NaiveDate) -> Self {
        Self::new(start, HorizonSpan::Day)
    }

    /// Seven-day horizon.
    pub fn week(start: NaiveDate) -> Self {
        Self::new(start, HorizonSpan::Week)
    }

    /// One-month horizon.
    pub fn month(start: NaiveDate) -> Self {
        Self::new(start, HorizonSpan::Month)
    }

    /// Last day of the horizon (inclusive).
    pub fn end(&self) -> NaiveDate {
        let exclusive = match self.span {
            HorizonSpan::Day => self.start.checked_add_days(Days::new(1)),
            HorizonSpan::Week => self.start.checked_add_days(Days::new(7)),
            HorizonSpan::Month => self.start.checked_add_months(Months::new(1)),
        };
        exclusive
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Whether a date lies within the horizon.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    /// Every date of the horizon, in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let end = self.end();
        std::iter::successors(Some(self.start), |d| d.succ_opt())
            .take_while(|d| *d <= end)
            .collect()
    }

    /// Number of days in the horizon.
    pub fn len_days(&self) -> usize {
        self.dates().len()
    }

    /// Expands daily templates into one request per template per day.
    ///
    /// Requests are ordered by date, then by template order.
    pub fn expand(&self, templates: &[ShiftTemplate]) -> Vec<ShiftRequest> {
        self.dates()
            .into_iter()
            .flat_map(|date| templates.iter().map(move |t| t.request_on(date)))
            .collect()
    }
}

/// Daily staffing need of one unit for one shift type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    pub location: Location,
    pub shift_type: ShiftType,
    pub headcount: u32,
    #[serde(default)]
    pub priority: Priority,
}

impl ShiftTemplate {
    /// Creates a normal-priority template.
    pub fn new(location: Location, shift_type: ShiftType, headcount: u32) -> Self {
        Self {
            location,
            shift_type,
            headcount,
            priority: Priority::Normal,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Concrete request for a date.
    pub fn request_on(&self, date: NaiveDate) -> ShiftRequest {
        ShiftRequest::new(date, self.location.clone(), self.shift_type.clone())
            .with_headcount(self.headcount)
            .with_priority(self.priority)
    }
}
