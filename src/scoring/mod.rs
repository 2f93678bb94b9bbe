//! Fitness scoring for (employee, shift request) pairs.
//!
//! Provides composable scoring rules and a scorer that combines them
//! with the hard constraints (role–location compatibility and the
//! conflict detector).
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use u_roster::conflict::ConflictDetector;
//! use u_roster::models::{
//!     Employee, Location, Role, RoleLocationMatrix, ShiftCatalog, ShiftRequest, ShiftType,
//! };
//! use u_roster::scoring::{AssignmentLedger, FitnessScorer};
//!
//! let catalog = ShiftCatalog::hospital_default();
//! let matrix = RoleLocationMatrix::hospital_default();
//! let scorer = FitnessScorer::new(ConflictDetector::new(&catalog), &matrix);
//!
//! let nurse = Employee::new(1, "Siti", Role::Nurse);
//! let date = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();
//! let request = ShiftRequest::new(date, Location::Icu, ShiftType::Pagi);
//!
//! // base 50 + primary affinity 20 + light workload 15
//! assert_eq!(scorer.score(&nurse, &request, &AssignmentLedger::new()), 85);
//! ```

mod context;
mod engine;
mod ledger;
pub mod rules;

pub use context::ScoringContext;
pub(crate) use context::period_shifts;
pub use engine::{Block, FitnessScorer};
pub use ledger::AssignmentLedger;

use std::fmt::Debug;

/// Score points contributed by one rule (may be negative).
pub type RuleScore = i32;

/// A soft scoring rule.
///
/// # Score Convention
/// **Higher score = better fit.** Rules return a signed adjustment that
/// the scorer adds to the base score before clamping to `0..=100`.
/// Hard constraints are not rules; they are enforced by the scorer.
pub trait ScoringRule: Send + Sync + Debug {
    /// Rule name (e.g., "ROLE", "WORKLOAD").
    fn name(&self) -> &'static str;

    /// Score adjustment for the candidate described by `context`.
    fn evaluate(&self, context: &ScoringContext<'_>) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
