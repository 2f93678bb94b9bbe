//! Fitness scorer combining hard blocks and soft rules.
//!
//! # Algorithm
//! 1. Block (score 0) if the role may not staff the location.
//! 2. Block (score 0) if the conflict detector rejects the request against
//!    the union of the employee's history and the batch ledger.
//! 3. Otherwise start from the base score, add every rule's adjustment,
//!    and clamp to `0..=100`.
//!
//! The scorer holds no mutable state. Its result depends only on the
//! employee, the request, and the ledger passed in, so it can be called
//! again and again while the ledger grows during a batch.

use std::sync::Arc;

use super::rules::{Fatigue, LocationExperience, RoleAffinity, Workload};
use super::{AssignmentLedger, RuleScore, ScoringContext, ScoringRule};
use crate::config::ScoringConfig;
use crate::conflict::{ConflictDetector, ConflictKind};
use crate::models::{
    Assignment, BookingRef, Employee, RoleLocationMatrix, ShiftRecord, ShiftRequest,
};

/// Upper bound of a fitness score.
pub const MAX_SCORE: RuleScore = 100;

/// Reason a candidate scores zero regardless of rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    /// The role–location matrix forbids the pairing.
    RoleNotPermitted,
    /// The conflict detector rejected the booking.
    Conflict(ConflictKind),
}

/// Scores (employee, request) pairs on a 0–100 scale.
#[derive(Clone)]
pub struct FitnessScorer<'a> {
    detector: ConflictDetector<'a>,
    matrix: &'a RoleLocationMatrix,
    base_score: RuleScore,
    rules: Vec<Arc<dyn ScoringRule>>,
}

impl<'a> FitnessScorer<'a> {
    /// Creates a scorer with the default weights and all built-in rules.
    pub fn new(detector: ConflictDetector<'a>, matrix: &'a RoleLocationMatrix) -> Self {
        Self::from_config(detector, matrix, &ScoringConfig::default())
    }

    /// Creates a scorer with all built-in rules weighted by `config`.
    pub fn from_config(
        detector: ConflictDetector<'a>,
        matrix: &'a RoleLocationMatrix,
        config: &ScoringConfig,
    ) -> Self {
        Self::bare(detector, matrix, config.base_score)
            .with_rule(RoleAffinity::from_config(config))
            .with_rule(Workload::from_config(config))
            .with_rule(LocationExperience {
                bonus: config.location_experience_bonus,
            })
            .with_rule(Fatigue {
                threshold: config.fatigue_threshold,
                penalty: config.fatigue_penalty,
            })
    }

    /// Creates a scorer with hard blocks only and no soft rules.
    pub fn bare(
        detector: ConflictDetector<'a>,
        matrix: &'a RoleLocationMatrix,
        base_score: RuleScore,
    ) -> Self {
        Self {
            detector,
            matrix,
            base_score,
            rules: Vec::new(),
        }
    }

    /// Adds a soft rule.
    pub fn with_rule<R: ScoringRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// The conflict detector used for hard blocks.
    pub fn detector(&self) -> &ConflictDetector<'a> {
        &self.detector
    }

    /// The role–location matrix used for hard blocks.
    pub fn matrix(&self) -> &'a RoleLocationMatrix {
        self.matrix
    }

    /// Hard block preventing the assignment, if any.
    pub fn blocked_by(
        &self,
        employee: &Employee,
        request: &ShiftRequest,
        ledger: &AssignmentLedger,
    ) -> Option<Block> {
        if !self.matrix.permits(employee.role, &request.location) {
            return Some(Block::RoleNotPermitted);
        }

        let mut booked: Vec<BookingRef<'_>> =
            employee.history.iter().map(ShiftRecord::as_booking).collect();
        booked.extend(ledger.for_employee(employee.id).map(Assignment::as_booking));

        let candidate = BookingRef {
            date: request.date,
            shift_type: &request.shift_type,
            location: &request.location,
        };
        self.detector
            .check(&booked, request.date, Some(candidate))
            .map(Block::Conflict)
    }

    /// Fitness score in `0..=100`; zero means the employee must not be placed.
    pub fn score(
        &self,
        employee: &Employee,
        request: &ShiftRequest,
        ledger: &AssignmentLedger,
    ) -> u8 {
        if self.blocked_by(employee, request, ledger).is_some() {
            return 0;
        }

        let context = ScoringContext::new(employee, request, ledger, self.matrix);
        let total: RuleScore = self.base_score
            + self
                .rules
                .iter()
                .map(|r| r.evaluate(&context))
                .sum::<RuleScore>();

        // Clamped into 0..=100, fits in u8.
        total.clamp(0, MAX_SCORE) as u8
    }

    /// Per-rule adjustments, in rule order (hard blocks not applied).
    pub fn breakdown(
        &self,
        employee: &Employee,
        request: &ShiftRequest,
        ledger: &AssignmentLedger,
    ) -> Vec<(&'static str, RuleScore)> {
        let context = ScoringContext::new(employee, request, ledger, self.matrix);
        self.rules
            .iter()
            .map(|r| (r.name(), r.evaluate(&context)))
            .collect()
    }
}

impl std::fmt::Debug for FitnessScorer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FitnessScorer")
            .field("base_score", &self.base_score)
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, Role, ShiftCatalog, ShiftType};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 6).unwrap()
    }

    fn nurse_with(shifts: &[(ShiftType, Location)]) -> Employee {
        shifts
            .iter()
            .fold(Employee::new(1, "Siti", Role::Nurse), |e, (st, loc)| {
                e.with_shift(date(), st.clone(), loc.clone())
            })
    }

    #[derive(Debug)]
    struct Flat(RuleScore);

    impl ScoringRule for Flat {
        fn name(&self) -> &'static str {
            "FLAT"
        }
        fn evaluate(&self, _context: &ScoringContext<'_>) -> RuleScore {
            self.0
        }
    }

    #[test]
    fn test_morning_then_night_elsewhere_is_assignable() {
        let catalog = ShiftCatalog::hospital_default();
        let matrix = RoleLocationMatrix::hospital_default();
        let scorer = FitnessScorer::new(ConflictDetector::new(&catalog), &matrix);

        let e = nurse_with(&[(ShiftType::Pagi, Location::Icu)]);
        let req = ShiftRequest::new(date(), Location::GawatDarurat, ShiftType::Malam);
        let score = scorer.score(&e, &req, &AssignmentLedger::new());
        assert!(score > 0);
        // 50 base + 20 primary + 15 light workload
        assert_eq!(score, 85);
    }

    #[test]
    fn test_two_existing_shifts_block() {
        let catalog = ShiftCatalog::hospital_default();
        let matrix = RoleLocationMatrix::hospital_default();
        let scorer = FitnessScorer::new(ConflictDetector::new(&catalog), &matrix);

        let e = nurse_with(&[
            (ShiftType::Pagi, Location::Icu),
            (ShiftType::Siang, Location::RawatInap),
        ]);
        let req = ShiftRequest::new(date(), Location::GawatDarurat, ShiftType::Malam);
        assert_eq!(scorer.score(&e, &req, &AssignmentLedger::new()), 0);
        assert_eq!(
            scorer.blocked_by(&e, &req, &AssignmentLedger::new()),
            Some(Block::Conflict(ConflictKind::DailyLimit))
        );
    }

    #[test]
    fn test_adjacent_shift_allowed() {
        let catalog = ShiftCatalog::hospital_default();
        let matrix = RoleLocationMatrix::hospital_default();
        let scorer = FitnessScorer::new(ConflictDetector::new(&catalog), &matrix);

        let e = nurse_with(&[(ShiftType::Pagi, Location::Icu)]);
        let req = ShiftRequest::new(date(), Location::GawatDarurat, ShiftType::Siang);
        assert!(scorer.score(&e, &req, &AssignmentLedger::new()) > 0);
    }

    #[test]
    fn test_same_location_blocked() {
        let catalog = ShiftCatalog::hospital_default();
        let matrix = RoleLocationMatrix::hospital_default();
        let scorer = FitnessScorer::new(ConflictDetector::new(&catalog), &matrix);

        let e = nurse_with(&[(ShiftType::Pagi, Location::Icu)]);
        let req = ShiftRequest::new(date(), Location::Icu, ShiftType::Malam);
        assert_eq!(scorer.score(&e, &req, &AssignmentLedger::new()), 0);
        assert_eq!(
            scorer.blocked_by(&e, &req, &AssignmentLedger::new()),
            Some(Block::Conflict(ConflictKind::DuplicateLocation))
        );
    }

    #[test]
    fn test_history_and_ledger_combined() {
        let catalog = ShiftCatalog::hospital_default();
        let matrix = RoleLocationMatrix::hospital_default();
        let scorer = FitnessScorer::new(ConflictDetector::new(&catalog), &matrix);

        // One historical shift plus one batch placement reach the daily limit.
        let e = nurse_with(&[(ShiftType::Pagi, Location::Icu)]);
        let earlier = ShiftRequest::new(date(), Location::RawatInap, ShiftType::Siang);
        let mut ledger = AssignmentLedger::new();
        ledger.push(Assignment::new(e.id, 0, &earlier, 70));

        let req = ShiftRequest::new(date(), Location::GawatDarurat, ShiftType::Malam);
        assert!(scorer.score(&e, &req, &AssignmentLedger::new()) > 0);
        assert_eq!(scorer.score(&e, &req, &ledger), 0);
    }

    #[test]
    fn test_role_not_permitted() {
        let catalog = ShiftCatalog::hospital_default();
        let matrix = RoleLocationMatrix::hospital_default();
        let scorer = FitnessScorer::new(ConflictDetector::new(&catalog), &matrix);

        let admin = Employee::new(9, "Dewi", Role::Administrator);
        let req = ShiftRequest::new(date(), Location::Icu, ShiftType::Pagi);
        assert_eq!(scorer.score(&admin, &req, &AssignmentLedger::new()), 0);
        assert_eq!(
            scorer.blocked_by(&admin, &req, &AssignmentLedger::new()),
            Some(Block::RoleNotPermitted)
        );
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let catalog = ShiftCatalog::hospital_default();
        let matrix = RoleLocationMatrix::hospital_default();
        let scorer = FitnessScorer::new(ConflictDetector::new(&catalog), &matrix);

        let e = nurse_with(&[(ShiftType::Pagi, Location::Icu)])
            .with_month_shift_count(22)
            .with_consecutive_days(6);
        let req = ShiftRequest::new(date(), Location::Icu, ShiftType::Siang);
        let other = ShiftRequest::new(date(), Location::RawatJalan, ShiftType::Siang);
        let ledger = AssignmentLedger::new();

        assert_eq!(scorer.score(&e, &req, &ledger), scorer.score(&e, &req, &ledger));
        // 50 + 20 primary - 20 heavy - 10 fatigue
        assert_eq!(scorer.score(&e, &other, &ledger), 40);
        assert_eq!(scorer.score(&e, &other, &ledger), scorer.score(&e, &other, &ledger));
    }

    #[test]
    fn test_experience_bonus() {
        let catalog = ShiftCatalog::hospital_default();
        let matrix = RoleLocationMatrix::hospital_default();
        let scorer = FitnessScorer::new(ConflictDetector::new(&catalog), &matrix);

        let e = Employee::new(1, "Siti", Role::Nurse).with_shift(
            NaiveDate::from_ymd_opt(2025, 7, 30).unwrap(),
            ShiftType::Pagi,
            Location::KamarOperasi,
        );
        let req = ShiftRequest::new(date(), Location::KamarOperasi, ShiftType::Pagi);
        assert_eq!(scorer.score(&e, &req, &AssignmentLedger::new()), 95);
    }

    #[test]
    fn test_score_clamped() {
        let catalog = ShiftCatalog::hospital_default();
        let matrix = RoleLocationMatrix::hospital_default();
        let e = Employee::new(1, "Siti", Role::Nurse);
        let req = ShiftRequest::new(date(), Location::Icu, ShiftType::Pagi);
        let ledger = AssignmentLedger::new();

        let high = FitnessScorer::bare(ConflictDetector::new(&catalog), &matrix, 50)
            .with_rule(Flat(500));
        assert_eq!(high.score(&e, &req, &ledger), 100);

        let low = FitnessScorer::bare(ConflictDetector::new(&catalog), &matrix, 50)
            .with_rule(Flat(-500));
        assert_eq!(low.score(&e, &req, &ledger), 0);
    }

    #[test]
    fn test_breakdown_lists_rules() {
        let catalog = ShiftCatalog::hospital_default();
        let matrix = RoleLocationMatrix::hospital_default();
        let scorer = FitnessScorer::new(ConflictDetector::new(&catalog), &matrix);
        let e = Employee::new(1, "Siti", Role::Nurse);
        let req = ShiftRequest::new(date(), Location::Icu, ShiftType::Pagi);

        let parts = scorer.breakdown(&e, &req, &AssignmentLedger::new());
        assert_eq!(
            parts,
            vec![("ROLE", 20), ("WORKLOAD", 15), ("EXPERIENCE", 0), ("FATIGUE", 0)]
        );
        assert!(format!("{scorer:?}").contains("WORKLOAD"));
    }
}
