//! Booking conflict detection.
//!
//! Decides whether placing an employee on a candidate shift would break
//! a hard constraint, given everything the employee already holds
//! (historical shifts and assignments made earlier in the same batch).
//!
//! # Rules
//!
//! Evaluated in order; the first violated rule is reported.
//!
//! 1. **Daily limit**: the employee already holds `max_shifts_per_day`
//!    bookings on the date. Applies with or without a candidate.
//! 2. **Time overlap**: the candidate's window overlaps a same-date
//!    booking. Windows sharing only a boundary do not overlap.
//! 3. **Duplicate location**: the candidate's location equals a same-date
//!    booking's location, even without a time overlap.
//! 4. **Insufficient rest**: a booking on the previous or next date
//!    overlaps the candidate once both are laid out on one time line,
//!    or leaves less than `min_rest_minutes` between them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::LimitsConfig;
use crate::models::{BookingRef, ShiftCatalog};

/// Why a candidate booking is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    DailyLimit,
    TimeOverlap,
    DuplicateLocation,
    InsufficientRest,
}

/// Stateless conflict checker bound to a shift catalog and limits.
#[derive(Debug, Clone, Copy)]
pub struct ConflictDetector<'a> {
    catalog: &'a ShiftCatalog,
    max_shifts_per_day: usize,
    min_rest_minutes: u32,
}

impl<'a> ConflictDetector<'a> {
    /// Creates a detector with the default limits (2 per day, no rest gap).
    pub fn new(catalog: &'a ShiftCatalog) -> Self {
        Self::with_limits(catalog, &LimitsConfig::default())
    }

    /// Creates a detector with explicit limits.
    pub fn with_limits(catalog: &'a ShiftCatalog, limits: &LimitsConfig) -> Self {
        Self {
            catalog,
            max_shifts_per_day: limits.max_shifts_per_day,
            min_rest_minutes: limits.min_rest_minutes,
        }
    }

    /// The catalog used to resolve windows.
    pub fn catalog(&self) -> &'a ShiftCatalog {
        self.catalog
    }

    /// Whether any rule is violated.
    ///
    /// `date` is the date under test. A `candidate` should carry the same
    /// date; without one only the daily limit is evaluated.
    pub fn has_conflict(
        &self,
        booked: &[BookingRef<'_>],
        date: NaiveDate,
        candidate: Option<BookingRef<'_>>,
    ) -> bool {
        self.check(booked, date, candidate).is_some()
    }

    /// First violated rule, if any.
    pub fn check(
        &self,
        booked: &[BookingRef<'_>],
        date: NaiveDate,
        candidate: Option<BookingRef<'_>>,
    ) -> Option<ConflictKind> {
        let same_day: Vec<&BookingRef<'_>> = booked.iter().filter(|b| b.date == date).collect();

        if same_day.len() >= self.max_shifts_per_day {
            return Some(ConflictKind::DailyLimit);
        }

        let candidate = candidate?;
        let window = self.catalog.resolve(candidate.shift_type);

        if same_day
            .iter()
            .any(|b| window.overlaps(&self.catalog.resolve(b.shift_type)))
        {
            return Some(ConflictKind::TimeOverlap);
        }

        if same_day.iter().any(|b| b.location == candidate.location) {
            return Some(ConflictKind::DuplicateLocation);
        }

        let (c_start, c_end) = window.absolute(0);
        let rest = i64::from(self.min_rest_minutes);
        let too_close = booked.iter().any(|b| {
            let offset = (b.date - date).num_days();
            if offset.abs() != 1 {
                return false;
            }
            let (b_start, b_end) = self.catalog.resolve(b.shift_type).absolute(offset);
            let gap = if b_end <= c_start {
                c_start - b_end
            } else if c_end <= b_start {
                b_start - c_end
            } else {
                return true;
            };
            gap < rest
        });
        if too_close {
            return Some(ConflictKind::InsufficientRest);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, ShiftType};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    fn booking<'a>(date: NaiveDate, st: &'a ShiftType, loc: &'a Location) -> BookingRef<'a> {
        BookingRef {
            date,
            shift_type: st,
            location: loc,
        }
    }

    #[test]
    fn test_daily_limit_without_candidate() {
        let catalog = ShiftCatalog::hospital_default();
        let det = ConflictDetector::new(&catalog);
        let booked = vec![
            booking(day(6), &ShiftType::Pagi, &Location::Icu),
            booking(day(6), &ShiftType::Malam, &Location::GawatDarurat),
        ];
        assert_eq!(det.check(&booked, day(6), None), Some(ConflictKind::DailyLimit));
        assert!(!det.has_conflict(&booked[..1], day(6), None));
        assert!(!det.has_conflict(&booked, day(7), None));
    }

    #[test]
    fn test_daily_limit_with_candidate() {
        let catalog = ShiftCatalog::hospital_default();
        let det = ConflictDetector::new(&catalog);
        let booked = vec![
            booking(day(6), &ShiftType::Pagi, &Location::Icu),
            booking(day(6), &ShiftType::Siang, &Location::GawatDarurat),
        ];
        let cand = booking(day(6), &ShiftType::Malam, &Location::RawatInap);
        assert_eq!(det.check(&booked, day(6), Some(cand)), Some(ConflictKind::DailyLimit));
    }

    #[test]
    fn test_non_overlapping_different_location_allowed() {
        let catalog = ShiftCatalog::hospital_default();
        let det = ConflictDetector::new(&catalog);
        let booked = vec![booking(day(6), &ShiftType::Pagi, &Location::Icu)];
        let cand = booking(day(6), &ShiftType::Malam, &Location::GawatDarurat);
        assert_eq!(det.check(&booked, day(6), Some(cand)), None);
    }

    #[test]
    fn test_adjacent_shifts_allowed() {
        let catalog = ShiftCatalog::hospital_default();
        let det = ConflictDetector::new(&catalog);
        let booked = vec![booking(day(6), &ShiftType::Pagi, &Location::Icu)];
        let cand = booking(day(6), &ShiftType::Siang, &Location::GawatDarurat);
        assert!(!det.has_conflict(&booked, day(6), Some(cand)));
    }

    #[test]
    fn test_same_location_blocked() {
        let catalog = ShiftCatalog::hospital_default();
        let det = ConflictDetector::new(&catalog);
        let booked = vec![booking(day(6), &ShiftType::Pagi, &Location::Icu)];
        let cand = booking(day(6), &ShiftType::Malam, &Location::Icu);
        assert_eq!(
            det.check(&booked, day(6), Some(cand)),
            Some(ConflictKind::DuplicateLocation)
        );
    }

    #[test]
    fn test_overlap_blocked() {
        let middle = ShiftType::Custom("MIDDLE".into());
        let catalog = ShiftCatalog::hospital_default().with_window(
            middle.clone(),
            crate::models::ShiftWindow::from_hm((10, 0), (18, 0)),
        );
        let det = ConflictDetector::new(&catalog);
        let booked = vec![booking(day(6), &ShiftType::Pagi, &Location::Icu)];
        let cand = booking(day(6), &middle, &Location::GawatDarurat);
        assert_eq!(det.check(&booked, day(6), Some(cand)), Some(ConflictKind::TimeOverlap));
    }

    #[test]
    fn test_unknown_historical_shift_blocks_everything() {
        let catalog = ShiftCatalog::hospital_default();
        let det = ConflictDetector::new(&catalog);
        let legacy = ShiftType::Custom("LEGACY".into());
        let booked = vec![booking(day(6), &legacy, &Location::Icu)];
        for st in [ShiftType::Pagi, ShiftType::Siang, ShiftType::Malam] {
            let cand = booking(day(6), &st, &Location::GawatDarurat);
            assert_eq!(det.check(&booked, day(6), Some(cand)), Some(ConflictKind::TimeOverlap));
        }
    }

    #[test]
    fn test_other_dates_ignored_by_default() {
        let catalog = ShiftCatalog::hospital_default();
        let det = ConflictDetector::new(&catalog);
        let booked = vec![
            booking(day(5), &ShiftType::Malam, &Location::Icu),
            booking(day(7), &ShiftType::Pagi, &Location::Icu),
        ];
        // MALAM on the 5th ends 06:00 on the 6th; PAGI on the 6th starts then.
        let cand = booking(day(6), &ShiftType::Pagi, &Location::Icu);
        assert_eq!(det.check(&booked, day(6), Some(cand)), None);
    }

    #[test]
    fn test_cross_midnight_overlap_blocked() {
        let early = ShiftType::Custom("EARLY".into());
        let catalog = ShiftCatalog::hospital_default().with_window(
            early.clone(),
            crate::models::ShiftWindow::from_hm((4, 0), (12, 0)),
        );
        let det = ConflictDetector::new(&catalog);
        let booked = vec![booking(day(5), &ShiftType::Malam, &Location::Icu)];
        let cand = booking(day(6), &early, &Location::GawatDarurat);
        assert_eq!(
            det.check(&booked, day(6), Some(cand)),
            Some(ConflictKind::InsufficientRest)
        );
    }

    #[test]
    fn test_min_rest_between_days() {
        let catalog = ShiftCatalog::hospital_default();
        let limits = LimitsConfig {
            min_rest_minutes: 8 * 60,
            ..LimitsConfig::default()
        };
        let det = ConflictDetector::with_limits(&catalog, &limits);

        // Night shift then morning shift next day: zero rest.
        let booked = vec![booking(day(5), &ShiftType::Malam, &Location::Icu)];
        let cand = booking(day(6), &ShiftType::Pagi, &Location::Icu);
        assert_eq!(
            det.check(&booked, day(6), Some(cand)),
            Some(ConflictKind::InsufficientRest)
        );

        // Candidate before a booking on the next day: SIANG ends 22:00,
        // PAGI next day starts 06:00, 8 hours of rest.
        let booked = vec![booking(day(7), &ShiftType::Pagi, &Location::Icu)];
        let cand = booking(day(6), &ShiftType::Siang, &Location::Icu);
        assert_eq!(det.check(&booked, day(6), Some(cand)), None);
    }

    #[test]
    fn test_detector_is_deterministic() {
        let catalog = ShiftCatalog::hospital_default();
        let det = ConflictDetector::new(&catalog);
        let booked = vec![booking(day(6), &ShiftType::Pagi, &Location::Icu)];
        let cand = booking(day(6), &ShiftType::Pagi, &Location::RawatInap);
        let first = det.check(&booked, day(6), Some(cand));
        assert_eq!(first, det.check(&booked, day(6), Some(cand)));
        assert_eq!(first, Some(ConflictKind::TimeOverlap));
    }
}
