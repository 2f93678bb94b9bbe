//! Batch quality metrics.
//!
//! Computes summary indicators from a finished batch and its input
//! requests.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total requested | Sum of request headcounts |
//! | Total assigned | Final assignment count |
//! | Fulfillment rate | assigned / requested (1.0 when nothing requested) |
//! | Conflicts found | Tentative assignments released by the resolver |
//! | Conflicts resolved | Released slots refilled |
//! | Unresolved conflicts | Conflicts left after the last sweep |
//! | Average score | Mean fitness score of final assignments |
//! | By priority | Requested vs assigned per priority level |

use serde::{Deserialize, Serialize};

use crate::models::{Assignment, Priority, ShiftRequest};

use super::Resolution;

/// Fulfillment for one priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityFulfillment {
    pub priority: Priority,
    pub requested: u64,
    pub assigned: u64,
}

impl PriorityFulfillment {
    /// assigned / requested (1.0 when nothing requested).
    pub fn rate(&self) -> f64 {
        if self.requested == 0 {
            1.0
        } else {
            self.assigned as f64 / self.requested as f64
        }
    }
}

/// Batch performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Sum of request headcounts.
    pub total_requested: u64,
    pub total_assigned: usize,
    /// Fraction of requested slots filled (0.0..=1.0).
    pub fulfillment_rate: f64,
    pub conflicts_found: usize,
    pub conflicts_resolved: usize,
    pub unresolved_conflicts: usize,
    /// Mean fitness score of final assignments (0.0 when none).
    pub average_score: f64,
    /// One entry per priority, highest first.
    pub by_priority: Vec<PriorityFulfillment>,
}

impl BatchStats {
    /// Computes statistics from the input requests, the final
    /// assignments and the resolver's counters.
    pub fn calculate(
        requests: &[ShiftRequest],
        assignments: &[Assignment],
        resolution: &Resolution,
    ) -> Self {
        let total_requested: u64 = requests.iter().map(|r| u64::from(r.headcount)).sum();
        let total_assigned = assignments.len();

        let fulfillment_rate = if total_requested == 0 {
            1.0
        } else {
            total_assigned as f64 / total_requested as f64
        };

        let average_score = if assignments.is_empty() {
            0.0
        } else {
            let sum: f64 = assignments.iter().map(|a| f64::from(a.score)).sum();
            sum / assignments.len() as f64
        };

        let by_priority = Priority::DESCENDING
            .iter()
            .map(|&priority| PriorityFulfillment {
                priority,
                requested: requests
                    .iter()
                    .filter(|r| r.priority == priority)
                    .map(|r| u64::from(r.headcount))
                    .sum(),
                assigned: assignments.iter().filter(|a| a.priority == priority).count() as u64,
            })
            .collect();

        Self {
            total_requested,
            total_assigned,
            fulfillment_rate,
            conflicts_found: resolution.conflicts_found,
            conflicts_resolved: resolution.conflicts_resolved,
            unresolved_conflicts: resolution.unresolved,
            average_score,
            by_priority,
        }
    }

    /// Fulfillment for one priority level.
    pub fn for_priority(&self, priority: Priority) -> Option<&PriorityFulfillment> {
        self.by_priority.iter().find(|p| p.priority == priority)
    }

    /// Whether every requested slot was filled.
    pub fn is_fully_staffed(&self) -> bool {
        self.total_assigned as u64 >= self.total_requested
    }

    /// Whether the batch meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_fulfillment: f64, min_average_score: f64) -> bool {
        self.fulfillment_rate >= min_fulfillment && self.average_score >= min_average_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, ShiftType};
    use chrono::NaiveDate;

    fn req(priority: Priority, headcount: u32) -> ShiftRequest {
        ShiftRequest::new(
            NaiveDate::from_ymd_opt(2025, 8, 6).unwrap(),
            Location::Icu,
            ShiftType::Pagi,
        )
        .with_headcount(headcount)
        .with_priority(priority)
    }

    #[test]
    fn test_stats_basic() {
        let requests = vec![req(Priority::Urgent, 2), req(Priority::Normal, 2)];
        let assignments = vec![
            Assignment::new(1, 0, &requests[0], 80),
            Assignment::new(2, 0, &requests[0], 90),
            Assignment::new(3, 1, &requests[1], 70),
        ];
        let resolution = Resolution {
            conflicts_found: 2,
            conflicts_resolved: 1,
            ..Resolution::default()
        };

        let stats = BatchStats::calculate(&requests, &assignments, &resolution);
        assert_eq!(stats.total_requested, 4);
        assert_eq!(stats.total_assigned, 3);
        assert!((stats.fulfillment_rate - 0.75).abs() < 1e-10);
        assert!((stats.average_score - 80.0).abs() < 1e-10);
        assert_eq!(stats.conflicts_found, 2);
        assert_eq!(stats.conflicts_resolved, 1);
        assert_eq!(stats.unresolved_conflicts, 0);
        assert!(!stats.is_fully_staffed());
    }

    #[test]
    fn test_stats_by_priority() {
        let requests = vec![req(Priority::Urgent, 1), req(Priority::Low, 3)];
        let assignments = vec![
            Assignment::new(1, 0, &requests[0], 80),
            Assignment::new(2, 1, &requests[1], 60),
        ];

        let stats = BatchStats::calculate(&requests, &assignments, &Resolution::default());
        let priorities: Vec<Priority> = stats.by_priority.iter().map(|p| p.priority).collect();
        assert_eq!(priorities, Priority::DESCENDING.to_vec());

        let urgent = stats.for_priority(Priority::Urgent).unwrap();
        assert_eq!((urgent.requested, urgent.assigned), (1, 1));
        assert!((urgent.rate() - 1.0).abs() < 1e-10);

        let low = stats.for_priority(Priority::Low).unwrap();
        assert_eq!((low.requested, low.assigned), (3, 1));

        let high = stats.for_priority(Priority::High).unwrap();
        assert!((high.rate() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_stats_empty() {
        let stats = BatchStats::calculate(&[], &[], &Resolution::default());
        assert_eq!(stats.total_requested, 0);
        assert_eq!(stats.total_assigned, 0);
        assert!((stats.fulfillment_rate - 1.0).abs() < 1e-10);
        assert!((stats.average_score - 0.0).abs() < 1e-10);
        assert!(stats.is_fully_staffed());
    }

    #[test]
    fn test_huge_headcounts_do_not_overflow() {
        let big = u32::MAX / 2 + 1;
        let requests = vec![req(Priority::Urgent, big), req(Priority::Urgent, big)];
        let assignments = vec![Assignment::new(1, 0, &requests[0], 85)];

        let stats = BatchStats::calculate(&requests, &assignments, &Resolution::default());
        assert_eq!(stats.total_requested, 2 * u64::from(big));
        assert!(stats.total_requested > u64::from(u32::MAX));
        assert!(stats.fulfillment_rate > 0.0 && stats.fulfillment_rate < 1e-9);
        assert_eq!(
            stats.for_priority(Priority::Urgent).unwrap().requested,
            2 * u64::from(big)
        );
        assert!(!stats.is_fully_staffed());
    }

    #[test]
    fn test_meets_thresholds() {
        let requests = vec![req(Priority::Normal, 2)];
        let assignments = vec![Assignment::new(1, 0, &requests[0], 70)];

        let stats = BatchStats::calculate(&requests, &assignments, &Resolution::default());
        assert!(stats.meets_thresholds(0.5, 70.0));
        assert!(!stats.meets_thresholds(0.6, 0.0));
        assert!(!stats.meets_thresholds(0.0, 70.5));
    }
}
