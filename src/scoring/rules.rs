//! Built-in scoring rules.
//!
//! # Rules
//!
//! | Rule | Effect |
//! |------|--------|
//! | ROLE | Bonus by the role's affinity for the location |
//! | WORKLOAD | Bonus for lightly loaded staff, penalty for heavily loaded |
//! | EXPERIENCE | Bonus for prior shifts at the location |
//! | FATIGUE | Penalty after a long run of consecutive days |
//!
//! # Score Convention
//! All rules return signed score points; higher = better fit.

use super::{RuleScore, ScoringContext, ScoringRule};
use crate::config::ScoringConfig;
use crate::models::Affinity;

/// Role–location affinity bonus.
///
/// Roles central to the unit (e.g., nurses in the ICU) score higher than
/// roles that are merely permitted there.
#[derive(Debug, Clone, Copy)]
pub struct RoleAffinity {
    pub primary_bonus: RuleScore,
    pub secondary_bonus: RuleScore,
}

impl RoleAffinity {
    /// Creates the rule from scoring weights.
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            primary_bonus: config.primary_role_bonus,
            secondary_bonus: config.secondary_role_bonus,
        }
    }
}

impl ScoringRule for RoleAffinity {
    fn name(&self) -> &'static str {
        "ROLE"
    }

    fn evaluate(&self, context: &ScoringContext<'_>) -> RuleScore {
        match context.affinity() {
            Some(Affinity::Primary) => self.primary_bonus,
            Some(Affinity::Secondary) => self.secondary_bonus,
            None => 0,
        }
    }

    fn description(&self) -> &'static str {
        "Role affinity for the requested location"
    }
}

/// Workload balancing.
///
/// Uses the period shift count (this month plus placements earlier in the
/// batch), so staff picked up by earlier requests gradually lose their
/// light-workload bonus.
#[derive(Debug, Clone, Copy)]
pub struct Workload {
    pub low_threshold: u32,
    pub low_bonus: RuleScore,
    pub high_threshold: u32,
    pub high_penalty: RuleScore,
}

impl Workload {
    /// Creates the rule from scoring weights.
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            low_threshold: config.low_workload_threshold,
            low_bonus: config.low_workload_bonus,
            high_threshold: config.high_workload_threshold,
            high_penalty: config.high_workload_penalty,
        }
    }
}

impl ScoringRule for Workload {
    fn name(&self) -> &'static str {
        "WORKLOAD"
    }

    fn evaluate(&self, context: &ScoringContext<'_>) -> RuleScore {
        let shifts = context.period_shifts();
        if shifts < self.low_threshold {
            self.low_bonus
        } else if shifts > self.high_threshold {
            -self.high_penalty
        } else {
            0
        }
    }

    fn description(&self) -> &'static str {
        "Current-period workload balance"
    }
}

/// Prior experience at the requested location.
#[derive(Debug, Clone, Copy)]
pub struct LocationExperience {
    pub bonus: RuleScore,
}

impl ScoringRule for LocationExperience {
    fn name(&self) -> &'static str {
        "EXPERIENCE"
    }

    fn evaluate(&self, context: &ScoringContext<'_>) -> RuleScore {
        if context.employee.has_worked_at(&context.request.location) {
            self.bonus
        } else {
            0
        }
    }

    fn description(&self) -> &'static str {
        "Prior shifts at the requested location"
    }
}

/// Consecutive-days fatigue.
#[derive(Debug, Clone, Copy)]
pub struct Fatigue {
    pub threshold: u32,
    pub penalty: RuleScore,
}

impl ScoringRule for Fatigue {
    fn name(&self) -> &'static str {
        "FATIGUE"
    }

    fn evaluate(&self, context: &ScoringContext<'_>) -> RuleScore {
        if context.employee.consecutive_days_worked >= self.threshold {
            -self.penalty
        } else {
            0
        }
    }

    fn description(&self) -> &'static str {
        "Consecutive days worked"
    }
}
