//! Engine configuration.
//!
//! Load scoring weights, hard limits, resolution mode, and custom shift
//! windows from TOML without code changes. Every section is optional;
//! missing values fall back to the hospital defaults.
//!
//! # Examples
//!
//! ```
//! use u_roster::config::{EngineConfig, ResolutionMode};
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     [limits]
//!     max_shifts_per_batch = 5
//!
//!     [scoring]
//!     base_score = 40
//!
//!     [resolution]
//!     mode = "bounded"
//!     max_passes = 3
//!
//!     [[shifts]]
//!     name = "JAGA"
//!     start = "18:00"
//!     end = "23:00"
//! "#).unwrap();
//!
//! assert_eq!(config.limits.max_shifts_per_day, 2);
//! assert_eq!(config.limits.max_shifts_per_batch, 5);
//! assert_eq!(config.scoring.base_score, 40);
//! assert_eq!(config.resolution, ResolutionMode::Bounded { max_passes: 3 });
//! assert_eq!(config.shift_catalog().unwrap().len(), 4);
//! ```

use std::path::Path;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ShiftCatalog, ShiftType, ShiftWindow};

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid time '{value}' for shift '{shift}' (expected HH:MM)")]
    InvalidShiftTime { shift: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Hard limits enforced by the conflict detector and resolver.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Fitness score weights and thresholds.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Backtracking resolution mode.
    #[serde(default)]
    pub resolution: ResolutionMode,

    /// Extra (or overriding) shift windows.
    #[serde(default)]
    pub shifts: Vec<ShiftDefinition>,
}

impl EngineConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML, or
    /// fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the resolution mode.
    pub fn with_resolution(mut self, mode: ResolutionMode) -> Self {
        self.resolution = mode;
        self
    }

    /// Sets the per-batch shift cap.
    pub fn with_max_shifts_per_batch(mut self, max: usize) -> Self {
        self.limits.max_shifts_per_batch = max;
        self
    }

    /// Sets the minimum rest between shifts on neighbouring days.
    pub fn with_min_rest_minutes(mut self, minutes: u32) -> Self {
        self.limits.min_rest_minutes = minutes;
        self
    }

    /// Adds a shift window definition.
    pub fn with_shift(mut self, definition: ShiftDefinition) -> Self {
        self.shifts.push(definition);
        self
    }

    /// Checks internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_shifts_per_day == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_shifts_per_day must be at least 1".into(),
            ));
        }
        if self.limits.max_shifts_per_batch == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_shifts_per_batch must be at least 1".into(),
            ));
        }
        if self.scoring.low_workload_threshold > self.scoring.high_workload_threshold {
            return Err(ConfigError::Invalid(format!(
                "scoring.low_workload_threshold ({}) exceeds high_workload_threshold ({})",
                self.scoring.low_workload_threshold, self.scoring.high_workload_threshold
            )));
        }
        if let ResolutionMode::Bounded { max_passes: 0 } = self.resolution {
            return Err(ConfigError::Invalid(
                "resolution.max_passes must be at least 1".into(),
            ));
        }
        for def in &self.shifts {
            def.window()?;
        }
        Ok(())
    }

    /// Builds the shift catalog: hospital defaults plus configured shifts.
    pub fn shift_catalog(&self) -> Result<ShiftCatalog, ConfigError> {
        self.shifts
            .iter()
            .try_fold(ShiftCatalog::hospital_default(), |catalog, def| {
                Ok(catalog.with_window(def.shift_type(), def.window()?))
            })
    }
}

/// Hard limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LimitsConfig {
    /// Maximum assignments per employee per date (history included).
    pub max_shifts_per_day: usize,

    /// Maximum new assignments per employee across one batch.
    pub max_shifts_per_batch: usize,

    /// Minimum minutes between shifts on neighbouring dates.
    /// Zero only rejects genuine cross-midnight overlaps.
    pub min_rest_minutes: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_shifts_per_day: 2,
            max_shifts_per_batch: 2,
            min_rest_minutes: 0,
        }
    }
}

/// Fitness score weights. All values are score points on the 0–100 scale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ScoringConfig {
    pub base_score: i32,
    pub primary_role_bonus: i32,
    pub secondary_role_bonus: i32,
    /// Period shift count below which the workload bonus applies.
    pub low_workload_threshold: u32,
    pub low_workload_bonus: i32,
    /// Period shift count above which the workload penalty applies.
    pub high_workload_threshold: u32,
    pub high_workload_penalty: i32,
    pub location_experience_bonus: i32,
    /// Consecutive days worked at which the fatigue penalty applies.
    pub fatigue_threshold: u32,
    pub fatigue_penalty: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 50,
            primary_role_bonus: 20,
            secondary_role_bonus: 10,
            low_workload_threshold: 10,
            low_workload_bonus: 15,
            high_workload_threshold: 20,
            high_workload_penalty: 20,
            location_experience_bonus: 10,
            fatigue_threshold: 5,
            fatigue_penalty: 10,
        }
    }
}

/// How often the backtracking resolver sweeps the batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ResolutionMode {
    /// One sweep; leftover conflicts are reported as unresolved.
    #[default]
    SinglePass,

    /// Repeat sweeps until clean or `max_passes` is reached.
    Bounded { max_passes: usize },
}

impl ResolutionMode {
    /// Maximum number of sweeps.
    pub fn max_passes(&self) -> usize {
        match self {
            ResolutionMode::SinglePass => 1,
            ResolutionMode::Bounded { max_passes } => *max_passes,
        }
    }
}

/// A shift window given as `HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShiftDefinition {
    /// Shift name; `PAGI`, `SIANG`, `MALAM` override the defaults.
    pub name: String,
    pub start: String,
    pub end: String,
}

impl ShiftDefinition {
    /// Creates a definition.
    pub fn new(name: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    /// Shift type this definition registers.
    pub fn shift_type(&self) -> ShiftType {
        match self.name.parse() {
            Ok(shift_type) => shift_type,
            Err(never) => match never {},
        }
    }

    /// Parsed window.
    pub fn window(&self) -> Result<ShiftWindow, ConfigError> {
        Ok(ShiftWindow::new(
            self.minute_of_day(&self.start)?,
            self.minute_of_day(&self.end)?,
        ))
    }

    fn minute_of_day(&self, value: &str) -> Result<u16, ConfigError> {
        let time = NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
            ConfigError::InvalidShiftTime {
                shift: self.name.clone(),
                value: value.to_string(),
            }
        })?;
        // hour < 24 and minute < 60, so the result fits in u16
        Ok((time.hour() * 60 + time.minute()) as u16)
    }
}
