//! Shift types and their time-of-day windows.
//!
//! A shift type names a recurring block of working time (PAGI, SIANG,
//! MALAM). The [`ShiftCatalog`] resolves each type to a [`ShiftWindow`]
//! expressed in minutes since midnight.
//!
//! # Time Model
//! Windows are half-open: `[start, end)`. A window whose end is at or
//! before its start crosses midnight; comparisons then add 1440 minutes
//! to that window's end. Each window normalizes its own end, so two
//! overnight windows compare symmetrically.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// A named shift.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShiftType {
    /// Morning shift (default 06:00–14:00).
    Pagi,
    /// Afternoon shift (default 14:00–22:00).
    Siang,
    /// Night shift (default 22:00–06:00, crosses midnight).
    Malam,
    /// Site-specific shift; must be registered in the catalog to be requested.
    Custom(String),
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftType::Pagi => f.write_str("PAGI"),
            ShiftType::Siang => f.write_str("SIANG"),
            ShiftType::Malam => f.write_str("MALAM"),
            ShiftType::Custom(name) => f.write_str(name),
        }
    }
}

impl FromStr for ShiftType {
    type Err = std::convert::Infallible;

    /// Parses a shift name case-insensitively. Unrecognized names become
    /// an uppercase [`ShiftType::Custom`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_uppercase();
        Ok(match name.as_str() {
            "PAGI" => ShiftType::Pagi,
            "SIANG" => ShiftType::Siang,
            "MALAM" => ShiftType::Malam,
            _ => ShiftType::Custom(name),
        })
    }
}

/// A time-of-day window `[start, end)` in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    /// Start minute of day (0..1440).
    pub start_min: u16,
    /// End minute of day (0..1440). `end <= start` means the window wraps.
    pub end_min: u16,
}

impl ShiftWindow {
    /// Fallback for shift types the catalog does not know: 00:00–23:59.
    ///
    /// This window overlaps every other shift of the same day, so an
    /// unknown type silently blocks the employee for that date.
    pub const FULL_DAY: ShiftWindow = ShiftWindow {
        start_min: 0,
        end_min: MINUTES_PER_DAY - 1,
    };

    /// Creates a window from minute offsets.
    pub fn new(start_min: u16, end_min: u16) -> Self {
        Self { start_min, end_min }
    }

    /// Creates a window from hour/minute pairs.
    pub fn from_hm(start: (u16, u16), end: (u16, u16)) -> Self {
        Self::new(start.0 * 60 + start.1, end.0 * 60 + end.1)
    }

    /// Whether the window runs past midnight into the next day.
    #[inline]
    pub fn crosses_midnight(&self) -> bool {
        self.end_min <= self.start_min
    }

    /// End minute with the midnight wrap applied.
    #[inline]
    pub fn normalized_end(&self) -> u32 {
        if self.crosses_midnight() {
            u32::from(self.end_min) + u32::from(MINUTES_PER_DAY)
        } else {
            u32::from(self.end_min)
        }
    }

    /// Length of the window in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.normalized_end() - u32::from(self.start_min)
    }

    /// Whether two same-day windows overlap.
    ///
    /// Windows that only share a boundary (one ends at 14:00, the other
    /// starts at 14:00) do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        u32::from(self.start_min) < other.normalized_end()
            && u32::from(other.start_min) < self.normalized_end()
    }

    /// Absolute `[start, end)` in minutes, with day 0 as the reference day.
    pub fn absolute(&self, day_offset: i64) -> (i64, i64) {
        let base = day_offset * i64::from(MINUTES_PER_DAY);
        (
            base + i64::from(self.start_min),
            base + i64::from(self.normalized_end()),
        )
    }
}

impl fmt::Display for ShiftWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start_min / 60,
            self.start_min % 60,
            self.end_min / 60,
            self.end_min % 60
        )
    }
}

/// Immutable lookup table from shift type to its window.
///
/// Built once (from defaults or configuration) and shared by every
/// component that needs to reason about time.
#[derive(Debug, Clone)]
pub struct ShiftCatalog {
    windows: HashMap<ShiftType, ShiftWindow>,
}

impl ShiftCatalog {
    /// Creates an empty catalog. Every lookup falls back to the full day.
    pub fn empty() -> Self {
        Self {
            windows: HashMap::new(),
        }
    }

    /// The hospital's standard three-shift rotation.
    pub fn hospital_default() -> Self {
        Self::empty()
            .with_window(ShiftType::Pagi, ShiftWindow::from_hm((6, 0), (14, 0)))
            .with_window(ShiftType::Siang, ShiftWindow::from_hm((14, 0), (22, 0)))
            .with_window(ShiftType::Malam, ShiftWindow::from_hm((22, 0), (6, 0)))
    }

    /// Registers (or replaces) a window.
    pub fn with_window(mut self, shift_type: ShiftType, window: ShiftWindow) -> Self {
        self.windows.insert(shift_type, window);
        self
    }

    /// Whether the shift type has a registered window.
    pub fn contains(&self, shift_type: &ShiftType) -> bool {
        self.windows.contains_key(shift_type)
    }

    /// Registered window, if any.
    pub fn get(&self, shift_type: &ShiftType) -> Option<ShiftWindow> {
        self.windows.get(shift_type).copied()
    }

    /// Resolves a shift type to its window, falling back to
    /// [`ShiftWindow::FULL_DAY`] for unknown types.
    pub fn resolve(&self, shift_type: &ShiftType) -> ShiftWindow {
        match self.windows.get(shift_type) {
            Some(window) => *window,
            None => {
                warn!(%shift_type, "unknown shift type, using full-day window");
                ShiftWindow::FULL_DAY
            }
        }
    }

    /// Number of registered shift types.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether no shift types are registered.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl Default for ShiftCatalog {
    fn default() -> Self {
        Self::hospital_default()
    }
}
