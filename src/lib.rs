//! Hospital shift-assignment engine.
//!
//! Assigns employees to requested shifts (date × location × shift type ×
//! headcount × priority) for one batch at a time, honouring hard limits
//! and preferring the best-fitting staff.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Employee`, `ShiftRequest`, `Assignment`,
//!   `ShiftType`, `Location`, `Role`, `RoleLocationMatrix`, `PlanningHorizon`
//! - **`conflict`**: Hard-rule checks (daily limit, overlap, duplicate
//!   location, rest between days)
//! - **`scoring`**: Fitness scoring on a 0–100 scale with pluggable rules
//! - **`scheduler`**: Greedy assignment, backtracking repair, batch
//!   orchestration and statistics
//! - **`validation`**: Input integrity checks
//! - **`config`**: TOML-backed engine configuration
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_roster::models::*;
//! use u_roster::run_batch;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();
//! let employees = vec![
//!     Employee::new(1, "Siti", Role::Nurse)
//!         .with_shift(date, ShiftType::Pagi, Location::Icu),
//! ];
//! let requests = vec![
//!     ShiftRequest::new(date, Location::GawatDarurat, ShiftType::Malam),
//! ];
//!
//! let result = run_batch(&requests, &employees, &RoleLocationMatrix::hospital_default()).unwrap();
//! assert_eq!(result.assignments.len(), 1);
//! assert_eq!(result.stats.fulfillment_rate, 1.0);
//! ```
//!
//! # Logging
//!
//! The engine emits `tracing` events (batch summary at INFO, placements
//! and releases at DEBUG, candidate scores at TRACE) and installs no
//! subscriber.

pub mod config;
pub mod conflict;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod scoring;
pub mod validation;

pub use config::EngineConfig;
pub use error::{RosterError, RosterResult};
pub use scheduler::{run_batch, BatchOrchestrator, BatchResult};
