//! Batch assignment pipeline.
//!
//! Turns a list of shift requests and an employee pool into final
//! assignments.
//!
//! # Pipeline
//!
//! ```text
//! requests ─▶ GreedyAssigner ─▶ tentative ledger ─▶ ConflictResolver ─▶ BatchResult
//!                  ▲                                      │
//!                  └──────── FitnessScorer ◀──────────────┘
//! ```
//!
//! `BatchOrchestrator` wires the stages together and owns the
//! `Pending → Assigning → Resolved` lifecycle. `BatchStats` summarizes
//! the outcome.
//!
//! The greedy pass is fast and deterministic but not optimal; the
//! resolver only repairs what the greedy pass could not see (the
//! per-batch cap, conflicts between tentative placements).

mod batch;
mod greedy;
mod resolver;
mod stats;

pub use batch::{run_batch, BatchOrchestrator, BatchResult, BatchState};
pub use greedy::{GreedyAssigner, GreedyOutcome, RankedCandidate, Unfulfilled};
pub use resolver::{ConflictResolver, ReleaseReason, Released, Resolution};
pub use stats::{BatchStats, PriorityFulfillment};
