//! Desired-state reconciliation
//!
//! - **engine**: lookup, compare and the single mutating call per pass
//! - **report**: the outcome of one pass, serialisable for callers

mod engine;
mod report;

pub use engine::{ReconcileOptions, Reconciler};
pub use report::{Action, DeleteOutcome, LifecycleState, ReconcileReport};
