//! Per-file acquisition pipeline.
//!
//! [`filter`] is the pure accept/reject predicate; [`acquisition`] owns the
//! per-file state machine (stat, filter, hash, restore, emit), the pattern
//! loop and the run counters.

/// Extension and size filtering
pub mod filter;

/// Orchestration, pattern expansion and counters
pub mod acquisition;

pub use acquisition::Acquisition;
pub use filter::{FileFilter, FilterDecision};
