//! Multi-algorithm streaming file hashing.
//!
//! [`algorithms`] holds the validated, ordered algorithm set and constructs
//! one digest accumulator per configured algorithm. [`engine`] streams file
//! bytes through all accumulators in a single bounded-memory pass and
//! classifies failures.

/// Validated, ordered algorithm identifiers and the digest registry
pub mod algorithms;

/// Chunked single-pass hash engine
pub mod engine;

pub use algorithms::AlgorithmSet;
pub use engine::{hash_file, HashOutcome};
