//! # triage_hasher
//!
//! A forensic triage hashing tool written in Rust.
//!
//! ## Overview
//!
//! triage_hasher expands a list of file-path glob patterns, filters the
//! matches by extension and size, computes one or more cryptographic digests
//! per file in a single bounded-memory pass, and records file metadata plus
//! digests in a CSV report. In its metadata-preserving mode it restores each
//! file's access and modification times after hashing so that the act of
//! hashing does not itself destroy forensic evidence.
//!
//! ## Features
//!
//! - **Multi-algorithm hashing**: MD5, SHA-1 and the SHA-2 family, all
//!   computed over a single read of the file
//! - **Bounded memory**: files are streamed in configurable chunks
//! - **Access-time preservation**: same-handle restoration with a verified
//!   path-based fallback
//! - **Fault isolation**: no single file's failure aborts the run
//! - **Dual logging**: file and console sinks with independent verbosity
//!
//! ## Usage
//!
//! ```no_run
//! use std::fs::File;
//! use std::path::Path;
//!
//! use triage_hasher::config::TriageConfig;
//! use triage_hasher::pipeline::Acquisition;
//! use triage_hasher::report::CsvReport;
//!
//! # fn main() -> anyhow::Result<()> {
//! let settings = TriageConfig::from_yaml_file(Path::new("config.yaml"))?.validate()?;
//!
//! let out = File::create("hashes.csv")?;
//! let mut sink = CsvReport::new(out, settings.csv_delimiter, &settings.algorithms)?;
//!
//! let patterns = vec!["/var/log/**/*.log".to_string()];
//! let counters = Acquisition::new(&settings).run(&patterns, &mut sink)?;
//!
//! println!("hashed {} files", counters.processed);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`cli`]: Command-line interface definitions and argument parsing
//! - [`config`]: Configuration loading and validation
//! - [`models`]: Core data models and run counters
//! - [`hashing`]: Algorithm registry and the streaming hash engine
//! - [`preserve`]: Timestamp restoration and drift verification
//! - [`pipeline`]: Per-file acquisition state machine
//! - [`report`]: Report sink trait and CSV implementation
//! - [`utils`]: Size, timestamp and hostname helpers

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Configuration loading and validation
pub mod config;

/// Core data models and run counters
pub mod models;

/// Algorithm registry and the streaming hash engine
pub mod hashing;

/// Timestamp restoration and drift verification
pub mod preserve;

/// Per-file acquisition state machine
pub mod pipeline;

/// Report sink trait and CSV implementation
pub mod report;

/// Size, timestamp and hostname helpers
pub mod utils;
