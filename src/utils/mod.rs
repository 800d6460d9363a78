//! Utility functions for triage hashing.
//!
//! ## Components
//!
//! - **Size**: conversion between byte counts and human-readable units
//! - **Time**: UTC timestamp and runtime formatting
//! - **Host**: sanitized hostname for output file naming
//!
//! ## Common Use Cases
//!
//! ### Parsing a size limit
//!
//! ```
//! use triage_hasher::utils::size::parse_size;
//!
//! # fn example() -> anyhow::Result<()> {
//! let limit = parse_size("100MB")?;
//! assert_eq!(limit, 104_857_600);
//! # Ok(())
//! # }
//! ```
//!
//! ### Formatting a timestamp
//!
//! ```
//! use triage_hasher::utils::time::format_timestamp;
//!
//! let s = format_timestamp(0, 0, "%Y-%m-%d %H:%M:%S");
//! assert_eq!(s, "1970-01-01 00:00:00");
//! ```

/// Human-readable size parsing and formatting
pub mod size;

/// UTC timestamp and runtime formatting
pub mod time;

/// Sanitized hostname lookup
pub mod host;

pub use host::safe_hostname;
pub use size::{format_size, parse_size};
pub use time::{format_filetime, format_runtime, format_timestamp, validate_time_format};
