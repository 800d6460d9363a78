use anyhow::{bail, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use filetime::FileTime;

/// Convert an epoch timestamp to UTC and format it with the given pattern.
///
/// The pattern uses strftime semantics; it must have passed
/// [`validate_time_format`] at startup, so formatting cannot fail here.
pub fn format_timestamp(secs: i64, nanos: u32, pattern: &str) -> String {
    let dt = DateTime::<Utc>::from_timestamp(secs, nanos).unwrap_or(DateTime::UNIX_EPOCH);
    dt.format(pattern).to_string()
}

/// Format a [`FileTime`] snapshot value through the configured pattern.
pub fn format_filetime(ft: FileTime, pattern: &str) -> String {
    format_timestamp(ft.unix_seconds(), ft.nanoseconds(), pattern)
}

/// Check a strftime pattern for unknown specifiers.
///
/// chrono only reports bad specifiers when the formatted value is rendered,
/// which would turn a configuration mistake into a per-row failure; rejecting
/// the pattern up front keeps it a fatal config error instead.
pub fn validate_time_format(pattern: &str) -> Result<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        bail!("Invalid time_format pattern: '{}'", pattern);
    }
    Ok(())
}

/// Format an elapsed runtime into a human-readable string.
pub fn format_runtime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds_remainder = seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds_remainder)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds_remainder)
    } else {
        format!("{}s", seconds_remainder)
    }
}
