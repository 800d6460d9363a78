use std::fs;
use std::io;
use std::path::Path;

use filetime::FileTime;

/// One row of the output report.
///
/// Constructed once per file that passes filtering and hashing, immutable
/// thereafter. The digest pairs carry the configured algorithms in
/// configuration order and are always complete; a file that failed to hash
/// never produces a record.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub full_path: String,
    pub filename: String,
    pub creation_time_utc: String,
    pub modification_time_utc: String,
    pub access_time_utc: String,
    /// `(algorithm, lowercase hex digest)` pairs in configuration order.
    pub digests: Vec<(String, String)>,
    /// Human-readable size string, e.g. `1.00MB`.
    pub size: String,
}

/// Snapshot of a file's metadata taken via a single stat call immediately
/// before any read.
///
/// Used both for filtering and, in preserving mode, as the target state for
/// timestamp restoration. Never mutated.
#[derive(Debug, Clone, Copy)]
pub struct OriginalMetadata {
    pub size: u64,
    pub accessed: FileTime,
    pub modified: FileTime,
    pub created: FileTime,
    pub is_file: bool,
}

impl OriginalMetadata {
    /// Capture the snapshot for `path`.
    ///
    /// Creation time falls back to the modification time on filesystems that
    /// do not record a birth time.
    pub fn capture(path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        let accessed = FileTime::from_last_access_time(&metadata);
        let modified = FileTime::from_last_modification_time(&metadata);
        let created = FileTime::from_creation_time(&metadata).unwrap_or(modified);

        Ok(OriginalMetadata {
            size: metadata.len(),
            accessed,
            modified,
            created,
            is_file: metadata.is_file(),
        })
    }
}

/// Run-level counters, updated exactly once per terminal outcome per file and
/// read only at run completion for the summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunCounters {
    /// Files that produced a report row.
    pub processed: u64,
    /// Generic hashing failures (file skipped).
    pub hashing_errors: u64,
    /// Files the OS refused to stream in this mode (file skipped).
    pub protected_skips: u64,
    /// Timestamp restorations that failed or drifted beyond tolerance.
    pub restoration_errors: u64,
}
