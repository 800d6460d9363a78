use std::path::Path;

use crate::models::OriginalMetadata;

/// Why a located file did or did not proceed to hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Accept,
    /// Not a regular file (directory, symlink target, device node).
    NotAFile,
    /// Extension outside the configured set.
    ExtensionMismatch,
    /// Size strictly greater than the configured maximum.
    TooLarge,
}

/// Pure predicate over (path, extension, size) deciding whether a located
/// file proceeds to hashing. Rejections are routing decisions, not errors.
#[derive(Debug, Clone)]
pub struct FileFilter {
    /// Dotted, lowercase extensions, e.g. `.txt`.
    extensions: Vec<String>,
    max_file_size: u64,
}

impl FileFilter {
    pub fn new(extensions: Vec<String>, max_file_size: u64) -> Self {
        FileFilter { extensions, max_file_size }
    }

    pub fn decide(&self, path: &Path, original: &OriginalMetadata) -> FilterDecision {
        if !original.is_file {
            return FilterDecision::NotAFile;
        }

        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        if !self.extensions.iter().any(|candidate| candidate == &ext) {
            return FilterDecision::ExtensionMismatch;
        }

        // A file at exactly the limit is included.
        if original.size > self.max_file_size {
            return FilterDecision::TooLarge;
        }

        FilterDecision::Accept
    }
}
