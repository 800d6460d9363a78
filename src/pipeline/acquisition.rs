use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::config::RunSettings;
use crate::hashing::{hash_file, HashOutcome};
use crate::models::{FileRecord, OriginalMetadata, RunCounters};
use crate::pipeline::filter::{FileFilter, FilterDecision};
use crate::preserve::{access_time_drift, RestoreOutcome, TimestampGuardian, DRIFT_DIAGNOSTIC_SECS};
use crate::report::ReportSink;
use crate::utils::{format_filetime, format_size};

/// Emissions between progress log lines.
const PROGRESS_INTERVAL: u64 = 1000;

/// Per-file acquisition orchestrator.
///
/// Drives each discovered file through stat, filter, hash, optional
/// timestamp restoration and row emission. No single file's failure aborts
/// the run; only a sink write failure propagates, because once the report
/// cannot be appended to there is nothing useful left to do.
pub struct Acquisition<'a> {
    settings: &'a RunSettings,
    filter: FileFilter,
    counters: RunCounters,
}

impl<'a> Acquisition<'a> {
    pub fn new(settings: &'a RunSettings) -> Self {
        let filter = FileFilter::new(settings.extensions.clone(), settings.max_file_size);
        Acquisition { settings, filter, counters: RunCounters::default() }
    }

    /// Process every pattern sequentially, in order, and return the final
    /// counters. Rows appear in pattern order, then glob enumeration order.
    pub fn run(&mut self, patterns: &[String], sink: &mut dyn ReportSink) -> Result<RunCounters> {
        for pattern in patterns {
            info!("Processing pattern: {}", pattern);

            let matches = match glob::glob(pattern) {
                Ok(paths) => paths,
                Err(e) => {
                    warn!("Skipping invalid pattern {}: {}", pattern, e);
                    continue;
                }
            };

            for entry in matches {
                match entry {
                    Ok(path) => self.process_file(&path, sink)?,
                    Err(e) => debug!("Skipping unreadable match: {}", e),
                }
            }
        }

        Ok(self.counters)
    }

    /// One file through the full state machine.
    fn process_file(&mut self, path: &Path, sink: &mut dyn ReportSink) -> Result<()> {
        // Stat'd: single snapshot before any read.
        let original = match OriginalMetadata::capture(path) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                debug!("Metadata access failed: {} - {}", path.display(), e);
                return Ok(());
            }
        };

        // Filtered: silent routing decisions, never counted as errors.
        match self.filter.decide(path, &original) {
            FilterDecision::Accept => {}
            FilterDecision::NotAFile => return Ok(()),
            FilterDecision::ExtensionMismatch => {
                debug!("Skipping non-target extension: {}", path.display());
                return Ok(());
            }
            FilterDecision::TooLarge => {
                debug!(
                    "Skipping large file ({}): {}",
                    format_size(original.size),
                    path.display()
                );
                return Ok(());
            }
        }

        // Hashed. A row is never emitted without a complete digest set, so
        // protected files are counted and skipped like other hash failures.
        let restore_target = self.settings.preserve_timestamps.then_some(&original);
        let (digests, handle_restored) =
            match hash_file(path, &self.settings.algorithms, self.settings.chunk_size, restore_target)
            {
                HashOutcome::Hashed { digests, handle_restored } => (digests, handle_restored),
                HashOutcome::Protected => {
                    self.counters.protected_skips += 1;
                    return Ok(());
                }
                HashOutcome::Failed => {
                    self.counters.hashing_errors += 1;
                    return Ok(());
                }
            };

        // Restored: path-based fallback only when the in-handle reset missed.
        if self.settings.preserve_timestamps {
            let restored = if handle_restored {
                true
            } else {
                match TimestampGuardian::restore(path, &original) {
                    RestoreOutcome::Success => true,
                    RestoreOutcome::PermissionDenied => {
                        debug!("Permission error restoring timestamps for {}", path.display());
                        false
                    }
                    RestoreOutcome::Failed => {
                        self.counters.restoration_errors += 1;
                        false
                    }
                }
            };

            // Diagnostic re-check against the tighter tolerance; logged only,
            // never reclassified.
            if restored {
                if let Ok(drift) = access_time_drift(path, original.accessed) {
                    if drift > DRIFT_DIAGNOSTIC_SECS {
                        warn!("Timestamp drift detected: {} ({:.6}s)", path.display(), drift);
                    }
                }
            }
        }

        // Emitted.
        let record = self.build_record(path, &original, digests);
        sink.write_record(&record).context("Failed to append report row")?;
        self.counters.processed += 1;

        if self.counters.processed % PROGRESS_INTERVAL == 0 {
            info!("Processed {} files...", self.counters.processed);
        }

        Ok(())
    }

    fn build_record(
        &self,
        path: &Path,
        original: &OriginalMetadata,
        digests: Vec<(String, String)>,
    ) -> FileRecord {
        let fmt = &self.settings.time_format;
        FileRecord {
            full_path: path.display().to_string(),
            filename: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            creation_time_utc: format_filetime(original.created, fmt),
            modification_time_utc: format_filetime(original.modified, fmt),
            access_time_utc: format_filetime(original.accessed, fmt),
            digests,
            size: format_size(original.size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    use crate::hashing::AlgorithmSet;

    /// Sink that keeps rows in memory for assertions.
    #[derive(Default)]
    struct RecordingSink {
        records: Vec<FileRecord>,
    }

    impl ReportSink for RecordingSink {
        fn write_record(&mut self, record: &FileRecord) -> Result<()> {
            self.records.push(record.clone());
            Ok(())
        }
    }

    fn settings(dir: &Path, max_file_size: u64) -> RunSettings {
        RunSettings {
            locations_file: dir.join("locations.txt"),
            extensions: vec![".txt".to_string()],
            max_file_size,
            chunk_size: 4096,
            log_file_level: log::LevelFilter::Off,
            log_console_level: log::LevelFilter::Off,
            csv_delimiter: b',',
            algorithms: AlgorithmSet::parse("md5,sha256").unwrap(),
            time_format: "%Y-%m-%d %H:%M:%S".to_string(),
            preserve_timestamps: true,
        }
    }

    fn pattern_for(dir: &Path) -> Vec<String> {
        vec![dir.join("*.txt").to_string_lossy().into_owned()]
    }

    #[test]
    fn test_matching_file_emits_one_complete_row() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("hello.txt"), "hello")?;

        let settings = settings(dir.path(), 10);
        let mut sink = RecordingSink::default();
        let counters = Acquisition::new(&settings).run(&pattern_for(dir.path()), &mut sink)?;

        assert_eq!(counters.processed, 1);
        assert_eq!(counters.hashing_errors, 0);
        assert_eq!(sink.records.len(), 1);

        let record = &sink.records[0];
        assert_eq!(record.filename, "hello.txt");
        assert_eq!(record.size, "5.00B");
        assert_eq!(record.digests[0].1, "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(
            record.digests[1].1,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        Ok(())
    }

    #[test]
    fn test_oversize_file_is_filtered_not_an_error() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("big.txt"), "twenty bytes of data")?;

        let settings = settings(dir.path(), 10);
        let mut sink = RecordingSink::default();
        let counters = Acquisition::new(&settings).run(&pattern_for(dir.path()), &mut sink)?;

        assert_eq!(counters.processed, 0);
        assert_eq!(counters.hashing_errors, 0);
        assert!(sink.records.is_empty());
        Ok(())
    }

    #[test]
    fn test_exact_limit_is_included() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("edge.txt"), "0123456789")?;

        let settings = settings(dir.path(), 10);
        let mut sink = RecordingSink::default();
        let counters = Acquisition::new(&settings).run(&pattern_for(dir.path()), &mut sink)?;

        assert_eq!(counters.processed, 1);
        Ok(())
    }

    #[test]
    fn test_non_target_extension_never_appears() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("data.bin"), "x")?;
        fs::write(dir.path().join("note.txt"), "y")?;

        let settings = settings(dir.path(), 1024);
        let mut sink = RecordingSink::default();
        let patterns = vec![dir.path().join("*").to_string_lossy().into_owned()];
        let counters = Acquisition::new(&settings).run(&patterns, &mut sink)?;

        assert_eq!(counters.processed, 1);
        assert_eq!(sink.records[0].filename, "note.txt");
        Ok(())
    }

    #[test]
    fn test_empty_and_invalid_patterns_do_not_abort() -> Result<()> {
        let dir = TempDir::new()?;
        let settings = settings(dir.path(), 10);
        let mut sink = RecordingSink::default();

        let patterns = vec![
            dir.path().join("nothing/*.txt").to_string_lossy().into_owned(),
            "[".to_string(),
        ];
        let counters = Acquisition::new(&settings).run(&patterns, &mut sink)?;

        assert_eq!(counters, RunCounters::default());
        Ok(())
    }

    #[test]
    fn test_rows_follow_pattern_order() -> Result<()> {
        let dir = TempDir::new()?;
        let sub_a = dir.path().join("a");
        let sub_b = dir.path().join("b");
        fs::create_dir_all(&sub_a)?;
        fs::create_dir_all(&sub_b)?;
        fs::write(sub_a.join("one.txt"), "1")?;
        fs::write(sub_b.join("two.txt"), "2")?;

        let settings = settings(dir.path(), 10);
        let mut sink = RecordingSink::default();
        let patterns: Vec<String> = [&sub_b, &sub_a]
            .iter()
            .map(|p: &&PathBuf| p.join("*.txt").to_string_lossy().into_owned())
            .collect();
        Acquisition::new(&settings).run(&patterns, &mut sink)?;

        assert_eq!(sink.records[0].filename, "two.txt");
        assert_eq!(sink.records[1].filename, "one.txt");
        Ok(())
    }
}
