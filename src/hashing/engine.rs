use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::Path;

use log::{debug, error, warn};

use crate::hashing::algorithms::AlgorithmSet;
use crate::models::OriginalMetadata;

/// Terminal result of a single hashing attempt.
#[derive(Debug)]
pub enum HashOutcome {
    /// Every configured digest was computed over the full byte stream.
    Hashed {
        /// `(algorithm, lowercase hex digest)` pairs in configuration order.
        digests: Vec<(String, String)>,
        /// Whether the same-handle timestamp reset succeeded. Always false
        /// when no restore target was supplied.
        handle_restored: bool,
    },
    /// The OS refused to stream the file in this mode.
    Protected,
    /// Any other open or read failure.
    Failed,
}

/// Stream a file through one digest accumulator per configured algorithm.
///
/// The file is read in `chunk_size`-byte chunks (the last chunk may be
/// shorter) and every chunk is fed to every accumulator in the same order, so
/// all digests are computed over an identical, gapless view of the content
/// regardless of algorithm count or chunk size.
///
/// When `restore_target` is supplied, the engine resets the handle's access
/// and modification times to the snapshot after the read loop, while the
/// handle is still open. OS support for this primitive is optional; its
/// absence is recorded in the outcome, not treated as an error.
pub fn hash_file(
    path: &Path,
    algorithms: &AlgorithmSet,
    chunk_size: usize,
    restore_target: Option<&OriginalMetadata>,
) -> HashOutcome {
    debug!("Trying to hash file: {}", path.display());

    // All accumulators exist before the first byte is read.
    let mut accumulators = algorithms.accumulators();

    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) => return classify_failure(path, &e),
    };

    let mut buffer = vec![0u8; chunk_size];
    loop {
        match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                for acc in accumulators.iter_mut() {
                    acc.update(&buffer[..n]);
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return classify_failure(path, &e),
        }
    }

    let mut handle_restored = false;
    if let Some(original) = restore_target {
        handle_restored =
            filetime::set_file_handle_times(&file, Some(original.accessed), Some(original.modified))
                .is_ok();
        if !handle_restored {
            debug!(
                "In-handle timestamp reset unavailable for {}, falling back to path restore",
                path.display()
            );
        }
    }

    let digests = algorithms
        .names()
        .iter()
        .cloned()
        .zip(accumulators.into_iter().map(|acc| hex::encode(acc.finalize())))
        .collect();

    HashOutcome::Hashed { digests, handle_restored }
}

/// Classify an open/read failure at the call site, by error kind rather than
/// by message text. `InvalidInput` is what restricted or locked files surface
/// as when opened for streaming reads.
fn classify_failure(path: &Path, err: &io::Error) -> HashOutcome {
    if err.kind() == ErrorKind::InvalidInput {
        warn!("Failed to hash a protected file: {}", path.display());
        HashOutcome::Protected
    } else {
        error!("Hashing failed for {}: {}", path.display(), err);
        HashOutcome::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn digests_for(path: &Path, algorithms: &str, chunk_size: usize) -> Vec<(String, String)> {
        let set = AlgorithmSet::parse(algorithms).unwrap();
        match hash_file(path, &set, chunk_size, None) {
            HashOutcome::Hashed { digests, .. } => digests,
            other => panic!("expected digests, got {:?}", other),
        }
    }

    #[test]
    fn test_known_vectors() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("hello.txt");
        fs::write(&path, "hello")?;

        let digests = digests_for(&path, "md5,sha256", 4096);
        assert_eq!(digests[0].0, "md5");
        assert_eq!(digests[0].1, "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(digests[1].0, "sha256");
        assert_eq!(
            digests[1].1,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        Ok(())
    }

    #[test]
    fn test_empty_file() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("empty.bin");
        fs::write(&path, "")?;

        let digests = digests_for(&path, "md5", 1024);
        assert_eq!(digests[0].1, "d41d8cd98f00b204e9800998ecf8427e");
        Ok(())
    }

    #[test]
    fn test_chunk_size_does_not_change_digests() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("data.bin");
        let content: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&path, &content)?;

        let reference = digests_for(&path, "md5,sha1,sha256", 4096);
        for chunk_size in [1, 7, 1024, 65_536] {
            assert_eq!(digests_for(&path, "md5,sha1,sha256", chunk_size), reference);
        }
        Ok(())
    }

    #[test]
    fn test_missing_file_is_generic_failure() {
        let dir = TempDir::new().unwrap();
        let set = AlgorithmSet::parse("sha256").unwrap();
        let outcome = hash_file(&dir.path().join("absent.txt"), &set, 1024, None);
        assert!(matches!(outcome, HashOutcome::Failed));
    }

    #[test]
    fn test_invalid_input_classifies_as_protected() {
        let path = Path::new("/locked/system.dat");
        let err = io::Error::from(ErrorKind::InvalidInput);
        assert!(matches!(classify_failure(path, &err), HashOutcome::Protected));
    }

    #[test]
    fn test_other_error_kinds_classify_as_generic_failure() {
        let path = Path::new("/somewhere/file.dat");
        for kind in [ErrorKind::NotFound, ErrorKind::PermissionDenied, ErrorKind::Other] {
            let err = io::Error::from(kind);
            assert!(matches!(classify_failure(path, &err), HashOutcome::Failed));
        }
    }

    #[test]
    fn test_handle_restore_preserves_snapshot_times() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("evidence.txt");
        fs::write(&path, "payload")?;

        // Age the file, then hash with a restore target.
        let old = filetime::FileTime::from_unix_time(1_500_000_000, 0);
        filetime::set_file_times(&path, old, old)?;
        let original = OriginalMetadata::capture(&path)?;

        let set = AlgorithmSet::parse("sha256").unwrap();
        let outcome = hash_file(&path, &set, 1024, Some(&original));
        let handle_restored = match outcome {
            HashOutcome::Hashed { handle_restored, .. } => handle_restored,
            other => panic!("expected digests, got {:?}", other),
        };

        if handle_restored {
            let after = OriginalMetadata::capture(&path)?;
            assert_eq!(after.accessed.unix_seconds(), original.accessed.unix_seconds());
        }
        Ok(())
    }
}
