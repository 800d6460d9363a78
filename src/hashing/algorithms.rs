use anyhow::{bail, Result};
use digest::DynDigest;

/// Algorithm identifiers this build can compute.
pub const SUPPORTED_ALGORITHMS: &[&str] = &["md5", "sha1", "sha224", "sha256", "sha384", "sha512"];

/// Ordered set of lowercase algorithm identifiers, validated at startup and
/// fixed for the whole run.
///
/// The order is the configuration order; it drives both the report column
/// layout and the digest pairs on every [`crate::models::FileRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmSet {
    names: Vec<String>,
}

impl AlgorithmSet {
    /// Parse a comma-separated algorithm list, e.g. `md5,sha256`.
    ///
    /// Names are trimmed and lowercased; duplicates collapse onto their first
    /// occurrence. An unknown name is a fatal configuration error.
    pub fn parse(list: &str) -> Result<Self> {
        let mut names: Vec<String> = Vec::new();

        for raw in list.split(',') {
            let name = raw.trim().to_lowercase();
            if name.is_empty() {
                continue;
            }
            if !SUPPORTED_ALGORITHMS.contains(&name.as_str()) {
                bail!("Unsupported hash algorithm: {}", name);
            }
            if !names.contains(&name) {
                names.push(name);
            }
        }

        if names.is_empty() {
            bail!("hash_algorithms must name at least one algorithm");
        }

        Ok(AlgorithmSet { names })
    }

    /// Algorithm identifiers in configuration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// One fresh digest accumulator per algorithm, in configuration order.
    pub fn accumulators(&self) -> Vec<Box<dyn DynDigest>> {
        self.names.iter().map(|name| new_digest(name)).collect()
    }
}

fn new_digest(name: &str) -> Box<dyn DynDigest> {
    match name {
        "md5" => Box::new(md5::Md5::default()),
        "sha1" => Box::new(sha1::Sha1::default()),
        "sha224" => Box::new(sha2::Sha224::default()),
        "sha256" => Box::new(sha2::Sha256::default()),
        "sha384" => Box::new(sha2::Sha384::default()),
        "sha512" => Box::new(sha2::Sha512::default()),
        // Names are validated in AlgorithmSet::parse.
        other => unreachable!("algorithm {} passed validation", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_and_orders() {
        let set = AlgorithmSet::parse("MD5, sha256 ,sha1").unwrap();
        assert_eq!(set.names(), &["md5", "sha256", "sha1"]);
    }

    #[test]
    fn test_parse_collapses_duplicates() {
        let set = AlgorithmSet::parse("sha256,SHA256,sha256").unwrap();
        assert_eq!(set.names(), &["sha256"]);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(AlgorithmSet::parse("md5,crc32").is_err());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(AlgorithmSet::parse("").is_err());
        assert!(AlgorithmSet::parse(" , ").is_err());
    }

    #[test]
    fn test_accumulators_match_names() {
        let set = AlgorithmSet::parse("md5,sha1,sha512").unwrap();
        let accs = set.accumulators();
        assert_eq!(accs.len(), 3);
        // Output sizes confirm each accumulator is the right algorithm.
        assert_eq!(accs[0].output_size(), 16);
        assert_eq!(accs[1].output_size(), 20);
        assert_eq!(accs[2].output_size(), 64);
    }
}
