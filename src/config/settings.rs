use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::{debug, info, LevelFilter};
use serde::{Deserialize, Serialize};

use crate::hashing::AlgorithmSet;
use crate::utils::{parse_size, validate_time_format};

fn default_time_format() -> String {
    "%d-%m-%Y %H:%M:%S.%f".to_string()
}

fn default_preserve_timestamps() -> bool {
    true
}

/// Raw run configuration as written in the YAML file.
///
/// Mandatory keys have no defaults; a missing key is a fatal configuration
/// error surfaced at load time. Validation into usable values happens in
/// [`TriageConfig::validate`].
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TriageConfig {
    /// Newline-delimited glob patterns to expand.
    pub locations_file: PathBuf,
    /// Comma-separated extension list, e.g. `txt,log,evtx`.
    pub extensions: String,
    /// Human-readable size limit, e.g. `100MB`.
    pub max_file_size: String,
    /// Read chunk size in bytes.
    pub chunk_size: usize,
    /// File log verbosity, 0 (off) to 4 (debug).
    pub log_file_level: u8,
    /// Console log verbosity, 0 (off) to 4 (debug).
    pub log_console_level: u8,
    /// Single-character CSV field delimiter.
    pub csv_delimiter: String,
    /// Comma-separated digest list, e.g. `md5,sha256`.
    pub hash_algorithms: String,
    /// strftime pattern for the timestamp columns.
    #[serde(default = "default_time_format")]
    pub time_format: String,
    /// Restore access/modification times after hashing.
    #[serde(default = "default_preserve_timestamps")]
    pub preserve_timestamps: bool,
}

impl Default for TriageConfig {
    fn default() -> Self {
        TriageConfig {
            locations_file: PathBuf::from("locations.txt"),
            extensions: "txt,log,csv".to_string(),
            max_file_size: "100MB".to_string(),
            chunk_size: 1024 * 1024,
            log_file_level: 3,
            log_console_level: 3,
            csv_delimiter: ",".to_string(),
            hash_algorithms: "md5,sha256".to_string(),
            time_format: default_time_format(),
            preserve_timestamps: true,
        }
    }
}

impl TriageConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: TriageConfig =
            serde_yaml::from_str(&content).context("Failed to parse YAML config")?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_yaml_file(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self).context("Failed to serialize config to YAML")?;

        fs::write(path, yaml)
            .context(format!("Failed to write config to {}", path.display()))?;

        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Write a default configuration file for the operator to edit.
    pub fn create_default_config_file(path: &Path) -> Result<()> {
        TriageConfig::default().save_to_yaml_file(path)
    }

    /// Validate every field and produce the parsed settings the run uses.
    pub fn validate(&self) -> Result<RunSettings> {
        let extensions = normalize_extensions(&self.extensions)?;
        let max_file_size = parse_size(&self.max_file_size)
            .context("Invalid max_file_size")?;

        if self.chunk_size == 0 {
            bail!("chunk_size must be greater than zero");
        }

        let log_file_level = numeric_level(self.log_file_level)
            .context("Invalid log_file_level (must be 0-4)")?;
        let log_console_level = numeric_level(self.log_console_level)
            .context("Invalid log_console_level (must be 0-4)")?;

        let csv_delimiter = match self.csv_delimiter.as_bytes() {
            [b] => *b,
            _ => bail!("csv_delimiter must be a single ASCII character"),
        };

        let algorithms = AlgorithmSet::parse(&self.hash_algorithms)?;

        // Config files escape literal newlines and tabs in the pattern.
        let time_format = self.time_format.replace("\\n", "\n").replace("\\t", "\t");
        validate_time_format(&time_format)?;

        Ok(RunSettings {
            locations_file: self.locations_file.clone(),
            extensions,
            max_file_size,
            chunk_size: self.chunk_size,
            log_file_level,
            log_console_level,
            csv_delimiter,
            algorithms,
            time_format,
            preserve_timestamps: self.preserve_timestamps,
        })
    }
}

/// Validated, parsed settings for one run. Fixed after startup.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub locations_file: PathBuf,
    /// Dotted, lowercase extensions, e.g. `.txt`.
    pub extensions: Vec<String>,
    pub max_file_size: u64,
    pub chunk_size: usize,
    pub log_file_level: LevelFilter,
    pub log_console_level: LevelFilter,
    pub csv_delimiter: u8,
    pub algorithms: AlgorithmSet,
    pub time_format: String,
    pub preserve_timestamps: bool,
}

/// Normalize a comma-separated extension list to dotted lowercase form.
fn normalize_extensions(list: &str) -> Result<Vec<String>> {
    let mut extensions: Vec<String> = Vec::new();

    for raw in list.split(',') {
        let ext = raw.trim().to_lowercase();
        if ext.is_empty() {
            continue;
        }
        let dotted = if ext.starts_with('.') { ext } else { format!(".{}", ext) };
        if !extensions.contains(&dotted) {
            extensions.push(dotted);
        }
    }

    if extensions.is_empty() {
        bail!("extensions must name at least one file extension");
    }

    Ok(extensions)
}

/// Map a 0-4 verbosity number onto a log level filter.
fn numeric_level(level: u8) -> Result<LevelFilter> {
    let filter = match level {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        other => bail!("log level {} out of range", other),
    };
    Ok(filter)
}
