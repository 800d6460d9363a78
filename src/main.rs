use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::{ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger};

mod cli;
mod config;
mod models;
mod hashing;
mod preserve;
mod pipeline;
mod report;
mod utils;

use cli::{Args, Commands};
use config::{RunSettings, TriageConfig};
use models::RunCounters;
use pipeline::Acquisition;
use report::CsvReport;
use utils::{format_runtime, safe_hostname};

fn main() -> Result<()> {
    // Parse arguments
    let args = Args::parse();

    // Handle subcommands
    if let Some(cmd) = &args.command {
        return handle_subcommand(cmd);
    }

    print_banner();

    let start = Instant::now();
    let started_utc = chrono::Utc::now();

    // Load and validate configuration
    let config = TriageConfig::from_yaml_file(&args.config)
        .context("Missing or unreadable configuration")?;
    let settings = config.validate().context("Invalid configuration value")?;

    // Setup output locations
    let (output_dir, csv_path, log_path) = setup_output_paths(&args, &started_utc)?;

    // Initialize logging
    initialize_logging(&settings, &log_path)?;

    info!("TriageHasher v{} started", env!("CARGO_PKG_VERSION"));
    info!("Using configuration: {}", args.config.display());
    info!("Output directory: {}", output_dir.display());

    // Read file location patterns
    let patterns = read_patterns(&settings.locations_file)?;
    info!(
        "Loaded {} file patterns from {}",
        patterns.len(),
        settings.locations_file.display()
    );

    // Prepare the report sink
    let csv_file = File::create(&csv_path)
        .context(format!("Failed to open output file: {}", csv_path.display()))?;
    let mut sink = CsvReport::new(csv_file, settings.csv_delimiter, &settings.algorithms)?;

    // Run the acquisition pipeline
    let mut acquisition = Acquisition::new(&settings);
    let counters = acquisition.run(&patterns, &mut sink)?;
    sink.flush()?;

    // Final report
    log_summary(&settings, &counters, start.elapsed().as_secs());
    info!("CSV output: {}", csv_path.display());
    info!("Log file: {}", log_path.display());
    println!("Operation complete. Results saved to: {}", output_dir.display());

    Ok(())
}

fn print_banner() {
    println!(
        r#"
 _____     _                  _   _           _
|_   _| __(_) __ _  __ _  ___| | | | __ _ ___| |__   ___ _ __
  | || '__| |/ _` |/ _` |/ _ \ |_| |/ _` / __| '_ \ / _ \ '__|
  | || |  | | (_| | (_| |  __/  _  | (_| \__ \ | | |  __/ |
  |_||_|  |_|\__,_|\__, |\___|_| |_|\__,_|___/_| |_|\___|_|
                   |___/
        DFIR Forensic Hashing Tool
==================V{}====================="#,
        env!("CARGO_PKG_VERSION")
    );
    println!("Note: this tool should always be run with administrative rights.\n");
}

/// Handle subcommands (init-config)
fn handle_subcommand(cmd: &Commands) -> Result<()> {
    match cmd {
        Commands::InitConfig { path } => {
            TriageConfig::create_default_config_file(path)?;
            println!("Configuration created at {}", path.display());
            Ok(())
        }
    }
}

/// Resolve the output directory and derive the timestamped CSV/log names.
fn setup_output_paths(
    args: &Args,
    started_utc: &chrono::DateTime<chrono::Utc>,
) -> Result<(PathBuf, PathBuf, PathBuf)> {
    let output_dir = match &args.output {
        Some(path) => path.clone(),
        None => env::current_dir().context("Failed to resolve current directory")?,
    };
    fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

    let hostname = safe_hostname();
    let stamp = started_utc.format("%Y%m%d_%H%M%S").to_string();

    let csv_path = output_dir.join(format!("FileHashes_{}_{}.csv", hostname, stamp));
    let log_path = output_dir.join(format!("TriageHasherLog_{}_{}.txt", hostname, stamp));

    Ok((output_dir, csv_path, log_path))
}

/// Initialize the dual logging system (file + console) with independent
/// verbosity levels. A level of Off disables that sink entirely.
fn initialize_logging(settings: &RunSettings, log_path: &Path) -> Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if settings.log_console_level != log::LevelFilter::Off {
        loggers.push(TermLogger::new(
            settings.log_console_level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }

    if settings.log_file_level != log::LevelFilter::Off {
        let log_file = File::create(log_path)
            .context(format!("Failed to open log file: {}", log_path.display()))?;
        loggers.push(WriteLogger::new(
            settings.log_file_level,
            Config::default(),
            log_file,
        ));
    }

    if !loggers.is_empty() {
        CombinedLogger::init(loggers).context("Failed to initialize logger")?;
    }

    Ok(())
}

/// Read the newline-delimited pattern list; blank lines are ignored.
fn read_patterns(locations_file: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(locations_file).context(format!(
        "Could not read locations file: {}",
        locations_file.display()
    ))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn log_summary(settings: &RunSettings, counters: &RunCounters, elapsed_secs: u64) {
    if settings.preserve_timestamps {
        info!(
            "Processing completed in {}. Files: {}, hashing errors: {}, protected files skipped: {}, restoration errors: {}",
            format_runtime(elapsed_secs),
            counters.processed,
            counters.hashing_errors,
            counters.protected_skips,
            counters.restoration_errors,
        );
    } else {
        info!(
            "Processing completed in {}. Files: {}, hashing errors: {}, protected files skipped: {}",
            format_runtime(elapsed_secs),
            counters.processed,
            counters.hashing_errors,
            counters.protected_skips,
        );
    }
}
