use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the triage hasher.
///
/// The heavy lifting lives in the configuration file; the command line only
/// points at it and at the output directory.
#[derive(Parser, Debug)]
#[clap(name = "triage-hasher", about = "DFIR triage file hashing tool")]
pub struct Args {
    /// Path to configuration YAML file
    #[clap(short = 'c', long, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Output directory for the CSV report and log file (default: current working directory)
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Subcommands
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a default configuration file
    InitConfig {
        /// Path to output configuration file
        #[clap(default_value = "config.yaml")]
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_values() {
        let args = Args::parse_from(&["triage-hasher"]);

        assert_eq!(args.config, PathBuf::from("config.yaml"));
        assert!(args.output.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_basic_args_parsing() {
        let args = Args::parse_from(&[
            "triage-hasher",
            "--config", "custom.yaml",
            "--output", "/forensic/output",
        ]);

        assert_eq!(args.config, PathBuf::from("custom.yaml"));
        assert_eq!(args.output, Some(PathBuf::from("/forensic/output")));
    }

    #[test]
    fn test_short_flags() {
        let args = Args::parse_from(&["triage-hasher", "-c", "c.yaml", "-o", "./out"]);

        assert_eq!(args.config, PathBuf::from("c.yaml"));
        assert_eq!(args.output, Some(PathBuf::from("./out")));
    }

    #[test]
    fn test_init_config_subcommand() {
        let args = Args::parse_from(&["triage-hasher", "init-config", "fresh.yaml"]);

        match args.command {
            Some(Commands::InitConfig { path }) => {
                assert_eq!(path, PathBuf::from("fresh.yaml"));
            }
            _ => panic!("Expected InitConfig command"),
        }
    }
}
