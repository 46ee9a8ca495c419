//! # edi-cli
//!
//! Command-line driver for the EDIFACT core.
//!
//! Every command writes JSON to stdout and logs to stderr, so the output
//! can be piped straight into other tools.

mod commands;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "edi")]
#[command(about = "Tokenize, validate and explain EDIFACT interchanges")]
#[command(version)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize a file into segments, elements and components
    Parse {
        /// Input file path
        input: PathBuf,
    },

    /// Check header/trailer structure; exits non-zero on any error
    Validate {
        /// Input file path
        input: PathBuf,

        /// Message type the UNH must carry (e.g. ORDERS)
        #[arg(short, long)]
        message_type: Option<String>,
    },

    /// Tokenize, validate and label every component
    Explain {
        /// Input file path
        input: PathBuf,

        /// Mapping table (.json, .yaml or .yml)
        #[arg(short, long)]
        table: Option<PathBuf>,

        /// Message type the UNH must carry (e.g. ORDERS)
        #[arg(short, long)]
        message_type: Option<String>,
    },

    /// Replay sample files and their mutations; exits non-zero on failure
    Conformance {
        /// Sample file paths
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Mapping table (.json, .yaml or .yml)
        #[arg(short, long)]
        table: Option<PathBuf>,

        /// Message type the UNH must carry (e.g. ORDERS)
        #[arg(short, long)]
        message_type: Option<String>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    match cli.command {
        Commands::Parse { input } => commands::parse(&input, cli.pretty),
        Commands::Validate {
            input,
            message_type,
        } => {
            config.override_message_type(message_type);
            commands::validate(&input, &config.validation, cli.pretty)
        }
        Commands::Explain {
            input,
            table,
            message_type,
        } => {
            config.override_message_type(message_type);
            config.override_mapping_table(table);
            commands::explain(&input, &config, cli.pretty)
        }
        Commands::Conformance {
            files,
            table,
            message_type,
        } => {
            config.override_message_type(message_type);
            config.override_mapping_table(table);
            commands::conformance(&files, &config, cli.pretty)
        }
    }
}
