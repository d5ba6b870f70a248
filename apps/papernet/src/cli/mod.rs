//! # papernet CLI Module
//!
//! This module implements the CLI interface for papernet.
//!
//! ## Available Commands
//!
//! - `serve` - Load the tables and start the HTTP server
//! - `status` - Load the tables and print their sizes
//! - `convert` - Normalize a raw export into loadable tables

mod commands;

use clap::{Args, Parser, Subcommand};
use papernet_core::PapernetError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// papernet - research-paper graph server
///
/// Serves citation and co-authorship networks, a publication timeline and a
/// patent histogram over tabular paper data.
#[derive(Parser, Debug)]
#[command(name = "papernet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Optional TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Table locations; each flag overrides the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// Directory searched for papers/citations/authorships (.parquet, then .csv)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Explicit papers table
    #[arg(long)]
    pub papers: Option<PathBuf>,

    /// Explicit citations table
    #[arg(long)]
    pub citations: Option<PathBuf>,

    /// Explicit authorships table
    #[arg(long)]
    pub authorships: Option<PathBuf>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Show loaded table sizes
    Status {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Convert a raw export into normalized tables
    Convert {
        /// Directory holding raw papers.csv, citations.csv and authors.csv
        #[arg(short, long)]
        input: PathBuf,

        /// Directory to write papers.csv, citations.csv and authorships.csv
        #[arg(short, long)]
        output: PathBuf,

        /// Field assigned to every paper
        #[arg(long, default_value = "computer science")]
        field: String,

        /// Institution assigned to every paper and to authors without one
        #[arg(long, default_value = "Northeastern University")]
        institution: String,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), PapernetError> {
    let config_path = cli.config.as_deref();
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Serve { host, port, data }) => {
            cmd_serve(config_path, host, port, &data).await
        }
        Some(Commands::Status { data }) => cmd_status(config_path, &data, json_mode),
        Some(Commands::Convert {
            input,
            output,
            field,
            institution,
        }) => cmd_convert(&input, &output, field, institution, json_mode),
        None => {
            // No subcommand - serve with configured defaults
            cmd_serve(config_path, None, None, &DataArgs::default()).await
        }
    }
}
