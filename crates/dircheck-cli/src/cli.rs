//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// DirCheck: data quality checks for a biobank directory
#[derive(Parser)]
#[command(name = "dircheck")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the checks over a directory snapshot
    Check {
        /// Path to the directory snapshot (JSON)
        #[arg(value_name = "DIRECTORY_JSON")]
        directory: PathBuf,

        /// ORPHA to ICD-10 mapping table (CSV/TSV)
        #[arg(long, value_name = "FILE")]
        orpha_mapping: Option<PathBuf>,

        /// Configuration file (JSON)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Skip a check by name (repeatable)
        #[arg(long = "disable", value_name = "CHECK")]
        disabled: Vec<String>,

        /// Write the full report as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Classify ICD-10 codes as cancer, not cancer or unknown
    Classify {
        /// Codes or ranges (e.g. C50, D48.1, C00-C14)
        #[arg(value_name = "CODE", required = true)]
        codes: Vec<String>,

        /// Treat arguments as roman numeral chapters
        #[arg(long)]
        chapter: bool,
    },

    /// List the available checks
    ListChecks,
}
