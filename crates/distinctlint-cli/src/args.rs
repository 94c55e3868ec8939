//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "distinctlint")]
#[command(author, version, about = "Flags SELECTs followed by DELETE ADJACENT DUPLICATES")]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check ABAP sources or unit JSON files
    Check {
        /// Files to check (supports glob patterns); `.json` files hold units
        files: Vec<PathBuf>,

        /// Configuration file (defaults to distinctlint.toml in a parent directory)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Worker threads for batch scanning
        #[arg(short, long, env = "DISTINCTLINT_JOBS")]
        jobs: Option<usize>,
    },

    /// Scan a unit JSON document and print the annotated result
    Scan {
        /// Input file; reads stdin when omitted
        input: Option<PathBuf>,

        /// Scan batch input sequentially
        #[arg(long)]
        sequential: bool,
    },

    /// Print the liveness acknowledgment
    Health,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output with source annotations
    #[default]
    Human,
    /// JSON output
    Json,
    /// SARIF output (for GitHub Code Scanning)
    Sarif,
}
