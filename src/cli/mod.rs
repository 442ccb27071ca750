//! Command-line parsing for the contract coverage auditor.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the scanning/inference code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod prompt;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "caudit", version, about = "Contract coverage auditor for Day_/Hour_ CSV archives")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Audit contract coverage for an instrument (interactive when no
    /// instrument is given).
    Check(CheckArgs),
    /// Rename `Latest` header columns to `Close` in an instrument's files.
    Headers(HeadersArgs),
    /// Delete files whose header still contains a `Latest` column.
    Purge(PurgeArgs),
    /// Rewrite a vendor CSV into the canonical Time/OHLCV schema.
    Normalize(NormalizeArgs),
}

/// Options for the coverage audit.
#[derive(Debug, Parser, Clone)]
pub struct CheckArgs {
    /// Instrument code (case-insensitive). Prompts interactively when omitted.
    #[arg(short, long)]
    pub instrument: Option<String>,

    /// Directory containing contract CSVs (default: $CONTRACT_DATA_DIR or ./data).
    #[arg(short = 'd', long)]
    pub data_dir: Option<PathBuf>,

    /// Export the audit as JSON (requires --instrument).
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

/// Options for the header-rewrite utility.
#[derive(Debug, Parser)]
pub struct HeadersArgs {
    /// Instrument code (matches the filename prefix exactly).
    #[arg(short, long)]
    pub instrument: String,

    /// Directory containing contract CSVs (default: $CONTRACT_DATA_DIR or ./data).
    #[arg(short = 'd', long)]
    pub data_dir: Option<PathBuf>,
}

/// Options for the purge utility.
#[derive(Debug, Parser)]
pub struct PurgeArgs {
    /// Directory containing contract CSVs (default: $CONTRACT_DATA_DIR or ./data).
    #[arg(short = 'd', long)]
    pub data_dir: Option<PathBuf>,

    /// Skip the typed DELETE confirmation (for scripted use).
    #[arg(long)]
    pub yes: bool,
}

/// Options for column normalization.
#[derive(Debug, Parser)]
pub struct NormalizeArgs {
    /// Vendor CSV to normalize.
    #[arg(short, long)]
    pub file: PathBuf,

    /// Output path (rewrites the input in place when omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
