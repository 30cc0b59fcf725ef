//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{ConvertArgs, StubsArgs, ValidateArgs};

/// Secdef - convert security-master records into instrument definitions
#[derive(Parser)]
#[command(name = "secdef")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Conversion settings (TOML). Defaults apply when absent.
    #[arg(short, long, global = true, env = "SECDEF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Convert a security or trade into its instrument definition
    Convert(ConvertArgs),

    /// Show the resolved start and end stubs of each swap leg
    Stubs(StubsArgs),

    /// Validate every stub descriptor and notional schedule in a file
    Validate(ValidateArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}
