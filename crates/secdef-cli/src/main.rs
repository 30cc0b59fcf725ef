//! Secdef CLI - convert security-master records into instrument definitions.
//!
//! # Usage
//!
//! ```bash
//! # Convert a security
//! secdef convert --data reference.json --id ISIN~US91282CMM00
//!
//! # Convert a trade and slice it at a valuation date
//! secdef convert --data reference.json --trade T1 --valuation-date 2025-06-02 --fixings fixings.csv
//!
//! # Show the stubs of each swap leg
//! secdef stubs --data reference.json --id SECDEF~IRS1
//!
//! # Check every stub descriptor and notional schedule
//! secdef validate --data reference.json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output stays parseable
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,secdef=debug"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = Context::load(cli.format, cli.config.as_deref())?;

    match cli.command {
        Commands::Convert(args) => commands::convert::execute(args, &ctx)?,
        Commands::Stubs(args) => commands::stubs::execute(args, &ctx)?,
        Commands::Validate(args) => commands::validate::execute(args, &ctx)?,
    }

    Ok(())
}
