//! Validate command implementation.
//!
//! Checks the stub descriptor and notional schedule of every swap leg in a
//! reference file without converting anything.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use secdef_securities::Security;

use crate::cli::OutputFormat;
use crate::commands::{Context, Reference};
use crate::error::CliError;
use crate::output::{print_error, print_output, print_success};

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Reference data file (JSON)
    #[arg(short, long)]
    pub data: PathBuf,
}

/// One validation failure.
#[derive(Debug, Serialize, Tabled)]
pub struct Problem {
    #[tabled(rename = "Security")]
    pub security: String,
    #[tabled(rename = "Leg")]
    pub leg: usize,
    #[tabled(rename = "Problem")]
    pub problem: String,
}

/// Execute the validate command.
pub fn execute(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let reference = Reference::load(&args.data)?;
    let mut checked = 0usize;
    let mut problems = Vec::new();

    for security in reference.store.securities() {
        let Security::InterestRateSwap(swap) = &security else {
            continue;
        };
        checked += 1;
        for (n, leg) in swap.legs.iter().enumerate() {
            let common = leg.common();
            let stub = match &common.stub_calculation_method {
                Some(method) => method.validate().map(|_| ()),
                None => Ok(()),
            };
            for result in [stub, common.notional.validate()] {
                if let Err(err) = result {
                    problems.push(Problem {
                        security: swap.name.clone(),
                        leg: n + 1,
                        problem: err.to_string(),
                    });
                }
            }
        }
        debug!(security = %swap.name, legs = swap.legs.len(), "validated swap");
    }

    if problems.is_empty() {
        match ctx.format {
            OutputFormat::Json => print_output(&problems, ctx.format)?,
            OutputFormat::Table => {
                print_success(&format!("{checked} swap(s) checked, no problems found"));
            }
        }
        return Ok(());
    }
    print_output(&problems, ctx.format)?;
    print_error(&format!("{} problem(s) in {checked} swap(s)", problems.len()));
    Err(CliError::Validation(problems.len()).into())
}
