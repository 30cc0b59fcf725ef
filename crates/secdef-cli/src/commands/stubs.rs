//! Stubs command implementation.
//!
//! Shows the start and end stubs each leg of an interest rate swap resolves
//! to, including interpolation indices.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use secdef_conversion::InterestRateSwapSecurityConverter;
use secdef_instruments::CouponStub;
use secdef_securities::swap::InterestRateSwapLeg;
use secdef_securities::Security;

use crate::commands::{Context, Reference};
use crate::error::CliError;
use crate::output::print_output;

/// Arguments for the stubs command.
#[derive(Args, Debug)]
pub struct StubsArgs {
    /// Reference data file (JSON)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Swap identifier (SCHEME~VALUE)
    #[arg(short, long)]
    pub id: String,
}

/// One resolved stub.
#[derive(Debug, Serialize, Tabled)]
pub struct StubRow {
    #[tabled(rename = "Leg")]
    pub leg: String,
    #[tabled(rename = "Side")]
    pub side: &'static str,
    #[tabled(rename = "Stub")]
    pub stub_type: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Rate")]
    pub rate: String,
    #[tabled(rename = "Indices")]
    pub indices: String,
}

impl StubRow {
    fn new(leg: String, side: &'static str, stub: Option<&CouponStub>) -> Self {
        let Some(stub) = stub else {
            return Self {
                leg,
                side,
                stub_type: "-".into(),
                date: "-".into(),
                rate: "-".into(),
                indices: "-".into(),
            };
        };
        Self {
            leg,
            side,
            stub_type: format!("{:?}", stub.stub_type()),
            date: stub.effective_date().map_or_else(|| "-".into(), |d| d.to_string()),
            rate: stub.rate().map_or_else(|| "-".into(), |r| format!("{:.4}%", r * 100.0)),
            indices: stub
                .indices()
                .map_or_else(|| "-".into(), |(a, b)| format!("{} / {}", a.name, b.name)),
        }
    }
}

/// Execute the stubs command.
pub fn execute(args: StubsArgs, ctx: &Context) -> Result<()> {
    let reference = Reference::load(&args.data)?;
    let Security::InterestRateSwap(swap) = reference.security(&args.id)? else {
        return Err(CliError::NotASwap(args.id).into());
    };
    let converter = InterestRateSwapSecurityConverter::new(reference.provider.clone());

    let mut rows = Vec::with_capacity(swap.legs.len() * 2);
    for (n, leg) in swap.legs.iter().enumerate() {
        let (start, end) = converter.leg_stubs(leg)?;
        let label = leg_label(n, leg);
        rows.push(StubRow::new(label.clone(), "start", start.as_ref()));
        rows.push(StubRow::new(label, "end", end.as_ref()));
    }
    print_output(&rows, ctx.format)
}

fn leg_label(n: usize, leg: &InterestRateSwapLeg) -> String {
    let direction = if leg.is_payer() { "pay" } else { "receive" };
    let kind = if leg.is_fixed() { "fixed" } else { "floating" };
    format!("{} ({direction} {kind})", n + 1)
}
