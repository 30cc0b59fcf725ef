//! Convert command implementation.
//!
//! Converts one security, or one trade, from a reference file into its
//! instrument definition and optionally slices it at a valuation date.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::info;

use secdef_conversion::{FixedIncomeConverterDataProvider, SecurityConverter};
use secdef_core::Date;
use secdef_ext_file::CsvTimeSeriesSource;
use secdef_instruments::{InstrumentDefinition, InstrumentDerivative};
use secdef_securities::Security;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, Context, Reference};
use crate::error::CliError;
use crate::output::{print_header, print_output, print_single, KeyValue};

/// Arguments for the convert command.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Reference data file (JSON)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Security identifier (SCHEME~VALUE)
    #[arg(short, long, required_unless_present = "trade")]
    pub id: Option<String>,

    /// Trade id; converts the trade instead of its security
    #[arg(short, long, conflicts_with = "id")]
    pub trade: Option<String>,

    /// Valuation date (YYYY-MM-DD); also prints the derivative form
    #[arg(short, long)]
    pub valuation_date: Option<String>,

    /// Historical fixings (CSV with an id,date,value header)
    #[arg(long, requires = "valuation_date")]
    pub fixings: Option<PathBuf>,
}

/// JSON output of the convert command.
#[derive(Debug, Serialize)]
struct ConvertOutput<'a> {
    security: &'a str,
    security_type: &'a str,
    definition: &'a InstrumentDefinition,
    #[serde(skip_serializing_if = "Option::is_none")]
    valuation_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    derivative: Option<&'a InstrumentDerivative>,
}

/// Execute the convert command.
pub fn execute(args: ConvertArgs, ctx: &Context) -> Result<()> {
    let reference = Reference::load(&args.data)?;
    let converter = SecurityConverter::new(reference.provider.clone(), ctx.config.clone());

    let (security, definition) = if let Some(trade_id) = &args.trade {
        let trade = reference
            .store
            .trade(trade_id)
            .ok_or_else(|| CliError::TradeNotFound(trade_id.clone()))?;
        let definition = converter.convert_trade(&trade)?;
        (trade.security, definition)
    } else {
        let security = reference.security(args.id.as_deref().unwrap_or_default())?;
        let definition = converter.convert(&security)?;
        (security, definition)
    };
    info!(security = %security, definition = %definition, "converted");

    let valuation = args.valuation_date.as_deref().map(parse_date).transpose()?;
    let derivative = match valuation {
        Some(valuation) => {
            let series = match &args.fixings {
                Some(path) => CsvTimeSeriesSource::new(path)?,
                None => CsvTimeSeriesSource::in_memory(),
            };
            let provider = FixedIncomeConverterDataProvider::new(ctx.config.clone());
            Some(provider.convert(&security, Some(&definition), valuation, &series)?)
        }
        None => None,
    };

    match ctx.format {
        OutputFormat::Json => print_single(&ConvertOutput {
            security: security.name(),
            security_type: security.security_type(),
            definition: &definition,
            valuation_date: valuation,
            derivative: derivative.as_ref(),
        }),
        OutputFormat::Table => {
            print_header(&format!("{security}"));
            print_output(&definition_rows(&security, &definition), ctx.format)?;
            if let (Some(valuation), Some(derivative)) = (valuation, &derivative) {
                print_header(&format!("Derivative at {valuation}"));
                print_output(&derivative_rows(derivative), ctx.format)?;
            }
            Ok(())
        }
    }
}

fn definition_rows(security: &Security, definition: &InstrumentDefinition) -> Vec<KeyValue> {
    let mut rows = vec![
        KeyValue::new("Security", security.name()),
        KeyValue::new("Security type", security.security_type()),
        KeyValue::new("Definition", definition.kind()),
        KeyValue::new("Currency", definition.currency().to_string()),
    ];
    match definition {
        InstrumentDefinition::Swap(swap) => {
            let (pay, receive) = swap.legs();
            rows.push(KeyValue::new("Pay leg payments", pay.len().to_string()));
            rows.push(KeyValue::new("Receive leg payments", receive.len().to_string()));
        }
        InstrumentDefinition::Annuity(annuity) => {
            rows.push(KeyValue::new("Payments", annuity.len().to_string()));
        }
        InstrumentDefinition::BondFixedSecurity(bond) => {
            rows.push(KeyValue::new("Coupons", bond.coupons.len().to_string()));
            rows.push(KeyValue::new("Maturity", bond.nominal.payment_date.to_string()));
            rows.push(KeyValue::new("Settlement days", bond.settlement_days.to_string()));
            rows.push(KeyValue::new("Issuer", bond.issuer.short_name.clone()));
        }
        InstrumentDefinition::BondFixedTransaction(transaction) => {
            rows.push(KeyValue::new("Quantity", transaction.quantity.to_string()));
            rows.push(KeyValue::new("Settlement", transaction.settlement.to_rfc3339()));
            rows.push(KeyValue::new("Price", transaction.price.to_string()));
        }
        InstrumentDefinition::BondCapitalIndexedSecurity(bond) => {
            rows.push(KeyValue::new("Coupons", bond.coupons.len().to_string()));
            rows.push(KeyValue::new("Price index", bond.price_index.name.clone()));
            rows.push(KeyValue::new("Indexation", format!("{:?}", bond.method)));
        }
        InstrumentDefinition::BillSecurity(bill) => {
            rows.push(KeyValue::new("Maturity", bill.end_date.to_string()));
        }
        InstrumentDefinition::BondFuturesSecurity(future) => {
            rows.push(KeyValue::new("Last trading", future.last_trading_date.to_string()));
            rows.push(KeyValue::new("Deliverables", future.basket.len().to_string()));
        }
        InstrumentDefinition::ForwardRateAgreement(fra) => {
            rows.push(KeyValue::new("Index", fra.index.name.clone()));
            rows.push(KeyValue::new("Fixing date", fra.fixing_date.to_string()));
            rows.push(KeyValue::new("Payment date", fra.payment_date.to_string()));
            rows.push(KeyValue::from_rate("Rate", fra.rate));
        }
        InstrumentDefinition::Cds(cds) => {
            rows.push(KeyValue::new("Premium periods", cds.premium.len().to_string()));
            rows.push(KeyValue::from_rate("Coupon", cds.coupon));
            rows.push(KeyValue::new("Reference entity", cds.reference_entity.short_name.clone()));
        }
        InstrumentDefinition::PaymentFixed(_)
        | InstrumentDefinition::BillTransaction(_)
        | InstrumentDefinition::BondCapitalIndexedTransaction(_)
        | InstrumentDefinition::BondFuturesTransaction(_) => {}
    }
    rows
}

fn derivative_rows(derivative: &InstrumentDerivative) -> Vec<KeyValue> {
    match derivative {
        InstrumentDerivative::Payment { .. } => vec![KeyValue::new("Form", "Payment")],
        InstrumentDerivative::Annuity { payments } => vec![
            KeyValue::new("Form", "Annuity"),
            KeyValue::new("Remaining payments", payments.len().to_string()),
        ],
        InstrumentDerivative::Swap { pay_leg, receive_leg } => vec![
            KeyValue::new("Form", "Swap"),
            KeyValue::new("Remaining pay payments", pay_leg.len().to_string()),
            KeyValue::new("Remaining receive payments", receive_leg.len().to_string()),
        ],
        InstrumentDerivative::Bond { coupons, settlement_time, .. } => vec![
            KeyValue::new("Form", "Bond"),
            KeyValue::new("Remaining coupons", coupons.len().to_string()),
            KeyValue::new("Settlement time", format!("{settlement_time:.6}")),
        ],
        InstrumentDerivative::Bill { end_time, .. } => vec![
            KeyValue::new("Form", "Bill"),
            KeyValue::new("Time to maturity", format!("{end_time:.6}")),
        ],
        InstrumentDerivative::BondFuture { basket, .. } => vec![
            KeyValue::new("Form", "Bond future"),
            KeyValue::new("Deliverables", basket.len().to_string()),
        ],
        InstrumentDerivative::Fra { fixing_time, .. } => vec![
            KeyValue::new("Form", "FRA"),
            KeyValue::new("Fixing time", format!("{fixing_time:.6}")),
        ],
        InstrumentDerivative::Cds { .. } => vec![KeyValue::new("Form", "CDS")],
    }
}
