//! # Secdef Conversion
//!
//! Converters from security-master records to analytics instrument
//! definitions.
//!
//! Every converter reads its reference data (conventions, holidays, regions,
//! indices, legal entities) through a
//! [`ReferenceDataProvider`](secdef_traits::ReferenceDataProvider) and
//! produces a fully-resolved [`InstrumentDefinition`](secdef_instruments::InstrumentDefinition):
//!
//! - [`InterestRateSwapSecurityConverter`]: leg-based swaps, with explicit
//!   stubs, notional schedules and compounding
//! - [`SwapSecurityConverter`]: legacy fixed/floating swaps
//! - [`BondAndBondFutureTradeConverter`]: government, corporate and
//!   inflation bonds, bills, bond futures and their trades
//! - [`ForwardRateAgreementSecurityConverter`] and
//!   [`CreditDefaultSwapSecurityConverter`]
//! - [`SecurityConverter`]: dispatch over all of the above
//!
//! [`FixedIncomeConverterDataProvider`] then slices a definition at a
//! valuation date, fetching the index fixings it needs from a
//! [`HistoricalTimeSeriesSource`](secdef_traits::HistoricalTimeSeriesSource).
//!
//! Failures are reported as [`ConversionError`]; nothing is silently
//! dropped.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod annuity_utils;
pub mod bond;
pub mod cds;
pub mod config;
pub mod converter;
pub mod derivative;
pub mod error;
pub mod fra;
pub mod index;
pub mod irs;
pub mod swap;

pub use annuity_utils::{notional_provider, parse_stubs};
pub use bond::BondAndBondFutureTradeConverter;
pub use cds::CreditDefaultSwapSecurityConverter;
pub use config::{ConversionConfig, CreditConfig};
pub use converter::SecurityConverter;
pub use derivative::FixedIncomeConverterDataProvider;
pub use error::{ConversionError, ConversionResult};
pub use fra::ForwardRateAgreementSecurityConverter;
pub use irs::InterestRateSwapSecurityConverter;
pub use swap::SwapSecurityConverter;
