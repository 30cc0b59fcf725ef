//! # Secdef Instruments
//!
//! Analytics-ready instrument definitions.
//!
//! Definitions are plain, fully-resolved values: every date is adjusted,
//! every index carries its conventions, and calendars are referenced by
//! name. They are produced by the converters in `secdef-conversion` and
//! consumed by pricing code, usually after slicing at a valuation date with
//! [`InstrumentDefinition::to_derivative`].
//!
//! - **Indices**: [`IborIndex`], [`IndexON`], [`IndexPrice`]
//! - **Payments**: fixed payments and fixed, IBOR, compounded, interpolated
//!   and overnight coupons
//! - **Annuities and swaps**: legs built with the [`builders`], classified
//!   into [`SwapDefinition`] variants
//! - **Bonds**: fixed and inflation bonds, bills, bond futures and their
//!   transactions
//! - **FRAs and CDS**
//!
//! ## Example
//!
//! ```rust
//! use secdef_core::{Currency, Date, Tenor};
//! use secdef_core::daycounts::DayCountConvention;
//! use secdef_instruments::builders::FixedAnnuityDefinitionBuilder;
//! use secdef_instruments::NotionalProvider;
//!
//! let leg = FixedAnnuityDefinitionBuilder::new()
//!     .payer(true)
//!     .currency(Currency::USD)
//!     .start_date(Date::from_ymd(2025, 1, 15).unwrap())
//!     .end_date(Date::from_ymd(2027, 1, 15).unwrap())
//!     .day_count(DayCountConvention::Thirty360US)
//!     .accrual_period_frequency(Tenor::Months(6))
//!     .notional(NotionalProvider::constant(1_000_000.0))
//!     .rate(0.04)
//!     .build()
//!     .unwrap();
//! assert_eq!(leg.len(), 4);
//! assert!(leg.all_fixed());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::large_enum_variant)]

pub mod annuity;
pub mod bond;
pub mod builders;
pub mod cds;
pub mod definition;
pub mod derivative;
pub mod error;
pub mod fra;
pub mod index;
pub mod notional;
pub mod payment;
pub mod schedule;
pub mod stub;
pub mod swap;

pub use annuity::AnnuityDefinition;
pub use bond::{
    BillSecurityDefinition, BillTransactionDefinition, BondCapitalIndexedSecurityDefinition,
    BondCapitalIndexedTransactionDefinition, BondFixedSecurityDefinition,
    BondFixedTransactionDefinition, BondFuturesSecurityDefinition,
    BondFuturesTransactionDefinition, LegalEntity,
};
pub use cds::CdsDefinition;
pub use definition::InstrumentDefinition;
pub use derivative::{InstrumentDerivative, PaymentDerivative};
pub use error::{InstrumentError, InstrumentResult};
pub use fra::ForwardRateAgreementDefinition;
pub use index::{IborIndex, Index, IndexON, IndexPrice};
pub use notional::NotionalProvider;
pub use payment::{IborCompoundingMethod, Payment};
pub use stub::CouponStub;
pub use swap::SwapDefinition;
