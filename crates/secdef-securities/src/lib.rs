//! # Secdef Securities
//!
//! The security-master model consumed by the converters.
//!
//! - **Identifiers**: [`ExternalId`] and [`ExternalIdBundle`]
//! - **Securities**: the closed [`Security`] enum (swaps, bonds, bills,
//!   bond futures, FRAs, CDS and index securities)
//! - **Swap legs**: notional schedules and stub descriptors
//! - **Conventions**: per-market [`Convention`]s and name-keyed
//!   [`ConventionBundle`]s
//! - **Reference records**: regions, holidays, legal entities, historical
//!   series
//! - **Trades**: [`Trade`]
//!
//! ## Example
//!
//! ```rust
//! use secdef_securities::prelude::*;
//!
//! let stub = StubCalculationMethod::new(StubType::ShortStart);
//! assert!(stub.validate().is_ok());
//! assert!(!stub.has_first_stub_rate());
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
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod bond;
pub mod cds;
pub mod convention;
pub mod error;
pub mod fra;
pub mod ids;
pub mod index;
pub mod notional;
pub mod reference;
pub mod security;
pub mod stub;
pub mod swap;
pub mod trade;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bond::{
        BillSecurity, BondFutureDeliverable, BondFutureSecurity, BondSecurity,
        FloatingRateNoteSecurity, InflationBondTerms, YieldConvention,
    };
    pub use crate::cds::{CdsTerms, LegacyCdsSecurity, StandardCdsSecurity};
    pub use crate::convention::{
        Convention, ConventionBundle, IborIndexConvention, OvernightIndexConvention,
        SwapFixedLegConvention, VanillaIborLegConvention,
    };
    pub use crate::error::{SecurityError, SecurityResult};
    pub use crate::fra::ForwardRateAgreementSecurity;
    pub use crate::ids::{ExternalId, ExternalIdBundle};
    pub use crate::index::{IborIndexSecurity, OvernightIndexSecurity, PriceIndexSecurity};
    pub use crate::notional::{InterestRateNotional, InterestRateSwapNotional, NotionalShiftType};
    pub use crate::reference::{HistoricalTimeSeries, Holiday, LegalEntity, Region};
    pub use crate::security::Security;
    pub use crate::stub::{StubCalculationMethod, StubType};
    pub use crate::swap::{
        FloatingInterestRateSwapLeg, FixedInterestRateSwapLeg, FloatingRateType,
        InterestRateSwapLeg, InterestRateSwapSecurity, PayReceiveType, SwapLeg, SwapSecurity,
    };
    pub use crate::trade::Trade;
}

pub use convention::{Convention, ConventionBundle};
pub use error::{SecurityError, SecurityResult};
pub use ids::{ExternalId, ExternalIdBundle};
pub use security::Security;
pub use trade::Trade;
