//! Bond-family securities: fixed and inflation bonds, bills, bond futures and FRNs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use secdef_core::calendars::BusinessDayConvention;
use secdef_core::daycounts::DayCountConvention;
use secdef_core::{Currency, Date, Frequency};

pub use secdef_core::types::YieldConvention;

use crate::error::{SecurityError, SecurityResult};
use crate::ids::{ExternalId, ExternalIdBundle};

/// Coupon types that cannot be represented as fixed-coupon bonds.
pub const EXCLUDED_COUPON_TYPES: [&str; 2] = ["TOGGLE PIK NOTES", "FLOAT_RATE_NOTE"];

/// Region code used by supranational issuers.
pub const SUPRANATIONAL_DOMICILE: &str = "SNAT";

/// Attribute names carried by inflation bonds.
pub mod attributes {
    /// Identifier of the price index security, `SCHEME~VALUE`.
    pub const REFERENCE_INDEX_ID: &str = "ReferenceIndexId";
    /// Indexation lag in months.
    pub const INFLATION_LAG: &str = "InflationLag";
    /// Index value at issue.
    pub const BASE_CPI: &str = "BaseCPI";
    /// Settlement lag in business days.
    pub const DAYS_TO_SETTLE: &str = "daysToSettle";
    /// `Monthly` or `Daily`.
    pub const INTERPOLATION_METHOD: &str = "interpolationMethod";
}

/// How an inflation bond's reference index is interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexInterpolation {
    /// Monthly index values.
    Monthly,
    /// Daily interpolation between monthly values.
    Daily,
}

impl FromStr for IndexInterpolation {
    type Err = SecurityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Monthly" => Ok(IndexInterpolation::Monthly),
            "Daily" => Ok(IndexInterpolation::Daily),
            other => Err(SecurityError::invalid_attribute(
                attributes::INTERPOLATION_METHOD,
                format!("Bond interpolation method is not valid: {other}"),
            )),
        }
    }
}

/// Fields shared by every bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondSecurity {
    /// Display name.
    pub name: String,
    /// Identifiers of the bond.
    #[serde(default)]
    pub ids: ExternalIdBundle,
    /// Issuer name.
    pub issuer_name: String,
    /// Issuer type, e.g. `SOVEREIGN`.
    #[serde(default)]
    pub issuer_type: String,
    /// Issuer domicile as a region code, e.g. `US` or `SNAT`.
    pub issuer_domicile: String,
    /// Bond currency.
    pub currency: Currency,
    /// Coupon type, e.g. `FIXED`, `ZERO COUPON`.
    pub coupon_type: String,
    /// Coupon rate in percent.
    pub coupon_rate: f64,
    /// Coupon frequency.
    pub coupon_frequency: Frequency,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Yield convention.
    #[serde(default)]
    pub yield_convention: YieldConvention,
    /// Date interest starts accruing.
    #[serde(default)]
    pub interest_accrual_date: Option<Date>,
    /// First coupon date.
    pub first_coupon_date: Date,
    /// Maturity (last trade) date.
    pub maturity_date: Date,
    /// Settlement date of the issue.
    #[serde(default)]
    pub settlement_date: Option<Date>,
    /// Free-form attributes.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl BondSecurity {
    /// Returns the attribute `name`, failing if absent.
    pub fn attribute(&self, name: &str) -> SecurityResult<&str> {
        self.attributes
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| SecurityError::missing_field(name))
    }

    /// Parses the attribute `name`.
    pub fn parse_attribute<T>(&self, name: &str) -> SecurityResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.attribute(name)?;
        raw.trim()
            .parse()
            .map_err(|e: T::Err| SecurityError::invalid_attribute(name, e.to_string()))
    }

    /// Returns true for zero-coupon bonds.
    pub fn is_zero_coupon(&self) -> bool {
        self.coupon_type == "NONE" || self.coupon_type == "ZERO COUPON"
    }

    /// Returns true if the coupon type cannot be converted to a fixed-coupon bond.
    pub fn has_excluded_coupon_type(&self) -> bool {
        EXCLUDED_COUPON_TYPES.contains(&self.coupon_type.as_str())
    }

    /// Returns true for supranational issuers.
    pub fn is_supranational(&self) -> bool {
        self.issuer_domicile == SUPRANATIONAL_DOMICILE
    }
}

/// Inflation-bond terms read from the bond attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct InflationBondTerms {
    /// Price index security identifier.
    pub reference_index_id: ExternalId,
    /// Indexation lag in months.
    pub inflation_lag: i32,
    /// Index value at issue.
    pub base_cpi: f64,
    /// Settlement lag in business days.
    pub days_to_settle: i32,
    /// Index interpolation.
    pub interpolation: IndexInterpolation,
}

impl InflationBondTerms {
    /// Reads the inflation terms of `bond`.
    pub fn from_bond(bond: &BondSecurity) -> SecurityResult<Self> {
        Ok(Self {
            reference_index_id: bond.parse_attribute(attributes::REFERENCE_INDEX_ID)?,
            inflation_lag: bond.parse_attribute(attributes::INFLATION_LAG)?,
            base_cpi: bond.parse_attribute(attributes::BASE_CPI)?,
            days_to_settle: bond.parse_attribute(attributes::DAYS_TO_SETTLE)?,
            interpolation: bond.parse_attribute(attributes::INTERPOLATION_METHOD)?,
        })
    }
}

/// A discount bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillSecurity {
    /// Display name.
    pub name: String,
    /// Identifiers of the bill.
    #[serde(default)]
    pub ids: ExternalIdBundle,
    /// Currency.
    pub currency: Currency,
    /// Maturity date.
    pub maturity_date: Date,
    /// Issue date.
    pub issue_date: Date,
    /// Minimum increment.
    #[serde(default)]
    pub minimum_increment: f64,
    /// Settlement lag in business days.
    pub days_to_settle: i32,
    /// Region whose calendar applies.
    pub region_id: ExternalId,
    /// Yield convention.
    #[serde(default = "default_bill_yield")]
    pub yield_convention: YieldConvention,
    /// Day count.
    pub day_count: DayCountConvention,
    /// Issuer.
    pub legal_entity_id: ExternalId,
}

fn default_bill_yield() -> YieldConvention {
    YieldConvention::Discount
}

/// One bond in a futures delivery basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondFutureDeliverable {
    /// Identifiers of the deliverable bond.
    pub identifiers: ExternalIdBundle,
    /// Conversion factor.
    pub conversion_factor: f64,
}

/// A bond future.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondFutureSecurity {
    /// Display name.
    pub name: String,
    /// Identifiers of the future.
    #[serde(default)]
    pub ids: ExternalIdBundle,
    /// Currency.
    pub currency: Currency,
    /// Last trading date.
    pub expiry: Date,
    /// First delivery (notice) date.
    pub first_delivery_date: Date,
    /// Last delivery (notice) date.
    pub last_delivery_date: Date,
    /// Contract notional.
    pub unit_amount: f64,
    /// Deliverable basket.
    pub basket: Vec<BondFutureDeliverable>,
}

/// A floating-rate note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingRateNoteSecurity {
    /// Display name.
    pub name: String,
    /// Identifiers of the note.
    #[serde(default)]
    pub ids: ExternalIdBundle,
    /// Currency.
    pub currency: Currency,
    /// Issue date.
    pub issue_date: Date,
    /// Maturity date.
    pub maturity_date: Date,
    /// Benchmark rate identifier.
    pub benchmark_rate_id: ExternalId,
    /// Spread over the benchmark.
    #[serde(default)]
    pub spread: f64,
    /// Coupon frequency.
    pub frequency: Frequency,
    /// Day count.
    pub day_count: DayCountConvention,
    /// Business day convention.
    #[serde(default)]
    pub business_day_convention: BusinessDayConvention,
    /// Settlement lag in business days.
    pub days_to_settle: i32,
    /// Region whose calendar applies.
    pub region_id: ExternalId,
    /// Issuer.
    pub legal_entity_id: ExternalId,
}
