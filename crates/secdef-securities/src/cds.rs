//! Credit default swaps.

use serde::{Deserialize, Serialize};

use secdef_core::calendars::BusinessDayConvention;
use secdef_core::daycounts::DayCountConvention;
use secdef_core::{Date, Frequency};

use crate::ids::{ExternalId, ExternalIdBundle};
use crate::notional::InterestRateNotional;

/// Stub placement of a CDS premium schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CdsStubType {
    /// Short stub at the front.
    #[default]
    FrontShort,
    /// Long stub at the front.
    FrontLong,
    /// Short stub at the back.
    BackShort,
    /// Long stub at the back.
    BackLong,
}

/// Debt seniority of the reference obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeniorityLevel {
    /// Senior unsecured.
    #[default]
    SeniorUnsecured,
    /// Subordinated.
    Subordinated,
    /// Senior secured.
    SeniorSecured,
}

/// Fields shared by standard and legacy CDS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdsTerms {
    /// True if the holder buys protection.
    pub buy_protection: bool,
    /// Protection buyer; a configured placeholder applies when absent.
    #[serde(default)]
    pub protection_buyer: Option<ExternalId>,
    /// Protection seller; a configured placeholder applies when absent.
    #[serde(default)]
    pub protection_seller: Option<ExternalId>,
    /// Reference entity; a configured placeholder applies when absent.
    #[serde(default)]
    pub reference_entity: Option<ExternalId>,
    /// Protection start date.
    pub start_date: Date,
    /// Maturity date.
    pub maturity_date: Date,
    /// Stub placement.
    #[serde(default)]
    pub stub_type: CdsStubType,
    /// Premium frequency.
    #[serde(default = "default_cds_frequency")]
    pub coupon_frequency: Frequency,
    /// Premium day count.
    #[serde(default = "default_cds_day_count")]
    pub day_count: DayCountConvention,
    /// Premium date adjustment.
    #[serde(default)]
    pub business_day_convention: BusinessDayConvention,
    /// Calendars for premium dates.
    #[serde(default)]
    pub calendars: Vec<ExternalId>,
    /// Notional.
    pub notional: InterestRateNotional,
    /// Premium rate (running coupon) as a decimal.
    pub coupon: f64,
    /// Whether accrued premium is paid on default.
    #[serde(default = "default_true")]
    pub include_accrued_premium: bool,
    /// Whether protection starts at the beginning of the start day.
    #[serde(default = "default_true")]
    pub protection_start: bool,
}

fn default_cds_frequency() -> Frequency {
    Frequency::Quarterly
}

fn default_cds_day_count() -> DayCountConvention {
    DayCountConvention::Act360
}

fn default_true() -> bool {
    true
}

/// A standard (IMM-dated, fixed-coupon) CDS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardCdsSecurity {
    /// Display name.
    pub name: String,
    /// Identifiers of the CDS.
    #[serde(default)]
    pub ids: ExternalIdBundle,
    /// Common terms.
    #[serde(flatten)]
    pub terms: CdsTerms,
    /// Quoted spread as a decimal.
    #[serde(default)]
    pub quoted_spread: Option<f64>,
    /// Upfront amount.
    #[serde(default)]
    pub upfront_amount: Option<InterestRateNotional>,
}

/// A legacy (par-spread) CDS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyCdsSecurity {
    /// Display name.
    pub name: String,
    /// Identifiers of the CDS.
    #[serde(default)]
    pub ids: ExternalIdBundle,
    /// Common terms.
    #[serde(flatten)]
    pub terms: CdsTerms,
    /// Trade date.
    pub trade_date: Date,
    /// Seniority of the reference obligation.
    #[serde(default)]
    pub seniority: SeniorityLevel,
    /// Fixed recovery rate, if agreed.
    #[serde(default)]
    pub fixed_recovery: Option<f64>,
    /// Fee settlement date.
    #[serde(default)]
    pub fee_settlement_date: Option<Date>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secdef_core::Currency;

    #[test]
    fn test_defaults_from_json() {
        let json = r#"{
            "name": "ACME 5Y",
            "buy_protection": true,
            "start_date": "2025-03-20",
            "maturity_date": "2030-06-20",
            "notional": { "currency": "USD", "amount": 10000000.0 },
            "coupon": 0.01
        }"#;
        let cds: StandardCdsSecurity = serde_json::from_str(json).unwrap();
        assert_eq!(cds.terms.coupon_frequency, Frequency::Quarterly);
        assert_eq!(cds.terms.day_count, DayCountConvention::Act360);
        assert_eq!(cds.terms.notional.currency, Currency::USD);
        assert!(cds.terms.include_accrued_premium);
        assert!(cds.terms.protection_buyer.is_none());
    }
}
