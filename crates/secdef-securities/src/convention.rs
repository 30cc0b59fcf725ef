//! Market conventions and convention bundles.
//!
//! A [`Convention`] describes how one kind of index or leg behaves in a
//! market (day count, settlement lag, calendars). Converters look them up by
//! identifier and combine them with the fields of a security.
//!
//! [`ConventionBundle`] is the older, name-keyed form still used for bonds.

use serde::{Deserialize, Serialize};

use secdef_core::calendars::BusinessDayConvention;
use secdef_core::daycounts::DayCountConvention;
use secdef_core::{Currency, Date, Tenor};

use crate::ids::{ExternalId, ExternalIdBundle};
use crate::stub::StubType;

/// Conventions of a term IBOR index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IborIndexConvention {
    /// Convention name.
    pub name: String,
    /// Identifiers of the convention.
    #[serde(default)]
    pub ids: ExternalIdBundle,
    /// Index currency.
    pub currency: Currency,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Business day convention of the index period.
    pub business_day_convention: BusinessDayConvention,
    /// Spot lag in business days.
    pub settlement_days: i32,
    /// End-of-month rule.
    #[serde(default)]
    pub is_eom: bool,
    /// Fixing calendar.
    pub fixing_calendar: ExternalId,
    /// Region calendar.
    pub region_calendar: ExternalId,
    /// Fixing page, e.g. `BBA`.
    #[serde(default)]
    pub fixing_page: Option<String>,
}

/// Conventions of an overnight index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvernightIndexConvention {
    /// Convention name.
    pub name: String,
    /// Identifiers of the convention.
    #[serde(default)]
    pub ids: ExternalIdBundle,
    /// Index currency.
    pub currency: Currency,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Days between the fixing date and its publication.
    #[serde(default)]
    pub publication_lag: i32,
    /// Region calendar.
    pub region_calendar: ExternalId,
}

/// Conventions of an IBOR swap leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VanillaIborLegConvention {
    /// Convention name.
    pub name: String,
    /// Identifiers of the convention.
    #[serde(default)]
    pub ids: ExternalIdBundle,
    /// Identifier of the underlying [`IborIndexConvention`].
    pub ibor_index_convention: ExternalId,
    /// Whether fixings are taken in advance.
    #[serde(default = "default_true")]
    pub is_advance_fixing: bool,
    /// Whether stubs interpolate between indices.
    #[serde(default)]
    pub interpolated: bool,
    /// Reset tenor of the leg (the index tenor).
    pub reset_tenor: Tenor,
    /// Settlement lag in business days.
    #[serde(default)]
    pub settlement_days: i32,
    /// End-of-month rule.
    #[serde(default)]
    pub is_eom: bool,
    /// Stub placement.
    #[serde(default)]
    pub stub_type: StubType,
    /// Whether notionals are exchanged.
    #[serde(default)]
    pub exchange_notional: bool,
    /// Payment lag in business days.
    #[serde(default)]
    pub payment_lag: i32,
}

/// Conventions of a fixed swap leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapFixedLegConvention {
    /// Convention name.
    pub name: String,
    /// Identifiers of the convention.
    #[serde(default)]
    pub ids: ExternalIdBundle,
    /// Payment tenor.
    pub payment_tenor: Tenor,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Business day convention.
    pub business_day_convention: BusinessDayConvention,
    /// Leg currency.
    pub currency: Currency,
    /// Region calendar.
    pub region_calendar: ExternalId,
    /// Settlement lag in business days.
    #[serde(default)]
    pub settlement_days: i32,
    /// End-of-month rule.
    #[serde(default)]
    pub is_eom: bool,
    /// Stub placement.
    #[serde(default)]
    pub stub_type: StubType,
    /// Payment lag in business days.
    #[serde(default)]
    pub payment_lag: i32,
}

/// Conventions of a compounded overnight swap leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OisLegConvention {
    /// Convention name.
    pub name: String,
    /// Identifiers of the convention.
    #[serde(default)]
    pub ids: ExternalIdBundle,
    /// Identifier of the underlying [`OvernightIndexConvention`].
    pub overnight_index_convention: ExternalId,
    /// Payment tenor.
    pub payment_tenor: Tenor,
    /// Business day convention.
    pub business_day_convention: BusinessDayConvention,
    /// Payment lag in business days.
    #[serde(default)]
    pub payment_lag: i32,
    /// End-of-month rule.
    #[serde(default)]
    pub is_eom: bool,
    /// Settlement lag in business days.
    #[serde(default)]
    pub settlement_days: i32,
}

fn default_true() -> bool {
    true
}

/// A market convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Convention {
    /// IBOR index conventions.
    IborIndex(IborIndexConvention),
    /// Overnight index conventions.
    OvernightIndex(OvernightIndexConvention),
    /// IBOR swap leg conventions.
    VanillaIborLeg(VanillaIborLegConvention),
    /// Fixed swap leg conventions.
    SwapFixedLeg(SwapFixedLegConvention),
    /// Overnight swap leg conventions.
    OisLeg(OisLegConvention),
}

impl Convention {
    /// Returns the convention name.
    pub fn name(&self) -> &str {
        match self {
            Convention::IborIndex(c) => &c.name,
            Convention::OvernightIndex(c) => &c.name,
            Convention::VanillaIborLeg(c) => &c.name,
            Convention::SwapFixedLeg(c) => &c.name,
            Convention::OisLeg(c) => &c.name,
        }
    }

    /// Returns the identifiers of the convention.
    pub fn ids(&self) -> &ExternalIdBundle {
        match self {
            Convention::IborIndex(c) => &c.ids,
            Convention::OvernightIndex(c) => &c.ids,
            Convention::VanillaIborLeg(c) => &c.ids,
            Convention::SwapFixedLeg(c) => &c.ids,
            Convention::OisLeg(c) => &c.ids,
        }
    }

    /// Returns a short label for the convention type.
    pub fn kind(&self) -> &'static str {
        match self {
            Convention::IborIndex(_) => "IborIndexConvention",
            Convention::OvernightIndex(_) => "OvernightIndexConvention",
            Convention::VanillaIborLeg(_) => "VanillaIborLegConvention",
            Convention::SwapFixedLeg(_) => "SwapFixedLegConvention",
            Convention::OisLeg(_) => "OISLegConvention",
        }
    }
}

impl std::fmt::Display for Convention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.kind(), self.name())
    }
}

/// A name-keyed set of conventions for an instrument class.
///
/// Fields are optional; a converter fails naming the bundle when a field it
/// needs is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConventionBundle {
    /// Bundle name, e.g. `US_TREASURY_BOND_CONVENTION`.
    pub name: String,
    /// Identifiers of the bundle.
    #[serde(default)]
    pub ids: ExternalIdBundle,
    /// End-of-month rule for bonds.
    #[serde(default)]
    pub eom: Option<bool>,
    /// Bond settlement lag in business days.
    #[serde(default)]
    pub bond_settlement_days: Option<i32>,
    /// Day count.
    #[serde(default)]
    pub day_count: Option<DayCountConvention>,
    /// Business day convention.
    #[serde(default)]
    pub business_day_convention: Option<BusinessDayConvention>,
    /// Initial-rate index identifier of a swap's floating leg.
    #[serde(default)]
    pub swap_floating_leg_initial_rate: Option<ExternalId>,
}

impl ConventionBundle {
    /// Returns the settlement lag for a bond accruing from `_first_accrual` to `_maturity`.
    ///
    /// Markets that vary the lag with the bond's life would switch on the
    /// dates; every bundle here carries a single lag.
    pub fn settlement_days_for(&self, _first_accrual: Date, _maturity: Date) -> Option<i32> {
        self.bond_settlement_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convention_tagging() {
        let json = r#"{
            "type": "vanilla_ibor_leg",
            "name": "USD Libor ACT/360",
            "ids": ["Test~USD Libor ACT/360"],
            "ibor_index_convention": "Test~USD Libor",
            "reset_tenor": "3M"
        }"#;
        let convention: Convention = serde_json::from_str(json).unwrap();
        assert_eq!(convention.kind(), "VanillaIborLegConvention");
        assert_eq!(convention.name(), "USD Libor ACT/360");
        match convention {
            Convention::VanillaIborLeg(leg) => {
                assert_eq!(leg.reset_tenor, Tenor::Months(3));
                assert!(leg.is_advance_fixing);
                assert_eq!(leg.stub_type, StubType::None);
            }
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn test_bundle_optional_fields() {
        let bundle: ConventionBundle =
            serde_json::from_str(r#"{ "name": "US_TREASURY_BOND_CONVENTION", "eom": true }"#)
                .unwrap();
        let d = Date::from_ymd(2025, 1, 1).unwrap();
        assert_eq!(bundle.eom, Some(true));
        assert_eq!(bundle.settlement_days_for(d, d), None);
    }
}
