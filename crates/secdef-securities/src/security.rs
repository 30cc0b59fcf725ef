//! The closed set of securities.

use serde::{Deserialize, Serialize};

use crate::bond::{BillSecurity, BondFutureSecurity, BondSecurity, FloatingRateNoteSecurity};
use crate::cds::{LegacyCdsSecurity, StandardCdsSecurity};
use crate::fra::ForwardRateAgreementSecurity;
use crate::ids::ExternalIdBundle;
use crate::index::{IborIndexSecurity, OvernightIndexSecurity, PriceIndexSecurity};
use crate::swap::{InterestRateSwapSecurity, SwapSecurity};

/// Any security the converters know about.
///
/// Serialized with a `security_type` tag, e.g.
/// `{"security_type": "GOVERNMENT_BOND", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "security_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(clippy::large_enum_variant)]
pub enum Security {
    /// Leg-based interest-rate swap.
    InterestRateSwap(InterestRateSwapSecurity),
    /// Legacy two-leg swap.
    Swap(SwapSecurity),
    /// Government bond.
    GovernmentBond(BondSecurity),
    /// Corporate bond.
    CorporateBond(BondSecurity),
    /// Municipal bond.
    MunicipalBond(BondSecurity),
    /// Inflation-linked bond.
    InflationBond(BondSecurity),
    /// Discount bill.
    Bill(BillSecurity),
    /// Bond future.
    BondFuture(BondFutureSecurity),
    /// Floating-rate note.
    FloatingRateNote(FloatingRateNoteSecurity),
    /// Forward rate agreement.
    ForwardRateAgreement(ForwardRateAgreementSecurity),
    /// Standard CDS.
    StandardCds(StandardCdsSecurity),
    /// Legacy CDS.
    LegacyCds(LegacyCdsSecurity),
    /// IBOR index.
    IborIndex(IborIndexSecurity),
    /// Overnight index.
    OvernightIndex(OvernightIndexSecurity),
    /// Price index.
    PriceIndex(PriceIndexSecurity),
}

impl Security {
    /// Returns the display name.
    pub fn name(&self) -> &str {
        match self {
            Security::InterestRateSwap(s) => &s.name,
            Security::Swap(s) => &s.name,
            Security::GovernmentBond(s)
            | Security::CorporateBond(s)
            | Security::MunicipalBond(s)
            | Security::InflationBond(s) => &s.name,
            Security::Bill(s) => &s.name,
            Security::BondFuture(s) => &s.name,
            Security::FloatingRateNote(s) => &s.name,
            Security::ForwardRateAgreement(s) => &s.name,
            Security::StandardCds(s) => &s.name,
            Security::LegacyCds(s) => &s.name,
            Security::IborIndex(s) => &s.name,
            Security::OvernightIndex(s) => &s.name,
            Security::PriceIndex(s) => &s.name,
        }
    }

    /// Returns the identifiers.
    pub fn ids(&self) -> &ExternalIdBundle {
        match self {
            Security::InterestRateSwap(s) => &s.ids,
            Security::Swap(s) => &s.ids,
            Security::GovernmentBond(s)
            | Security::CorporateBond(s)
            | Security::MunicipalBond(s)
            | Security::InflationBond(s) => &s.ids,
            Security::Bill(s) => &s.ids,
            Security::BondFuture(s) => &s.ids,
            Security::FloatingRateNote(s) => &s.ids,
            Security::ForwardRateAgreement(s) => &s.ids,
            Security::StandardCds(s) => &s.ids,
            Security::LegacyCds(s) => &s.ids,
            Security::IborIndex(s) => &s.ids,
            Security::OvernightIndex(s) => &s.ids,
            Security::PriceIndex(s) => &s.ids,
        }
    }

    /// Returns the security type label.
    pub fn security_type(&self) -> &'static str {
        match self {
            Security::InterestRateSwap(_) => "INTEREST_RATE_SWAP",
            Security::Swap(_) => "SWAP",
            Security::GovernmentBond(_) => "GOVERNMENT_BOND",
            Security::CorporateBond(_) => "CORPORATE_BOND",
            Security::MunicipalBond(_) => "MUNICIPAL_BOND",
            Security::InflationBond(_) => "INFLATION_BOND",
            Security::Bill(_) => "BILL",
            Security::BondFuture(_) => "BOND_FUTURE",
            Security::FloatingRateNote(_) => "FLOATING_RATE_NOTE",
            Security::ForwardRateAgreement(_) => "FORWARD_RATE_AGREEMENT",
            Security::StandardCds(_) => "STANDARD_CDS",
            Security::LegacyCds(_) => "LEGACY_CDS",
            Security::IborIndex(_) => "IBOR_INDEX",
            Security::OvernightIndex(_) => "OVERNIGHT_INDEX",
            Security::PriceIndex(_) => "PRICE_INDEX",
        }
    }

    /// Returns the bond fields of any bond variant.
    pub fn as_bond(&self) -> Option<&BondSecurity> {
        match self {
            Security::GovernmentBond(b)
            | Security::CorporateBond(b)
            | Security::MunicipalBond(b)
            | Security::InflationBond(b) => Some(b),
            _ => None,
        }
    }

    /// Returns true for securities handled by the bond trade converter.
    pub fn is_bond_family(&self) -> bool {
        self.as_bond().is_some()
            || matches!(
                self,
                Security::Bill(_) | Security::BondFuture(_) | Security::FloatingRateNote(_)
            )
    }
}

impl std::fmt::Display for Security {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.security_type(), self.name())
    }
}
