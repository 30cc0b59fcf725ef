//! The closed set of instrument definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use secdef_core::Currency;

use crate::annuity::AnnuityDefinition;
use crate::bond::{
    BillSecurityDefinition, BillTransactionDefinition, BondCapitalIndexedSecurityDefinition,
    BondCapitalIndexedTransactionDefinition, BondFixedSecurityDefinition,
    BondFixedTransactionDefinition, BondFuturesSecurityDefinition,
    BondFuturesTransactionDefinition,
};
use crate::cds::CdsDefinition;
use crate::fra::ForwardRateAgreementDefinition;
use crate::payment::PaymentFixed;
use crate::swap::SwapDefinition;

/// Any instrument definition a converter can produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "definition_type")]
pub enum InstrumentDefinition {
    /// A single fixed payment (zero coupon bonds).
    PaymentFixed(PaymentFixed),
    /// A single leg.
    Annuity(AnnuityDefinition),
    /// A two-leg swap.
    Swap(SwapDefinition),
    /// Fixed coupon bond.
    BondFixedSecurity(BondFixedSecurityDefinition),
    /// Fixed coupon bond position.
    BondFixedTransaction(BondFixedTransactionDefinition),
    /// Bill.
    BillSecurity(BillSecurityDefinition),
    /// Bill position.
    BillTransaction(BillTransactionDefinition),
    /// Capital-indexed bond.
    BondCapitalIndexedSecurity(BondCapitalIndexedSecurityDefinition),
    /// Capital-indexed bond position.
    BondCapitalIndexedTransaction(BondCapitalIndexedTransactionDefinition),
    /// Bond future.
    BondFuturesSecurity(BondFuturesSecurityDefinition),
    /// Bond future position.
    BondFuturesTransaction(BondFuturesTransactionDefinition),
    /// Forward rate agreement.
    ForwardRateAgreement(ForwardRateAgreementDefinition),
    /// Credit default swap.
    Cds(CdsDefinition),
}

impl InstrumentDefinition {
    /// Analytics type name of the definition.
    pub fn kind(&self) -> &'static str {
        match self {
            InstrumentDefinition::PaymentFixed(_) => "PaymentFixedDefinition",
            InstrumentDefinition::Annuity(_) => "AnnuityDefinition",
            InstrumentDefinition::Swap(swap) => swap.kind(),
            InstrumentDefinition::BondFixedSecurity(_) => "BondFixedSecurityDefinition",
            InstrumentDefinition::BondFixedTransaction(_) => "BondFixedTransactionDefinition",
            InstrumentDefinition::BillSecurity(_) => "BillSecurityDefinition",
            InstrumentDefinition::BillTransaction(_) => "BillTransactionDefinition",
            InstrumentDefinition::BondCapitalIndexedSecurity(_) => {
                "BondCapitalIndexedSecurityDefinition"
            }
            InstrumentDefinition::BondCapitalIndexedTransaction(_) => {
                "BondCapitalIndexedTransactionDefinition"
            }
            InstrumentDefinition::BondFuturesSecurity(_) => "BondFuturesSecurityDefinition",
            InstrumentDefinition::BondFuturesTransaction(_) => "BondFuturesTransactionDefinition",
            InstrumentDefinition::ForwardRateAgreement(_) => "ForwardRateAgreementDefinition",
            InstrumentDefinition::Cds(_) => "CDSDefinition",
        }
    }

    /// Settlement currency.
    pub fn currency(&self) -> Currency {
        match self {
            InstrumentDefinition::PaymentFixed(p) => p.currency,
            InstrumentDefinition::Annuity(a) => a.currency(),
            InstrumentDefinition::Swap(s) => s.legs().0.currency(),
            InstrumentDefinition::BondFixedSecurity(b) => b.currency,
            InstrumentDefinition::BondFixedTransaction(t) => t.underlying.currency,
            InstrumentDefinition::BillSecurity(b) => b.currency,
            InstrumentDefinition::BillTransaction(t) => t.underlying.currency,
            InstrumentDefinition::BondCapitalIndexedSecurity(b) => b.currency,
            InstrumentDefinition::BondCapitalIndexedTransaction(t) => t.underlying.currency,
            InstrumentDefinition::BondFuturesSecurity(f) => f.currency,
            InstrumentDefinition::BondFuturesTransaction(t) => t.underlying.currency,
            InstrumentDefinition::ForwardRateAgreement(f) => f.currency,
            InstrumentDefinition::Cds(c) => c.currency,
        }
    }
}

impl fmt::Display for InstrumentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind(), self.currency())
    }
}

impl From<SwapDefinition> for InstrumentDefinition {
    fn from(swap: SwapDefinition) -> Self {
        InstrumentDefinition::Swap(swap)
    }
}

impl From<AnnuityDefinition> for InstrumentDefinition {
    fn from(annuity: AnnuityDefinition) -> Self {
        InstrumentDefinition::Annuity(annuity)
    }
}
