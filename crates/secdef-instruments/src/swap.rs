//! Swap definitions.

use serde::{Deserialize, Serialize};

use crate::annuity::AnnuityDefinition;

/// A two-leg swap.
///
/// The specialised variants are chosen by [`SwapDefinition::from_legs`] from
/// the coupon make-up of the legs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "swap_type")]
pub enum SwapDefinition {
    /// Any pair of legs.
    Generic {
        /// Pay leg.
        pay_leg: AnnuityDefinition,
        /// Receive leg.
        receive_leg: AnnuityDefinition,
    },
    /// Fixed against IBOR coupons.
    FixedIbor {
        /// Fixed leg.
        fixed_leg: AnnuityDefinition,
        /// IBOR leg.
        ibor_leg: AnnuityDefinition,
    },
    /// Fixed against overnight coupons.
    FixedOn {
        /// Fixed leg.
        fixed_leg: AnnuityDefinition,
        /// Overnight leg.
        on_leg: AnnuityDefinition,
    },
    /// Fixed against a mixed coupon leg.
    FixedCoupon {
        /// Fixed leg.
        fixed_leg: AnnuityDefinition,
        /// Other leg.
        other_leg: AnnuityDefinition,
    },
}

impl SwapDefinition {
    /// Classifies a pay and a receive leg.
    ///
    /// Exactly one all-fixed leg gives a fixed/float variant; anything else
    /// is generic.
    pub fn from_legs(pay_leg: AnnuityDefinition, receive_leg: AnnuityDefinition) -> Self {
        match (pay_leg.all_fixed(), receive_leg.all_fixed()) {
            (true, false) => Self::fixed_against(pay_leg, receive_leg),
            (false, true) => Self::fixed_against(receive_leg, pay_leg),
            _ => SwapDefinition::Generic {
                pay_leg,
                receive_leg,
            },
        }
    }

    /// A fixed leg against `other_leg`, specialised on the coupons of `other_leg`.
    pub fn fixed_against(fixed_leg: AnnuityDefinition, other_leg: AnnuityDefinition) -> Self {
        if other_leg.all_ibor() {
            SwapDefinition::FixedIbor {
                fixed_leg,
                ibor_leg: other_leg,
            }
        } else if other_leg.all_overnight() {
            SwapDefinition::FixedOn {
                fixed_leg,
                on_leg: other_leg,
            }
        } else {
            SwapDefinition::FixedCoupon {
                fixed_leg,
                other_leg,
            }
        }
    }

    /// Both legs, fixed leg first for fixed/float variants.
    pub fn legs(&self) -> (&AnnuityDefinition, &AnnuityDefinition) {
        match self {
            SwapDefinition::Generic {
                pay_leg,
                receive_leg,
            } => (pay_leg, receive_leg),
            SwapDefinition::FixedIbor {
                fixed_leg,
                ibor_leg,
            } => (fixed_leg, ibor_leg),
            SwapDefinition::FixedOn { fixed_leg, on_leg } => (fixed_leg, on_leg),
            SwapDefinition::FixedCoupon {
                fixed_leg,
                other_leg,
            } => (fixed_leg, other_leg),
        }
    }

    /// The paying leg.
    pub fn pay_leg(&self) -> &AnnuityDefinition {
        let (first, second) = self.legs();
        if first.is_payer() {
            first
        } else {
            second
        }
    }

    /// The receiving leg.
    pub fn receive_leg(&self) -> &AnnuityDefinition {
        let (first, second) = self.legs();
        if first.is_payer() {
            second
        } else {
            first
        }
    }

    /// Variant name.
    pub fn kind(&self) -> &'static str {
        match self {
            SwapDefinition::Generic { .. } => "SwapDefinition",
            SwapDefinition::FixedIbor { .. } => "SwapFixedIborDefinition",
            SwapDefinition::FixedOn { .. } => "SwapFixedONDefinition",
            SwapDefinition::FixedCoupon { .. } => "SwapFixedCouponDefinition",
        }
    }
}
