//! Annuity definitions: the payments of one swap leg.

use serde::{Deserialize, Serialize};

use secdef_core::Currency;

use crate::error::{InstrumentError, InstrumentResult};
use crate::payment::Payment;

/// An ordered sequence of payments in one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnuityDefinition {
    payments: Vec<Payment>,
    payer: bool,
    calendar_name: String,
}

impl AnnuityDefinition {
    /// Creates an annuity.
    ///
    /// Fails if `payments` is empty or mixes currencies.
    pub fn new(
        payments: Vec<Payment>,
        payer: bool,
        calendar_name: impl Into<String>,
    ) -> InstrumentResult<Self> {
        let Some(first) = payments.first() else {
            return Err(InstrumentError::invalid_definition(
                "Annuity must contain at least one payment",
            ));
        };
        let currency = first.currency();
        if let Some(other) = payments.iter().find(|p| p.currency() != currency) {
            return Err(InstrumentError::invalid_definition(format!(
                "Annuity mixes currencies {currency} and {}",
                other.currency()
            )));
        }
        Ok(Self {
            payments,
            payer,
            calendar_name: calendar_name.into(),
        })
    }

    /// Payments in order.
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// Number of payments.
    pub fn len(&self) -> usize {
        self.payments.len()
    }

    /// Always false; annuities are non-empty.
    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    /// Returns true for the paying side.
    pub fn is_payer(&self) -> bool {
        self.payer
    }

    /// Currency of every payment.
    pub fn currency(&self) -> Currency {
        self.payments[0].currency()
    }

    /// Name of the payment calendar.
    pub fn calendar_name(&self) -> &str {
        &self.calendar_name
    }

    fn coupons(&self) -> impl Iterator<Item = &Payment> {
        self.payments.iter().filter(|p| !p.is_notional_payment())
    }

    /// Returns true if every coupon pays a known rate.
    pub fn all_fixed(&self) -> bool {
        self.coupons().all(Payment::is_fixed_coupon)
    }

    /// Returns true if every coupon fixes on an IBOR index.
    pub fn all_ibor(&self) -> bool {
        self.coupons().all(Payment::is_ibor_coupon)
    }

    /// Returns true if every coupon fixes on an overnight index.
    pub fn all_overnight(&self) -> bool {
        self.coupons().all(Payment::is_overnight_coupon)
    }
}
