//! Payment and coupon definitions.
//!
//! Notionals are signed: negative for payments made, positive for payments
//! received. Rates are decimals (`0.05` for 5%).

use serde::{Deserialize, Serialize};

use secdef_core::{Currency, Date};

use crate::index::{IborIndex, IndexON};

/// A known amount paid on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentFixed {
    /// Currency.
    pub currency: Currency,
    /// Payment date.
    pub payment_date: Date,
    /// Signed amount.
    pub amount: f64,
}

impl PaymentFixed {
    /// Creates a fixed payment.
    #[must_use]
    pub fn new(currency: Currency, payment_date: Date, amount: f64) -> Self {
        Self {
            currency,
            payment_date,
            amount,
        }
    }
}

/// The accrual period and notional every coupon carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponPeriod {
    /// Currency.
    pub currency: Currency,
    /// Payment date.
    pub payment_date: Date,
    /// Accrual start (adjusted).
    pub accrual_start: Date,
    /// Accrual end (adjusted).
    pub accrual_end: Date,
    /// Accrual year fraction.
    pub payment_year_fraction: f64,
    /// Signed notional.
    pub notional: f64,
}

/// A coupon at a known rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponFixed {
    /// Accrual period.
    #[serde(flatten)]
    pub period: CouponPeriod,
    /// Coupon rate.
    pub rate: f64,
}

impl CouponFixed {
    /// Signed coupon amount.
    pub fn amount(&self) -> f64 {
        self.period.notional * self.rate * self.period.payment_year_fraction
    }
}

/// A coupon fixing on a term deposit index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponIbor {
    /// Accrual period.
    #[serde(flatten)]
    pub period: CouponPeriod,
    /// Index.
    pub index: IborIndex,
    /// Fixing date.
    pub fixing_date: Date,
    /// Start of the fixing deposit.
    pub fixing_period_start: Date,
    /// End of the fixing deposit.
    pub fixing_period_end: Date,
    /// Fixing deposit year fraction in the index day count.
    pub fixing_year_fraction: f64,
    /// Spread over the fixing.
    pub spread: f64,
}

/// How sub-period IBOR fixings compound into one coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IborCompoundingMethod {
    /// Spread compounds only within each sub-period.
    Flat,
    /// Rate plus spread compounds.
    Straight,
    /// Rate compounds; the spread is added simply.
    SpreadExclusive,
}

/// One compounding sub-period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundingSubPeriod {
    /// Sub-period accrual start.
    pub accrual_start: Date,
    /// Sub-period accrual end.
    pub accrual_end: Date,
    /// Sub-period accrual fraction.
    pub accrual_factor: f64,
    /// Fixing date.
    pub fixing_date: Date,
    /// Start of the fixing deposit.
    pub fixing_period_start: Date,
    /// End of the fixing deposit.
    pub fixing_period_end: Date,
    /// Fixing deposit fraction.
    pub fixing_factor: f64,
}

/// A coupon compounding several IBOR fixings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponIborCompounding {
    /// Accrual period.
    #[serde(flatten)]
    pub period: CouponPeriod,
    /// Index.
    pub index: IborIndex,
    /// Compounding method.
    pub method: IborCompoundingMethod,
    /// Spread over the fixings.
    pub spread: f64,
    /// Sub-periods in order.
    pub sub_periods: Vec<CompoundingSubPeriod>,
}

/// A stub coupon fixing on an interpolation of two IBOR indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponIborInterpolatedStub {
    /// Accrual period.
    #[serde(flatten)]
    pub period: CouponPeriod,
    /// Fixing date of both indices.
    pub fixing_date: Date,
    /// Shorter index.
    pub first_index: IborIndex,
    /// Longer index.
    pub second_index: IborIndex,
    /// Weight of the shorter index, in `[0, 1]`.
    pub weight: f64,
    /// Spread over the interpolated fixing.
    pub spread: f64,
}

/// A coupon on an overnight index over the accrual period.
///
/// Used for both compounded and arithmetic-average coupons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponOn {
    /// Accrual period.
    #[serde(flatten)]
    pub period: CouponPeriod,
    /// Index.
    pub index: IndexON,
    /// Fixing period boundaries; one more than the fixing factors.
    pub fixing_dates: Vec<Date>,
    /// Accrual fraction of each overnight fixing period.
    pub fixing_factors: Vec<f64>,
    /// Spread over the overnight rate.
    pub spread: f64,
}

/// A fixed rate compounded over a business-day accrual fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponFixedAccruedCompounding {
    /// Accrual period; the year fraction counts business days over 252.
    #[serde(flatten)]
    pub period: CouponPeriod,
    /// Annual rate.
    pub rate: f64,
}

impl CouponFixedAccruedCompounding {
    /// Signed coupon amount, `N * ((1 + r)^t - 1)`.
    pub fn amount(&self) -> f64 {
        self.period.notional * ((1.0 + self.rate).powf(self.period.payment_year_fraction) - 1.0)
    }
}

/// A payment of any supported kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Payment {
    /// A fixed amount (e.g. notional exchange).
    Fixed(PaymentFixed),
    /// Fixed-rate coupon.
    CouponFixed(CouponFixed),
    /// IBOR coupon without spread.
    CouponIbor(CouponIbor),
    /// IBOR coupon with spread.
    CouponIborSpread(CouponIbor),
    /// Compounded IBOR coupon.
    CouponIborCompounding(CouponIborCompounding),
    /// Interpolated IBOR stub coupon.
    CouponIborInterpolatedStub(CouponIborInterpolatedStub),
    /// Compounded overnight coupon.
    CouponOn(CouponOn),
    /// Arithmetic-average overnight coupon.
    CouponOnArithmeticAverage(CouponOn),
    /// Compounded fixed coupon.
    CouponFixedAccruedCompounding(CouponFixedAccruedCompounding),
}

impl Payment {
    fn split(&self) -> Result<&CouponPeriod, &PaymentFixed> {
        match self {
            Payment::Fixed(p) => Err(p),
            Payment::CouponFixed(c) => Ok(&c.period),
            Payment::CouponIbor(c) | Payment::CouponIborSpread(c) => Ok(&c.period),
            Payment::CouponIborCompounding(c) => Ok(&c.period),
            Payment::CouponIborInterpolatedStub(c) => Ok(&c.period),
            Payment::CouponOn(c) | Payment::CouponOnArithmeticAverage(c) => Ok(&c.period),
            Payment::CouponFixedAccruedCompounding(c) => Ok(&c.period),
        }
    }

    /// Accrual period, for coupons.
    pub fn period(&self) -> Option<&CouponPeriod> {
        self.split().ok()
    }

    /// Payment date.
    pub fn payment_date(&self) -> Date {
        match self.split() {
            Ok(period) => period.payment_date,
            Err(fixed) => fixed.payment_date,
        }
    }

    /// Currency.
    pub fn currency(&self) -> Currency {
        match self.split() {
            Ok(period) => period.currency,
            Err(fixed) => fixed.currency,
        }
    }

    /// Signed notional of a coupon, or the amount of a fixed payment.
    pub fn notional(&self) -> f64 {
        match self.split() {
            Ok(period) => period.notional,
            Err(fixed) => fixed.amount,
        }
    }

    /// Short kind name.
    pub fn kind(&self) -> &'static str {
        match self {
            Payment::Fixed(_) => "PaymentFixed",
            Payment::CouponFixed(_) => "CouponFixed",
            Payment::CouponIbor(_) => "CouponIbor",
            Payment::CouponIborSpread(_) => "CouponIborSpread",
            Payment::CouponIborCompounding(_) => "CouponIborCompounding",
            Payment::CouponIborInterpolatedStub(_) => "CouponIborInterpolatedStub",
            Payment::CouponOn(_) => "CouponOn",
            Payment::CouponOnArithmeticAverage(_) => "CouponOnArithmeticAverage",
            Payment::CouponFixedAccruedCompounding(_) => "CouponFixedAccruedCompounding",
        }
    }

    /// Returns true for a fixed payment (notional exchange).
    pub fn is_notional_payment(&self) -> bool {
        matches!(self, Payment::Fixed(_))
    }

    /// Returns true for known-rate coupons.
    pub fn is_fixed_coupon(&self) -> bool {
        matches!(
            self,
            Payment::CouponFixed(_) | Payment::CouponFixedAccruedCompounding(_)
        )
    }

    /// Returns true for IBOR-family coupons.
    pub fn is_ibor_coupon(&self) -> bool {
        matches!(
            self,
            Payment::CouponIbor(_)
                | Payment::CouponIborSpread(_)
                | Payment::CouponIborCompounding(_)
                | Payment::CouponIborInterpolatedStub(_)
        )
    }

    /// Returns true for overnight coupons.
    pub fn is_overnight_coupon(&self) -> bool {
        matches!(
            self,
            Payment::CouponOn(_) | Payment::CouponOnArithmeticAverage(_)
        )
    }
}
