//! Time-sliced instruments.
//!
//! [`InstrumentDefinition::to_derivative`] fixes a definition at a valuation
//! date: dates become ACT/365 times from the valuation date, payments made
//! before it are dropped, and coupons whose fixing date has passed are
//! resolved against the fixing series into fixed coupons. A fixing on the
//! valuation date is used when present and left floating otherwise.

use serde::Serialize;

use secdef_core::{Currency, Date, DateDoubleTimeSeries};

use crate::annuity::AnnuityDefinition;
use crate::bond::{BondFixedSecurityDefinition, IndexedCoupon};
use crate::definition::InstrumentDefinition;
use crate::error::{InstrumentError, InstrumentResult};
use crate::payment::{CouponPeriod, IborCompoundingMethod, Payment};

/// Time in years from `valuation` to `date`, ACT/365.
pub fn time_between(valuation: Date, date: Date) -> f64 {
    valuation.days_between(&date) as f64 / 365.0
}

/// A payment at a valuation date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum PaymentDerivative {
    /// Known amount.
    Fixed {
        /// Currency.
        currency: Currency,
        /// Payment time.
        payment_time: f64,
        /// Signed amount.
        amount: f64,
    },
    /// Coupon at a known rate.
    CouponFixed {
        /// Currency.
        currency: Currency,
        /// Payment time.
        payment_time: f64,
        /// Accrual fraction.
        payment_year_fraction: f64,
        /// Signed notional.
        notional: f64,
        /// Rate.
        rate: f64,
    },
    /// IBOR coupon yet to fix.
    CouponIbor {
        /// Currency.
        currency: Currency,
        /// Payment time.
        payment_time: f64,
        /// Accrual fraction.
        payment_year_fraction: f64,
        /// Signed notional.
        notional: f64,
        /// Index name.
        index: String,
        /// Fixing time.
        fixing_time: f64,
        /// Deposit start time.
        fixing_period_start_time: f64,
        /// Deposit end time.
        fixing_period_end_time: f64,
        /// Deposit fraction.
        fixing_year_fraction: f64,
        /// Spread.
        spread: f64,
    },
    /// Interpolated IBOR stub yet to fix.
    CouponIborInterpolatedStub {
        /// Currency.
        currency: Currency,
        /// Payment time.
        payment_time: f64,
        /// Accrual fraction.
        payment_year_fraction: f64,
        /// Signed notional.
        notional: f64,
        /// Shorter index name.
        first_index: String,
        /// Longer index name.
        second_index: String,
        /// Weight of the shorter index.
        weight: f64,
        /// Fixing time.
        fixing_time: f64,
        /// Spread.
        spread: f64,
    },
    /// Compounded IBOR coupon with some fixings outstanding.
    CouponIborCompounding {
        /// Currency.
        currency: Currency,
        /// Payment time.
        payment_time: f64,
        /// Accrual fraction.
        payment_year_fraction: f64,
        /// Signed notional.
        notional: f64,
        /// Index name.
        index: String,
        /// Compounding method.
        method: IborCompoundingMethod,
        /// Notional compounded over the fixed sub-periods.
        notional_accrued: f64,
        /// Fixing times of the outstanding sub-periods.
        fixing_times: Vec<f64>,
        /// Accrual fractions of the outstanding sub-periods.
        accrual_factors: Vec<f64>,
        /// Spread.
        spread: f64,
    },
    /// Overnight coupon with some fixings outstanding.
    CouponOn {
        /// Currency.
        currency: Currency,
        /// Payment time.
        payment_time: f64,
        /// Accrual fraction.
        payment_year_fraction: f64,
        /// Signed notional.
        notional: f64,
        /// Index name.
        index: String,
        /// Compounded factor (or summed rate fractions when averaging) so far.
        accrued: f64,
        /// Start time of the outstanding fixing period.
        fixing_period_start_time: f64,
        /// End time of the outstanding fixing period.
        fixing_period_end_time: f64,
        /// Accrual fraction of the outstanding fixing period.
        fixing_period_factor: f64,
        /// Spread.
        spread: f64,
        /// Arithmetic average instead of compounding.
        arithmetic_average: bool,
    },
    /// Compounded fixed coupon.
    CouponFixedAccruedCompounding {
        /// Currency.
        currency: Currency,
        /// Payment time.
        payment_time: f64,
        /// Business-day accrual fraction.
        payment_year_fraction: f64,
        /// Signed notional.
        notional: f64,
        /// Rate.
        rate: f64,
    },
    /// Coupon indexed to a price index.
    CouponInflation {
        /// Currency.
        currency: Currency,
        /// Payment time.
        payment_time: f64,
        /// Accrual fraction.
        payment_year_fraction: f64,
        /// Real notional.
        notional: f64,
        /// Price index name.
        index: String,
        /// Real rate.
        real_rate: f64,
        /// Time of the reference index date.
        reference_end_time: f64,
        /// Index value at issue.
        index_start_value: f64,
    },
}

/// An instrument at a valuation date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "derivative_type")]
pub enum InstrumentDerivative {
    /// A single payment.
    Payment {
        /// Payment.
        payment: PaymentDerivative,
    },
    /// One leg.
    Annuity {
        /// Remaining payments.
        payments: Vec<PaymentDerivative>,
    },
    /// Two legs.
    Swap {
        /// Remaining pay-leg payments.
        pay_leg: Vec<PaymentDerivative>,
        /// Remaining receive-leg payments.
        receive_leg: Vec<PaymentDerivative>,
    },
    /// A bond or bond position.
    Bond {
        /// Settlement time.
        settlement_time: f64,
        /// Remaining coupons.
        coupons: Vec<PaymentDerivative>,
        /// Remaining redemption.
        nominal: Vec<PaymentDerivative>,
        /// Signed quantity.
        quantity: f64,
    },
    /// A bill or bill position.
    Bill {
        /// Settlement time.
        settlement_time: f64,
        /// Maturity time.
        end_time: f64,
        /// Notional.
        notional: f64,
        /// Signed quantity.
        quantity: f64,
        /// Settlement amount.
        settlement_amount: f64,
    },
    /// A bond future or position.
    BondFuture {
        /// Last trading time.
        last_trading_time: f64,
        /// First notice time.
        first_notice_time: f64,
        /// Last notice time.
        last_notice_time: f64,
        /// Contract notional.
        notional: f64,
        /// Deliverables.
        basket: Vec<InstrumentDerivative>,
        /// Conversion factors.
        conversion_factors: Vec<f64>,
        /// Number of contracts.
        quantity: i64,
        /// Traded price.
        reference_price: f64,
    },
    /// A FRA yet to fix.
    Fra {
        /// Currency.
        currency: Currency,
        /// Payment time.
        payment_time: f64,
        /// Accrual fraction.
        payment_year_fraction: f64,
        /// Signed notional.
        notional: f64,
        /// Index name.
        index: String,
        /// Fixing time.
        fixing_time: f64,
        /// Deposit start time.
        fixing_period_start_time: f64,
        /// Deposit end time.
        fixing_period_end_time: f64,
        /// Deposit fraction.
        fixing_year_fraction: f64,
        /// Contract rate.
        rate: f64,
    },
    /// A CDS.
    Cds {
        /// Remaining premium coupons.
        premium: Vec<PaymentDerivative>,
        /// Protection start time.
        protection_start_time: f64,
        /// Protection end time.
        protection_end_time: f64,
        /// Notional.
        notional: f64,
        /// True when buying protection.
        buy_protection: bool,
        /// Fixed recovery rate.
        recovery_rate: Option<f64>,
    },
}

/// Returns the fixing on `date` if it must be (or can be) used.
///
/// Past dates must have a fixing; the valuation date may.
fn known_fixing(
    series: &DateDoubleTimeSeries,
    index: &str,
    date: Date,
    valuation: Date,
) -> InstrumentResult<Option<f64>> {
    if date > valuation {
        return Ok(None);
    }
    match series.value_on(date) {
        Some(value) => Ok(Some(value)),
        None if date == valuation => Ok(None),
        None => Err(InstrumentError::missing_fixing(index, date)),
    }
}

fn fixed_coupon(period: &CouponPeriod, valuation: Date, rate: f64) -> PaymentDerivative {
    PaymentDerivative::CouponFixed {
        currency: period.currency,
        payment_time: time_between(valuation, period.payment_date),
        payment_year_fraction: period.payment_year_fraction,
        notional: period.notional,
        rate,
    }
}

impl Payment {
    /// Slices the payment at `valuation`; `None` once paid.
    pub fn to_derivative(
        &self,
        valuation: Date,
        fixings: &DateDoubleTimeSeries,
    ) -> InstrumentResult<Option<PaymentDerivative>> {
        if self.payment_date() < valuation {
            return Ok(None);
        }
        let t = |d: Date| time_between(valuation, d);
        let derivative = match self {
            Payment::Fixed(p) => PaymentDerivative::Fixed {
                currency: p.currency,
                payment_time: t(p.payment_date),
                amount: p.amount,
            },
            Payment::CouponFixed(c) => fixed_coupon(&c.period, valuation, c.rate),
            Payment::CouponIbor(c) | Payment::CouponIborSpread(c) => {
                match known_fixing(fixings, &c.index.name, c.fixing_date, valuation)? {
                    Some(fixing) => fixed_coupon(&c.period, valuation, fixing + c.spread),
                    None => PaymentDerivative::CouponIbor {
                        currency: c.period.currency,
                        payment_time: t(c.period.payment_date),
                        payment_year_fraction: c.period.payment_year_fraction,
                        notional: c.period.notional,
                        index: c.index.name.clone(),
                        fixing_time: t(c.fixing_date),
                        fixing_period_start_time: t(c.fixing_period_start),
                        fixing_period_end_time: t(c.fixing_period_end),
                        fixing_year_fraction: c.fixing_year_fraction,
                        spread: c.spread,
                    },
                }
            }
            Payment::CouponIborInterpolatedStub(c) => {
                match known_fixing(fixings, &c.first_index.name, c.fixing_date, valuation)? {
                    Some(fixing) => fixed_coupon(&c.period, valuation, fixing + c.spread),
                    None => PaymentDerivative::CouponIborInterpolatedStub {
                        currency: c.period.currency,
                        payment_time: t(c.period.payment_date),
                        payment_year_fraction: c.period.payment_year_fraction,
                        notional: c.period.notional,
                        first_index: c.first_index.name.clone(),
                        second_index: c.second_index.name.clone(),
                        weight: c.weight,
                        fixing_time: t(c.fixing_date),
                        spread: c.spread,
                    },
                }
            }
            Payment::CouponIborCompounding(c) => {
                let compounded_spread = if c.method == IborCompoundingMethod::Straight {
                    c.spread
                } else {
                    0.0
                };
                let mut accrued = 1.0;
                let mut fixing_times = Vec::new();
                let mut accrual_factors = Vec::new();
                for sub in &c.sub_periods {
                    match known_fixing(fixings, &c.index.name, sub.fixing_date, valuation)? {
                        Some(fixing) if fixing_times.is_empty() => {
                            accrued *= 1.0 + (fixing + compounded_spread) * sub.accrual_factor;
                        }
                        _ => {
                            fixing_times.push(t(sub.fixing_date));
                            accrual_factors.push(sub.accrual_factor);
                        }
                    }
                }
                if fixing_times.is_empty() {
                    let rate = (accrued - 1.0) / c.period.payment_year_fraction
                        + (c.spread - compounded_spread);
                    fixed_coupon(&c.period, valuation, rate)
                } else {
                    PaymentDerivative::CouponIborCompounding {
                        currency: c.period.currency,
                        payment_time: t(c.period.payment_date),
                        payment_year_fraction: c.period.payment_year_fraction,
                        notional: c.period.notional,
                        index: c.index.name.clone(),
                        method: c.method,
                        notional_accrued: c.period.notional * accrued,
                        fixing_times,
                        accrual_factors,
                        spread: c.spread,
                    }
                }
            }
            Payment::CouponOn(c) | Payment::CouponOnArithmeticAverage(c) => {
                let arithmetic = matches!(self, Payment::CouponOnArithmeticAverage(_));
                let mut accrued = if arithmetic { 0.0 } else { 1.0 };
                let mut fixed = 0;
                for (date, factor) in c.fixing_dates.iter().zip(&c.fixing_factors) {
                    match known_fixing(fixings, &c.index.name, *date, valuation)? {
                        Some(rate) if arithmetic => accrued += rate * factor,
                        Some(rate) => accrued *= 1.0 + rate * factor,
                        None => break,
                    }
                    fixed += 1;
                }
                if fixed == c.fixing_factors.len() {
                    let growth = if arithmetic { accrued } else { accrued - 1.0 };
                    fixed_coupon(
                        &c.period,
                        valuation,
                        growth / c.period.payment_year_fraction + c.spread,
                    )
                } else {
                    PaymentDerivative::CouponOn {
                        currency: c.period.currency,
                        payment_time: t(c.period.payment_date),
                        payment_year_fraction: c.period.payment_year_fraction,
                        notional: c.period.notional,
                        index: c.index.name.clone(),
                        accrued,
                        fixing_period_start_time: t(c.fixing_dates[fixed]),
                        fixing_period_end_time: t(c.period.accrual_end),
                        fixing_period_factor: c.fixing_factors[fixed..].iter().sum(),
                        spread: c.spread,
                        arithmetic_average: arithmetic,
                    }
                }
            }
            Payment::CouponFixedAccruedCompounding(c) => {
                PaymentDerivative::CouponFixedAccruedCompounding {
                    currency: c.period.currency,
                    payment_time: t(c.period.payment_date),
                    payment_year_fraction: c.period.payment_year_fraction,
                    notional: c.period.notional,
                    rate: c.rate,
                }
            }
        };
        Ok(Some(derivative))
    }
}

impl AnnuityDefinition {
    /// Slices every payment at `valuation`, dropping paid ones.
    pub fn to_derivative(
        &self,
        valuation: Date,
        fixings: &DateDoubleTimeSeries,
    ) -> InstrumentResult<Vec<PaymentDerivative>> {
        let mut out = Vec::with_capacity(self.len());
        for payment in self.payments() {
            out.extend(payment.to_derivative(valuation, fixings)?);
        }
        Ok(out)
    }
}

fn fixed_bond(
    bond: &BondFixedSecurityDefinition,
    valuation: Date,
    settlement_time: f64,
    quantity: f64,
) -> InstrumentResult<InstrumentDerivative> {
    let empty = DateDoubleTimeSeries::new();
    let mut coupons = Vec::with_capacity(bond.coupons.len());
    for coupon in &bond.coupons {
        coupons.extend(Payment::CouponFixed(coupon.clone()).to_derivative(valuation, &empty)?);
    }
    let nominal = Payment::Fixed(bond.nominal.clone())
        .to_derivative(valuation, &empty)?
        .into_iter()
        .collect();
    Ok(InstrumentDerivative::Bond {
        settlement_time,
        coupons,
        nominal,
        quantity,
    })
}

fn inflation_coupon(
    coupon: &IndexedCoupon,
    currency: Currency,
    index: &str,
    index_start_value: f64,
    valuation: Date,
) -> Option<PaymentDerivative> {
    (coupon.payment_date >= valuation).then(|| PaymentDerivative::CouponInflation {
        currency,
        payment_time: time_between(valuation, coupon.payment_date),
        payment_year_fraction: coupon.year_fraction,
        notional: coupon.notional,
        index: index.to_string(),
        real_rate: coupon.real_rate,
        reference_end_time: time_between(valuation, coupon.reference_end_date),
        index_start_value,
    })
}

impl InstrumentDefinition {
    /// Slices the definition at `valuation`.
    ///
    /// `fixings` holds one series per floating leg in pay, receive order; a
    /// single series serves both legs. Definitions without floating
    /// payments ignore it.
    pub fn to_derivative(
        &self,
        valuation: Date,
        fixings: &[DateDoubleTimeSeries],
    ) -> InstrumentResult<InstrumentDerivative> {
        let empty = DateDoubleTimeSeries::new();
        let first = fixings.first().unwrap_or(&empty);
        let second = fixings.get(1).unwrap_or(first);
        let t = |d: Date| time_between(valuation, d);

        let derivative = match self {
            InstrumentDefinition::PaymentFixed(p) => {
                let payment = Payment::Fixed(p.clone())
                    .to_derivative(valuation, first)?
                    .ok_or_else(|| {
                        InstrumentError::invalid_definition(format!(
                            "Payment on {} is before valuation date {valuation}",
                            p.payment_date
                        ))
                    })?;
                InstrumentDerivative::Payment { payment }
            }
            InstrumentDefinition::Annuity(annuity) => InstrumentDerivative::Annuity {
                payments: annuity.to_derivative(valuation, first)?,
            },
            InstrumentDefinition::Swap(swap) => InstrumentDerivative::Swap {
                pay_leg: swap.pay_leg().to_derivative(valuation, first)?,
                receive_leg: swap.receive_leg().to_derivative(valuation, second)?,
            },
            InstrumentDefinition::BondFixedSecurity(bond) => fixed_bond(bond, valuation, 0.0, 1.0)?,
            InstrumentDefinition::BondFixedTransaction(trade) => fixed_bond(
                &trade.underlying,
                valuation,
                t(trade.settlement.date_naive().into()),
                trade.quantity,
            )?,
            InstrumentDefinition::BillSecurity(bill) => InstrumentDerivative::Bill {
                settlement_time: 0.0,
                end_time: t(bill.end_date),
                notional: bill.notional,
                quantity: 1.0,
                settlement_amount: 0.0,
            },
            InstrumentDefinition::BillTransaction(trade) => InstrumentDerivative::Bill {
                settlement_time: t(trade.settlement.date_naive().into()),
                end_time: t(trade.underlying.end_date),
                notional: trade.underlying.notional,
                quantity: trade.quantity,
                settlement_amount: trade.settlement_amount,
            },
            InstrumentDefinition::BondCapitalIndexedSecurity(bond) => {
                capital_indexed(bond, valuation, 0.0, 1.0)
            }
            InstrumentDefinition::BondCapitalIndexedTransaction(trade) => capital_indexed(
                &trade.underlying,
                valuation,
                t(trade.settlement.date_naive().into()),
                trade.quantity,
            ),
            InstrumentDefinition::BondFuturesSecurity(future) => {
                bond_future(future, valuation, 1, 0.0)?
            }
            InstrumentDefinition::BondFuturesTransaction(trade) => {
                bond_future(&trade.underlying, valuation, trade.quantity, trade.trade_price)?
            }
            InstrumentDefinition::ForwardRateAgreement(fra) => {
                match known_fixing(first, &fra.index.name, fra.fixing_date, valuation)? {
                    Some(fixing) => InstrumentDerivative::Payment {
                        payment: PaymentDerivative::Fixed {
                            currency: fra.currency,
                            payment_time: t(fra.payment_date),
                            amount: fra.settlement_amount(fixing),
                        },
                    },
                    None => InstrumentDerivative::Fra {
                        currency: fra.currency,
                        payment_time: t(fra.payment_date),
                        payment_year_fraction: fra.payment_year_fraction,
                        notional: fra.notional,
                        index: fra.index.name.clone(),
                        fixing_time: t(fra.fixing_date),
                        fixing_period_start_time: t(fra.fixing_period_start),
                        fixing_period_end_time: t(fra.fixing_period_end),
                        fixing_year_fraction: fra.fixing_year_fraction,
                        rate: fra.rate,
                    },
                }
            }
            InstrumentDefinition::Cds(cds) => {
                let sign = if cds.buy_protection { -1.0 } else { 1.0 };
                let premium = cds
                    .premium
                    .iter()
                    .filter(|p| p.payment_date >= valuation)
                    .map(|p| PaymentDerivative::CouponFixed {
                        currency: cds.currency,
                        payment_time: t(p.payment_date),
                        payment_year_fraction: p.year_fraction,
                        notional: sign * cds.notional,
                        rate: cds.coupon,
                    })
                    .collect();
                InstrumentDerivative::Cds {
                    premium,
                    protection_start_time: t(cds.protection_start_date),
                    protection_end_time: t(cds.protection_end_date),
                    notional: cds.notional,
                    buy_protection: cds.buy_protection,
                    recovery_rate: cds.recovery_rate,
                }
            }
        };
        Ok(derivative)
    }
}

fn capital_indexed(
    bond: &crate::bond::BondCapitalIndexedSecurityDefinition,
    valuation: Date,
    settlement_time: f64,
    quantity: f64,
) -> InstrumentDerivative {
    let index = bond.price_index.name.as_str();
    let coupons = bond
        .coupons
        .iter()
        .filter_map(|c| inflation_coupon(c, bond.currency, index, bond.index_start_value, valuation))
        .collect();
    let nominal = inflation_coupon(
        &bond.nominal,
        bond.currency,
        index,
        bond.index_start_value,
        valuation,
    )
    .into_iter()
    .collect();
    InstrumentDerivative::Bond {
        settlement_time,
        coupons,
        nominal,
        quantity,
    }
}

fn bond_future(
    future: &crate::bond::BondFuturesSecurityDefinition,
    valuation: Date,
    quantity: i64,
    reference_price: f64,
) -> InstrumentResult<InstrumentDerivative> {
    let delivery_time = time_between(valuation, future.last_notice_date);
    let basket = future
        .basket
        .iter()
        .map(|bond| fixed_bond(bond, valuation, delivery_time, 1.0))
        .collect::<InstrumentResult<Vec<_>>>()?;
    Ok(InstrumentDerivative::BondFuture {
        last_trading_time: time_between(valuation, future.last_trading_date),
        first_notice_time: time_between(valuation, future.first_notice_date),
        last_notice_time: delivery_time,
        notional: future.notional,
        basket,
        conversion_factors: future.conversion_factors.clone(),
        quantity,
        reference_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::FloatingAnnuityDefinitionBuilder;
    use crate::index::{IborIndex, IndexON};
    use crate::notional::NotionalProvider;
    use crate::payment::PaymentFixed;
    use approx::assert_relative_eq;
    use secdef_core::calendars::{BusinessDayConvention, WeekendCalendar};
    use secdef_core::daycounts::DayCountConvention;
    use secdef_core::Tenor;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn libor_leg() -> AnnuityDefinition {
        FloatingAnnuityDefinitionBuilder::new()
            .currency(Currency::USD)
            .start_date(date(2025, 1, 15))
            .end_date(date(2026, 1, 15))
            .day_count(DayCountConvention::Act360)
            .accrual_period_frequency(Tenor::Months(3))
            .accrual_adjustment(Arc::new(WeekendCalendar), BusinessDayConvention::ModifiedFollowing)
            .notional(NotionalProvider::constant(1_000_000.0))
            .index(IborIndex::new(
                "USDLIBOR3M",
                Currency::USD,
                Tenor::Months(3),
                2,
                DayCountConvention::Act360,
                BusinessDayConvention::ModifiedFollowing,
                false,
            ))
            .spread(0.001)
            .build()
            .unwrap()
    }

    #[test]
    fn test_paid_dropped_and_past_fixing_resolved() {
        let leg = libor_leg();
        let fixings = DateDoubleTimeSeries::from_pairs([
            (date(2025, 1, 13), 0.043),
            (date(2025, 4, 11), 0.044),
        ]);
        let derivative = leg.to_derivative(date(2025, 5, 1), &fixings).unwrap();
        assert_eq!(derivative.len(), 3);
        match &derivative[0] {
            PaymentDerivative::CouponFixed { rate, .. } => assert_relative_eq!(*rate, 0.045),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(derivative[1], PaymentDerivative::CouponIbor { .. }));
    }

    #[test]
    fn test_missing_past_fixing_is_an_error() {
        let err = libor_leg()
            .to_derivative(date(2025, 5, 1), &DateDoubleTimeSeries::new())
            .unwrap_err();
        assert_eq!(
            err,
            InstrumentError::missing_fixing("USDLIBOR3M", date(2025, 4, 11))
        );
    }

    #[test]
    fn test_fixing_on_valuation_date_optional() {
        let leg = libor_leg();
        let derivative = leg
            .to_derivative(date(2025, 1, 13), &DateDoubleTimeSeries::new())
            .unwrap();
        assert_eq!(derivative.len(), 4);
        assert!(matches!(derivative[0], PaymentDerivative::CouponIbor { .. }));
    }

    #[test]
    fn test_overnight_partially_fixed() {
        let leg = FloatingAnnuityDefinitionBuilder::new()
            .currency(Currency::USD)
            .start_date(date(2025, 1, 6))
            .end_date(date(2025, 1, 13))
            .day_count(DayCountConvention::Act360)
            .accrual_period_frequency(Tenor::ZERO)
            .notional(NotionalProvider::constant(1.0))
            .index(IndexON::new("SOFR", Currency::USD, DayCountConvention::Act360, 1))
            .build()
            .unwrap();
        let fixings = DateDoubleTimeSeries::from_pairs([
            (date(2025, 1, 6), 0.0432),
            (date(2025, 1, 7), 0.0431),
        ]);
        let derivative = leg.to_derivative(date(2025, 1, 8), &fixings).unwrap();
        match &derivative[0] {
            PaymentDerivative::CouponOn {
                accrued,
                fixing_period_factor,
                ..
            } => {
                assert_relative_eq!(
                    *accrued,
                    (1.0 + 0.0432 / 360.0) * (1.0 + 0.0431 / 360.0),
                    epsilon = 1e-15
                );
                assert_relative_eq!(*fixing_period_factor, 5.0 / 360.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_swap_uses_one_series_for_both_legs() {
        let fixings = vec![DateDoubleTimeSeries::from_pairs([(date(2025, 1, 13), 0.043)])];
        let pay = AnnuityDefinition::new(
            vec![Payment::Fixed(PaymentFixed::new(Currency::USD, date(2026, 1, 15), -1.0))],
            true,
            "X",
        )
        .unwrap();
        let swap = InstrumentDefinition::Swap(crate::swap::SwapDefinition::from_legs(pay, libor_leg()));
        match swap.to_derivative(date(2025, 2, 1), &fixings).unwrap() {
            InstrumentDerivative::Swap { pay_leg, receive_leg } => {
                assert_eq!(pay_leg.len(), 1);
                assert!(matches!(receive_leg[0], PaymentDerivative::CouponFixed { .. }));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
