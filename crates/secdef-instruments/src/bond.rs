//! Bond, bill and bond-future definitions.
//!
//! Bond coupons carry a notional of one; transactions scale by quantity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use secdef_core::calendars::{BusinessDayConvention, Calendar, RollDateAdjuster};
use secdef_core::daycounts::DayCountConvention;
use secdef_core::types::{StubType, YieldConvention};
use secdef_core::{Currency, Date, Tenor};

use crate::error::{InstrumentError, InstrumentResult};
use crate::index::IndexPrice;
use crate::payment::{CouponFixed, CouponPeriod, PaymentFixed};
use crate::schedule::{Schedule, ScheduleConfig};

/// An issuer or obligor as seen by analytics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegalEntity {
    /// Short name or ticker.
    pub short_name: String,
    /// Ratings by agency.
    #[serde(default)]
    pub ratings: BTreeMap<String, String>,
    /// Industry sector.
    #[serde(default)]
    pub sector: Option<String>,
    /// Region code.
    #[serde(default)]
    pub region: Option<String>,
}

impl LegalEntity {
    /// An entity known only by name.
    #[must_use]
    pub fn named(short_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            ..Self::default()
        }
    }
}

/// Coupon schedule from first accrual to maturity with a short first stub
/// ending on the first coupon date.
fn coupon_schedule(
    first_accrual: Date,
    first_coupon: Date,
    maturity: Date,
    period: Tenor,
    end_of_month: bool,
) -> InstrumentResult<Schedule> {
    let roll = if end_of_month && maturity.is_end_of_month() {
        RollDateAdjuster::EndOfMonth
    } else {
        RollDateAdjuster::Identity
    };
    let config = ScheduleConfig::new(first_accrual, maturity, period)
        .with_stub_type(StubType::ShortStart)
        .with_first_stub_date(Some(first_coupon))
        .with_roll(roll);
    Schedule::generate(&config)
}

// =============================================================================
// FIXED COUPON BONDS
// =============================================================================

/// Inputs of a fixed coupon bond.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedBondTerms {
    /// Display name.
    pub name: String,
    /// Currency.
    pub currency: Currency,
    /// Date interest starts accruing.
    pub first_accrual_date: Date,
    /// First coupon date.
    pub first_coupon_date: Date,
    /// Maturity date.
    pub maturity_date: Date,
    /// Coupon period.
    pub payment_period: Tenor,
    /// Coupon rate as a decimal.
    pub rate: f64,
    /// Settlement lag in business days.
    pub settlement_days: i32,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Payment date adjustment.
    pub business_day_convention: BusinessDayConvention,
    /// Yield convention.
    pub yield_convention: YieldConvention,
    /// End-of-month rule.
    pub end_of_month: bool,
    /// Issuer.
    pub issuer: LegalEntity,
}

/// A fixed coupon bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondFixedSecurityDefinition {
    /// Display name.
    pub name: String,
    /// Currency.
    pub currency: Currency,
    /// Coupons with unit notional.
    pub coupons: Vec<CouponFixed>,
    /// Redemption of unit notional.
    pub nominal: PaymentFixed,
    /// Settlement lag in business days.
    pub settlement_days: i32,
    /// Calendar name.
    pub calendar_name: String,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Yield convention.
    pub yield_convention: YieldConvention,
    /// End-of-month rule.
    pub end_of_month: bool,
    /// Issuer.
    pub issuer: LegalEntity,
}

impl BondFixedSecurityDefinition {
    /// Generates the coupons of a fixed coupon bond.
    pub fn from_terms(terms: FixedBondTerms, calendar: &dyn Calendar) -> InstrumentResult<Self> {
        let schedule = coupon_schedule(
            terms.first_accrual_date,
            terms.first_coupon_date,
            terms.maturity_date,
            terms.payment_period,
            terms.end_of_month,
        )?;
        let coupons = schedule
            .periods()
            .map(|(start, end)| {
                Ok(CouponFixed {
                    period: CouponPeriod {
                        currency: terms.currency,
                        payment_date: calendar.adjust(end, terms.business_day_convention)?,
                        accrual_start: start,
                        accrual_end: end,
                        payment_year_fraction: terms.day_count.year_fraction_f64(start, end),
                        notional: 1.0,
                    },
                    rate: terms.rate,
                })
            })
            .collect::<InstrumentResult<Vec<_>>>()?;
        let redemption = calendar.adjust(terms.maturity_date, terms.business_day_convention)?;
        Ok(Self {
            name: terms.name,
            currency: terms.currency,
            coupons,
            nominal: PaymentFixed::new(terms.currency, redemption, 1.0),
            settlement_days: terms.settlement_days,
            calendar_name: calendar.name().to_string(),
            day_count: terms.day_count,
            yield_convention: terms.yield_convention,
            end_of_month: terms.end_of_month,
            issuer: terms.issuer,
        })
    }

    /// Maturity (last payment) date.
    pub fn maturity_date(&self) -> Date {
        self.nominal.payment_date
    }
}

/// A position in a fixed coupon bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondFixedTransactionDefinition {
    /// Bond.
    pub underlying: BondFixedSecurityDefinition,
    /// Signed quantity.
    pub quantity: f64,
    /// Settlement instant.
    pub settlement: DateTime<Utc>,
    /// Traded price.
    pub price: f64,
}

// =============================================================================
// BILLS
// =============================================================================

/// A discount bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillSecurityDefinition {
    /// Display name.
    pub name: String,
    /// Currency.
    pub currency: Currency,
    /// Maturity date.
    pub end_date: Date,
    /// Notional.
    pub notional: f64,
    /// Settlement lag in business days.
    pub settlement_days: i32,
    /// Calendar name.
    pub calendar_name: String,
    /// Yield convention.
    pub yield_convention: YieldConvention,
    /// Day count.
    pub day_count: DayCountConvention,
    /// Issuer.
    pub issuer: LegalEntity,
}

/// A position in a bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillTransactionDefinition {
    /// Bill.
    pub underlying: BillSecurityDefinition,
    /// Signed quantity.
    pub quantity: f64,
    /// Settlement instant.
    pub settlement: DateTime<Utc>,
    /// Amount paid at settlement, negative for purchases.
    pub settlement_amount: f64,
}

// =============================================================================
// CAPITAL-INDEXED BONDS
// =============================================================================

/// How the reference index value of a date is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexationMethod {
    /// Index value of the reference month.
    Monthly,
    /// Linear interpolation between consecutive monthly values.
    Interpolated,
}

/// A coupon whose notional is indexed to a price index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedCoupon {
    /// Payment date.
    pub payment_date: Date,
    /// Accrual start.
    pub accrual_start: Date,
    /// Accrual end.
    pub accrual_end: Date,
    /// Accrual year fraction; zero for the redemption.
    pub year_fraction: f64,
    /// Real notional.
    pub notional: f64,
    /// Real rate; one for the redemption.
    pub real_rate: f64,
    /// Date whose index value indexes the payment.
    pub reference_end_date: Date,
}

/// Inputs of a capital-indexed bond.
#[derive(Debug, Clone, PartialEq)]
pub struct InflationBondTerms {
    /// Display name.
    pub name: String,
    /// Currency.
    pub currency: Currency,
    /// Reference index.
    pub price_index: IndexPrice,
    /// Index lookup method.
    pub method: IndexationMethod,
    /// Indexation lag in months.
    pub monthly_lag: i32,
    /// Index value at issue.
    pub index_start_value: f64,
    /// Date interest starts accruing.
    pub first_accrual_date: Date,
    /// First coupon date.
    pub first_coupon_date: Date,
    /// Maturity date.
    pub maturity_date: Date,
    /// Coupon period.
    pub payment_period: Tenor,
    /// Real coupon rate as a decimal.
    pub real_rate: f64,
    /// Settlement lag in business days.
    pub settlement_days: i32,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Payment date adjustment.
    pub business_day_convention: BusinessDayConvention,
    /// Yield convention.
    pub yield_convention: YieldConvention,
    /// End-of-month rule.
    pub end_of_month: bool,
    /// Issuer.
    pub issuer: LegalEntity,
}

/// A capital-indexed (inflation) bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondCapitalIndexedSecurityDefinition {
    /// Display name.
    pub name: String,
    /// Currency.
    pub currency: Currency,
    /// Reference index.
    pub price_index: IndexPrice,
    /// Index lookup method.
    pub method: IndexationMethod,
    /// Indexation lag in months.
    pub monthly_lag: i32,
    /// Index value at issue.
    pub index_start_value: f64,
    /// Coupons with unit real notional.
    pub coupons: Vec<IndexedCoupon>,
    /// Indexed redemption.
    pub nominal: IndexedCoupon,
    /// Settlement lag in business days.
    pub settlement_days: i32,
    /// Calendar name.
    pub calendar_name: String,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Yield convention.
    pub yield_convention: YieldConvention,
    /// Issuer.
    pub issuer: LegalEntity,
}

impl BondCapitalIndexedSecurityDefinition {
    /// Generates the indexed coupons of an inflation bond.
    pub fn from_terms(terms: InflationBondTerms, calendar: &dyn Calendar) -> InstrumentResult<Self> {
        let schedule = coupon_schedule(
            terms.first_accrual_date,
            terms.first_coupon_date,
            terms.maturity_date,
            terms.payment_period,
            terms.end_of_month,
        )?;
        let reference = |date: Date| -> InstrumentResult<Date> {
            let lagged = date.add_months(-terms.monthly_lag)?;
            Ok(match terms.method {
                IndexationMethod::Monthly => lagged.start_of_month(),
                IndexationMethod::Interpolated => lagged,
            })
        };
        let coupons = schedule
            .periods()
            .map(|(start, end)| {
                Ok(IndexedCoupon {
                    payment_date: calendar.adjust(end, terms.business_day_convention)?,
                    accrual_start: start,
                    accrual_end: end,
                    year_fraction: terms.day_count.year_fraction_f64(start, end),
                    notional: 1.0,
                    real_rate: terms.real_rate,
                    reference_end_date: reference(end)?,
                })
            })
            .collect::<InstrumentResult<Vec<_>>>()?;
        let nominal = IndexedCoupon {
            payment_date: calendar.adjust(terms.maturity_date, terms.business_day_convention)?,
            accrual_start: terms.first_accrual_date,
            accrual_end: terms.maturity_date,
            year_fraction: 0.0,
            notional: 1.0,
            real_rate: 1.0,
            reference_end_date: reference(terms.maturity_date)?,
        };
        Ok(Self {
            name: terms.name,
            currency: terms.currency,
            price_index: terms.price_index,
            method: terms.method,
            monthly_lag: terms.monthly_lag,
            index_start_value: terms.index_start_value,
            coupons,
            nominal,
            settlement_days: terms.settlement_days,
            calendar_name: calendar.name().to_string(),
            day_count: terms.day_count,
            yield_convention: terms.yield_convention,
            issuer: terms.issuer,
        })
    }
}

/// A position in a capital-indexed bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondCapitalIndexedTransactionDefinition {
    /// Bond.
    pub underlying: BondCapitalIndexedSecurityDefinition,
    /// Signed quantity.
    pub quantity: f64,
    /// Settlement instant.
    pub settlement: DateTime<Utc>,
    /// Traded price.
    pub price: f64,
}

// =============================================================================
// BOND FUTURES
// =============================================================================

/// A bond future with its deliverable basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondFuturesSecurityDefinition {
    /// Display name.
    pub name: String,
    /// Currency.
    pub currency: Currency,
    /// Last trading date.
    pub last_trading_date: Date,
    /// First notice date.
    pub first_notice_date: Date,
    /// Last notice date.
    pub last_notice_date: Date,
    /// Contract notional.
    pub notional: f64,
    /// Deliverable bonds.
    pub basket: Vec<BondFixedSecurityDefinition>,
    /// Conversion factor of each deliverable.
    pub conversion_factors: Vec<f64>,
}

impl BondFuturesSecurityDefinition {
    /// Creates a bond future.
    ///
    /// Fails if the basket is empty or the factors don't match it.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        currency: Currency,
        last_trading_date: Date,
        first_notice_date: Date,
        last_notice_date: Date,
        notional: f64,
        basket: Vec<BondFixedSecurityDefinition>,
        conversion_factors: Vec<f64>,
    ) -> InstrumentResult<Self> {
        if basket.is_empty() {
            return Err(InstrumentError::invalid_definition(
                "Bond future basket is empty",
            ));
        }
        if basket.len() != conversion_factors.len() {
            return Err(InstrumentError::invalid_definition(format!(
                "Bond future has {} deliverables but {} conversion factors",
                basket.len(),
                conversion_factors.len()
            )));
        }
        Ok(Self {
            name: name.into(),
            currency,
            last_trading_date,
            first_notice_date,
            last_notice_date,
            notional,
            basket,
            conversion_factors,
        })
    }
}

/// A position in a bond future.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondFuturesTransactionDefinition {
    /// Future.
    pub underlying: BondFuturesSecurityDefinition,
    /// Number of contracts.
    pub quantity: i64,
    /// Trade instant.
    pub trade_date: DateTime<Utc>,
    /// Traded price.
    pub trade_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use secdef_core::calendars::WeekendCalendar;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn treasury_terms() -> FixedBondTerms {
        FixedBondTerms {
            name: "T 4 02/15/30".into(),
            currency: Currency::USD,
            first_accrual_date: date(2025, 2, 15),
            first_coupon_date: date(2025, 8, 15),
            maturity_date: date(2030, 2, 15),
            payment_period: Tenor::Months(6),
            rate: 0.04,
            settlement_days: 1,
            day_count: DayCountConvention::ActActIsda,
            business_day_convention: BusinessDayConvention::Following,
            yield_convention: YieldConvention::StreetConvention,
            end_of_month: false,
            issuer: LegalEntity::named("US TREASURY N/B"),
        }
    }

    #[test]
    fn test_fixed_bond_schedule() {
        let bond =
            BondFixedSecurityDefinition::from_terms(treasury_terms(), &WeekendCalendar).unwrap();
        assert_eq!(bond.coupons.len(), 10);
        assert_eq!(bond.coupons[0].period.accrual_end, date(2025, 8, 15));
        // 2026-02-15 is a Sunday.
        assert_eq!(bond.coupons[1].period.payment_date, date(2026, 2, 16));
        assert_eq!(bond.coupons[1].period.accrual_end, date(2026, 2, 15));
        assert_relative_eq!(bond.nominal.amount, 1.0);
        assert_eq!(bond.maturity_date(), date(2030, 2, 15));
    }

    #[test]
    fn test_short_first_coupon() {
        let mut terms = treasury_terms();
        terms.first_accrual_date = date(2025, 4, 1);
        let bond = BondFixedSecurityDefinition::from_terms(terms, &WeekendCalendar).unwrap();
        assert_eq!(bond.coupons.len(), 10);
        assert_eq!(bond.coupons[0].period.accrual_start, date(2025, 4, 1));
        assert!(bond.coupons[0].period.payment_year_fraction < 0.5);
    }

    #[test]
    fn test_monthly_indexation_reference_dates() {
        let terms = InflationBondTerms {
            name: "TII 2 01/15/26".into(),
            currency: Currency::USD,
            price_index: IndexPrice::new("CPURNSA", Currency::USD),
            method: IndexationMethod::Monthly,
            monthly_lag: 3,
            index_start_value: 198.47742,
            first_accrual_date: date(2016, 1, 15),
            first_coupon_date: date(2016, 7, 15),
            maturity_date: date(2026, 1, 15),
            payment_period: Tenor::Months(6),
            real_rate: 0.02,
            settlement_days: 1,
            day_count: DayCountConvention::ActActIsda,
            business_day_convention: BusinessDayConvention::Following,
            yield_convention: YieldConvention::UsTreasuryEquivalent,
            end_of_month: false,
            issuer: LegalEntity::named("US TREASURY N/B"),
        };
        let bond = BondCapitalIndexedSecurityDefinition::from_terms(terms, &WeekendCalendar).unwrap();
        assert_eq!(bond.coupons.len(), 20);
        assert_eq!(bond.coupons[0].reference_end_date, date(2016, 4, 1));
        assert_eq!(bond.nominal.reference_end_date, date(2025, 10, 1));
    }

    #[test]
    fn test_future_basket_validation() {
        let bond =
            BondFixedSecurityDefinition::from_terms(treasury_terms(), &WeekendCalendar).unwrap();
        let err = BondFuturesSecurityDefinition::new(
            "TYH6",
            Currency::USD,
            date(2026, 3, 20),
            date(2026, 2, 27),
            date(2026, 3, 31),
            100_000.0,
            vec![bond],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, InstrumentError::InvalidDefinition { .. }));
    }
}
