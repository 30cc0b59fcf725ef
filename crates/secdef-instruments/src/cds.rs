//! Credit default swap definitions.

use serde::{Deserialize, Serialize};

use secdef_core::calendars::{BusinessDayConvention, Calendar};
use secdef_core::daycounts::DayCountConvention;
use secdef_core::types::StubType;
use secdef_core::{Currency, Date, Tenor};

use crate::bond::LegalEntity;
use crate::error::InstrumentResult;
use crate::schedule::{Schedule, ScheduleConfig};

/// One premium accrual period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdsPremiumPeriod {
    /// Accrual start.
    pub accrual_start: Date,
    /// Accrual end.
    pub accrual_end: Date,
    /// Payment date.
    pub payment_date: Date,
    /// Accrual year fraction.
    pub year_fraction: f64,
}

/// Inputs of a CDS.
#[derive(Debug, Clone, PartialEq)]
pub struct CdsTerms {
    /// Currency.
    pub currency: Currency,
    /// True when buying protection.
    pub buy_protection: bool,
    /// Protection start / first accrual date.
    pub start_date: Date,
    /// Maturity date.
    pub maturity_date: Date,
    /// Stub placement of the premium schedule.
    pub stub_type: StubType,
    /// Premium period.
    pub coupon_period: Tenor,
    /// Premium day count.
    pub day_count: DayCountConvention,
    /// Premium date adjustment.
    pub business_day_convention: BusinessDayConvention,
    /// Notional.
    pub notional: f64,
    /// Premium rate as a decimal.
    pub coupon: f64,
    /// Accrued premium paid on default.
    pub include_accrued_premium: bool,
    /// Protection starts at the beginning of the start day.
    pub protection_start: bool,
    /// Protection buyer.
    pub protection_buyer: LegalEntity,
    /// Protection seller.
    pub protection_seller: LegalEntity,
    /// Reference obligor.
    pub reference_entity: LegalEntity,
    /// Fixed recovery rate, if contractual.
    pub recovery_rate: Option<f64>,
    /// Upfront amount, if any.
    pub upfront_amount: Option<f64>,
}

/// A CDS: premium schedule and protection terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdsDefinition {
    /// Currency.
    pub currency: Currency,
    /// True when buying protection.
    pub buy_protection: bool,
    /// Protection start.
    pub protection_start_date: Date,
    /// Protection end.
    pub protection_end_date: Date,
    /// Notional.
    pub notional: f64,
    /// Premium rate.
    pub coupon: f64,
    /// Premium periods.
    pub premium: Vec<CdsPremiumPeriod>,
    /// Accrued premium paid on default.
    pub include_accrued_premium: bool,
    /// Protection starts at the beginning of the start day.
    pub protection_start: bool,
    /// Protection buyer.
    pub protection_buyer: LegalEntity,
    /// Protection seller.
    pub protection_seller: LegalEntity,
    /// Reference obligor.
    pub reference_entity: LegalEntity,
    /// Fixed recovery rate.
    pub recovery_rate: Option<f64>,
    /// Upfront amount.
    pub upfront_amount: Option<f64>,
    /// Calendar name.
    pub calendar_name: String,
}

impl CdsDefinition {
    /// Generates the premium schedule and builds the definition.
    ///
    /// Accrual dates are business-day adjusted except the last accrual end,
    /// which is the maturity date plus one day when protection starts at the
    /// beginning of the day.
    pub fn from_terms(terms: CdsTerms, calendar: &dyn Calendar) -> InstrumentResult<Self> {
        let config = ScheduleConfig::new(terms.start_date, terms.maturity_date, terms.coupon_period)
            .with_stub_type(terms.stub_type);
        let schedule = Schedule::generate(&config)?;
        let bdc = terms.business_day_convention;
        let count = schedule.period_count();
        let premium = schedule
            .periods()
            .enumerate()
            .map(|(i, (start, end))| {
                let accrual_start = calendar.adjust(start, bdc)?;
                let accrual_end = if i + 1 == count {
                    if terms.protection_start {
                        end.add_days(1)
                    } else {
                        end
                    }
                } else {
                    calendar.adjust(end, bdc)?
                };
                Ok(CdsPremiumPeriod {
                    accrual_start,
                    accrual_end,
                    payment_date: calendar.adjust(end, bdc)?,
                    year_fraction: terms.day_count.year_fraction_f64(accrual_start, accrual_end),
                })
            })
            .collect::<InstrumentResult<Vec<_>>>()?;
        Ok(Self {
            currency: terms.currency,
            buy_protection: terms.buy_protection,
            protection_start_date: terms.start_date,
            protection_end_date: terms.maturity_date,
            notional: terms.notional,
            coupon: terms.coupon,
            premium,
            include_accrued_premium: terms.include_accrued_premium,
            protection_start: terms.protection_start,
            protection_buyer: terms.protection_buyer,
            protection_seller: terms.protection_seller,
            reference_entity: terms.reference_entity,
            recovery_rate: terms.recovery_rate,
            upfront_amount: terms.upfront_amount,
            calendar_name: calendar.name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secdef_core::calendars::WeekendCalendar;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_standard_quarterly_premium() {
        let cds = CdsDefinition::from_terms(
            CdsTerms {
                currency: Currency::USD,
                buy_protection: true,
                start_date: date(2025, 3, 20),
                maturity_date: date(2026, 6, 20),
                stub_type: StubType::ShortStart,
                coupon_period: Tenor::Months(3),
                day_count: DayCountConvention::Act360,
                business_day_convention: BusinessDayConvention::Following,
                notional: 10_000_000.0,
                coupon: 0.01,
                include_accrued_premium: true,
                protection_start: true,
                protection_buyer: LegalEntity::named("BUYER"),
                protection_seller: LegalEntity::named("SELLER"),
                reference_entity: LegalEntity::named("ACME"),
                recovery_rate: None,
                upfront_amount: None,
            },
            &WeekendCalendar,
        )
        .unwrap();
        assert_eq!(cds.premium.len(), 5);
        // 2025-09-20 is a Saturday.
        assert_eq!(cds.premium[1].accrual_end, date(2025, 9, 22));
        assert_eq!(cds.premium[2].accrual_start, date(2025, 9, 22));
        let last = cds.premium.last().unwrap();
        assert_eq!(last.accrual_end, date(2026, 6, 21));
        // 2026-06-20 is a Saturday.
        assert_eq!(last.payment_date, date(2026, 6, 22));
    }
}
