//! Forward rate agreement definitions.

use serde::{Deserialize, Serialize};

use secdef_core::calendars::Calendar;
use secdef_core::daycounts::DayCountConvention;
use secdef_core::{Currency, Date};

use crate::error::InstrumentResult;
use crate::index::IborIndex;

/// Inputs of a forward rate agreement.
#[derive(Debug, Clone, PartialEq)]
pub struct FraTerms {
    /// Currency.
    pub currency: Currency,
    /// Settlement (payment) date.
    pub payment_date: Date,
    /// Accrual start.
    pub accrual_start: Date,
    /// Accrual end.
    pub accrual_end: Date,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Signed notional.
    pub notional: f64,
    /// Fixing date.
    pub fixing_date: Date,
    /// Index.
    pub index: IborIndex,
    /// Contract rate as a decimal.
    pub rate: f64,
}

/// A forward rate agreement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardRateAgreementDefinition {
    /// Currency.
    pub currency: Currency,
    /// Settlement (payment) date.
    pub payment_date: Date,
    /// Accrual start.
    pub accrual_start: Date,
    /// Accrual end.
    pub accrual_end: Date,
    /// Accrual year fraction.
    pub payment_year_fraction: f64,
    /// Signed notional.
    pub notional: f64,
    /// Fixing date.
    pub fixing_date: Date,
    /// Index.
    pub index: IborIndex,
    /// Contract rate.
    pub rate: f64,
    /// Start of the fixing deposit.
    pub fixing_period_start: Date,
    /// End of the fixing deposit.
    pub fixing_period_end: Date,
    /// Fixing deposit year fraction.
    pub fixing_year_fraction: f64,
}

impl ForwardRateAgreementDefinition {
    /// Creates a FRA, deriving the fixing deposit on `fixing_calendar`.
    pub fn from_terms(terms: FraTerms, fixing_calendar: &dyn Calendar) -> InstrumentResult<Self> {
        let (fixing_period_start, fixing_period_end, fixing_year_fraction) =
            terms.index.fixing_period(terms.fixing_date, fixing_calendar)?;
        Ok(Self {
            currency: terms.currency,
            payment_date: terms.payment_date,
            accrual_start: terms.accrual_start,
            accrual_end: terms.accrual_end,
            payment_year_fraction: terms.day_count.year_fraction_f64(terms.accrual_start, terms.accrual_end),
            notional: terms.notional,
            fixing_date: terms.fixing_date,
            index: terms.index,
            rate: terms.rate,
            fixing_period_start,
            fixing_period_end,
            fixing_year_fraction,
        })
    }

    /// Settlement amount for a realised fixing, discounted over the accrual period.
    pub fn settlement_amount(&self, fixing: f64) -> f64 {
        let yf = self.payment_year_fraction;
        self.notional * yf * (fixing - self.rate) / (1.0 + yf * fixing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use secdef_core::calendars::{BusinessDayConvention, WeekendCalendar};
    use secdef_core::Tenor;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_fra_3x6() {
        let fra = ForwardRateAgreementDefinition::from_terms(
            FraTerms {
                currency: Currency::USD,
                payment_date: date(2025, 4, 15),
                accrual_start: date(2025, 4, 15),
                accrual_end: date(2025, 7, 15),
                day_count: DayCountConvention::Act360,
                notional: 10_000_000.0,
                fixing_date: date(2025, 4, 11),
                index: IborIndex::new(
                    "USDLIBOR3M",
                    Currency::USD,
                    Tenor::Months(3),
                    2,
                    DayCountConvention::Act360,
                    BusinessDayConvention::ModifiedFollowing,
                    false,
                ),
                rate: 0.045,
            },
            &WeekendCalendar,
        )
        .unwrap();
        assert_eq!(fra.fixing_period_start, date(2025, 4, 15));
        assert_eq!(fra.fixing_period_end, date(2025, 7, 15));
        assert_relative_eq!(fra.payment_year_fraction, 91.0 / 360.0);
        assert_relative_eq!(fra.settlement_amount(0.045), 0.0);
        assert!(fra.settlement_amount(0.05) > 0.0);
    }
}
