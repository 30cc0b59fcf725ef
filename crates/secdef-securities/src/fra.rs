//! Forward rate agreements.

use serde::{Deserialize, Serialize};

use secdef_core::calendars::BusinessDayConvention;
use secdef_core::daycounts::DayCountConvention;
use secdef_core::{Currency, Date, Frequency};

use crate::ids::{ExternalId, ExternalIdBundle};

/// A forward rate agreement on a term IBOR index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardRateAgreementSecurity {
    /// Display name.
    pub name: String,
    /// Identifiers of the FRA.
    #[serde(default)]
    pub ids: ExternalIdBundle,
    /// Currency.
    pub currency: Currency,
    /// Fixing calendars.
    #[serde(default)]
    pub calendars: Vec<ExternalId>,
    /// Payment calendars; the fixing calendars apply when empty.
    #[serde(default)]
    pub payment_calendars: Vec<ExternalId>,
    /// Accrual start.
    pub start_date: Date,
    /// Accrual end.
    pub end_date: Date,
    /// Fixing date; derived from the start date and lag when absent.
    #[serde(default)]
    pub fixing_date: Option<Date>,
    /// Contract rate.
    pub rate: f64,
    /// Notional amount.
    pub amount: f64,
    /// Underlying index identifier.
    pub underlying_id: ExternalId,
    /// Index tenor as a frequency.
    pub index_frequency: Frequency,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Convention used to adjust fixing and payment dates.
    #[serde(default)]
    pub fixing_business_day_convention: BusinessDayConvention,
    /// Fixing lag in business days before the start date.
    #[serde(default)]
    pub fixing_lag: Option<i32>,
}

impl ForwardRateAgreementSecurity {
    /// Calendars used for payment adjustment.
    pub fn effective_payment_calendars(&self) -> &[ExternalId] {
        if self.payment_calendars.is_empty() {
            &self.calendars
        } else {
            &self.payment_calendars
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::financial_region_id;

    #[test]
    fn test_payment_calendars_fall_back_to_fixing_calendars() {
        let d = |m, day| Date::from_ymd(2025, m, day).unwrap();
        let mut fra = ForwardRateAgreementSecurity {
            name: "USD 3x6".into(),
            ids: ExternalIdBundle::default(),
            currency: Currency::USD,
            calendars: vec![financial_region_id("US")],
            payment_calendars: Vec::new(),
            start_date: d(4, 15),
            end_date: d(7, 15),
            fixing_date: None,
            rate: 0.04,
            amount: 1e7,
            underlying_id: ExternalId::of("TICKER", "USDLIBOR3M"),
            index_frequency: Frequency::Quarterly,
            day_count: DayCountConvention::Act360,
            fixing_business_day_convention: BusinessDayConvention::ModifiedFollowing,
            fixing_lag: Some(2),
        };
        assert_eq!(fra.effective_payment_calendars(), &[financial_region_id("US")]);
        fra.payment_calendars = vec![financial_region_id("GB")];
        assert_eq!(fra.effective_payment_calendars(), &[financial_region_id("GB")]);
    }
}
