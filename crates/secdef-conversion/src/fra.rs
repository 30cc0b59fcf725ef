//! Conversion of forward rate agreements.

use tracing::debug;

use secdef_instruments::fra::FraTerms;
use secdef_instruments::ForwardRateAgreementDefinition;
use secdef_securities::fra::ForwardRateAgreementSecurity;
use secdef_securities::swap::FloatingRateType;
use secdef_traits::ReferenceDataProvider;

use crate::annuity_utils::joint_calendar;
use crate::error::ConversionResult;
use crate::index::ibor_index;

/// Converts [`ForwardRateAgreementSecurity`] into a definition.
///
/// The fixing date, when not given, is the index spot lag (or the
/// security's own lag) before the start date on the fixing calendars. The
/// payment date is the start date adjusted on the payment calendars.
#[derive(Debug, Clone)]
pub struct ForwardRateAgreementSecurityConverter {
    provider: ReferenceDataProvider,
}

impl ForwardRateAgreementSecurityConverter {
    /// Creates a converter over `provider`.
    pub fn new(provider: ReferenceDataProvider) -> Self {
        Self { provider }
    }

    /// Converts `security`.
    pub fn convert(
        &self,
        security: &ForwardRateAgreementSecurity,
    ) -> ConversionResult<ForwardRateAgreementDefinition> {
        let index = ibor_index(&self.provider, &security.underlying_id, FloatingRateType::Ibor)?;
        let holidays = self.provider.holidays.as_ref();
        let fixing_calendar = joint_calendar(holidays, &security.calendars)?;
        let payment_calendar = joint_calendar(holidays, security.effective_payment_calendars())?;
        let convention = security.fixing_business_day_convention;

        let fixing_date = match security.fixing_date {
            Some(date) => date,
            None => {
                let lag = security.fixing_lag.unwrap_or(index.spot_lag);
                let unadjusted = fixing_calendar.add_business_days(security.start_date, -lag);
                fixing_calendar.adjust(unadjusted, convention)?
            }
        };
        let payment_date = payment_calendar.adjust(security.start_date, convention)?;
        debug!(fra = %security.name, %fixing_date, %payment_date, "resolved FRA dates");

        let terms = FraTerms {
            currency: security.currency,
            payment_date,
            accrual_start: security.start_date,
            accrual_end: security.end_date,
            day_count: security.day_count,
            notional: security.amount,
            fixing_date,
            index,
            rate: security.rate,
        };
        Ok(ForwardRateAgreementDefinition::from_terms(terms, fixing_calendar.as_ref())?)
    }
}
