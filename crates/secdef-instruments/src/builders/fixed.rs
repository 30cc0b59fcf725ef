//! Fixed-rate annuity builder.

use tracing::debug;

use crate::annuity::AnnuityDefinition;
use crate::error::{InstrumentError, InstrumentResult};
use crate::payment::{CouponFixed, CouponFixedAccruedCompounding, CouponPeriod, Payment};

use super::LegParameters;

/// Business days per year for business-day accrual.
pub const BUSINESS_DAYS_PER_YEAR: f64 = 252.0;

/// Builder for fixed-rate annuities.
///
/// # Example
///
/// ```rust
/// use secdef_core::daycounts::DayCountConvention;
/// use secdef_core::{Currency, Date, Tenor};
/// use secdef_instruments::builders::FixedAnnuityDefinitionBuilder;
/// use secdef_instruments::NotionalProvider;
///
/// let annuity = FixedAnnuityDefinitionBuilder::new()
///     .payer(true)
///     .currency(Currency::USD)
///     .start_date(Date::from_ymd(2025, 1, 15).unwrap())
///     .end_date(Date::from_ymd(2027, 1, 15).unwrap())
///     .day_count(DayCountConvention::Thirty360US)
///     .accrual_period_frequency(Tenor::Months(6))
///     .notional(NotionalProvider::constant(-1_000_000.0))
///     .rate(0.035)
///     .build()
///     .unwrap();
/// assert_eq!(annuity.len(), 4);
/// assert!(annuity.all_fixed());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixedAnnuityDefinitionBuilder {
    pub(crate) common: LegParameters,
    rate: Option<f64>,
    accrued_compounding: bool,
}

super::leg_setters!(FixedAnnuityDefinitionBuilder);

impl FixedAnnuityDefinitionBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the coupon rate.
    #[must_use]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Compounds the rate over business days / 252 instead of accruing simply.
    #[must_use]
    pub fn accrued_compounding(mut self, compounding: bool) -> Self {
        self.accrued_compounding = compounding;
        self
    }

    /// Builds the annuity.
    pub fn build(self) -> InstrumentResult<AnnuityDefinition> {
        let rate = self
            .rate
            .ok_or_else(|| InstrumentError::missing_field("rate"))?;
        let currency = self.common.currency()?;
        let periods = self.common.accrual_periods()?;
        let accrual_calendar = self.common.accrual().calendar;

        let mut payments = Vec::with_capacity(periods.len() + 2);
        let (initial, last) = self.common.notional_exchanges(&periods)?;
        payments.extend(initial);
        for period in &periods {
            let coupon_rate = period
                .stub(&self.common)
                .and_then(|stub| stub.rate())
                .unwrap_or(rate);
            let year_fraction = if self.accrued_compounding {
                f64::from(
                    accrual_calendar.business_days_between(period.accrual_start, period.accrual_end),
                ) / BUSINESS_DAYS_PER_YEAR
            } else {
                period.year_fraction
            };
            let coupon_period = CouponPeriod {
                currency,
                payment_date: period.payment_date,
                accrual_start: period.accrual_start,
                accrual_end: period.accrual_end,
                payment_year_fraction: year_fraction,
                notional: period.notional,
            };
            payments.push(if self.accrued_compounding {
                Payment::CouponFixedAccruedCompounding(CouponFixedAccruedCompounding {
                    period: coupon_period,
                    rate: coupon_rate,
                })
            } else {
                Payment::CouponFixed(CouponFixed {
                    period: coupon_period,
                    rate: coupon_rate,
                })
            });
        }
        payments.extend(last);

        debug!(
            coupons = periods.len(),
            currency = %currency,
            payer = self.common.payer,
            "built fixed annuity"
        );
        AnnuityDefinition::new(payments, self.common.payer, self.common.calendar_name())
    }
}
