//! Floating-rate annuity builder.

use tracing::debug;

use secdef_core::calendars::Calendar;
use secdef_core::types::StubType;
use secdef_core::{Date, Tenor};

use crate::annuity::AnnuityDefinition;
use crate::error::{InstrumentError, InstrumentResult};
use crate::index::{IborIndex, Index, IndexON};
use crate::payment::{
    CompoundingSubPeriod, CouponFixed, CouponIbor, CouponIborCompounding,
    CouponIborInterpolatedStub, CouponOn, CouponPeriod, IborCompoundingMethod, Payment,
};
use crate::schedule::{Schedule, ScheduleConfig};

use super::{AccrualPeriod, Adjustment, LegParameters};

/// Builder for IBOR and overnight annuities.
#[derive(Debug, Clone, Default)]
pub struct FloatingAnnuityDefinitionBuilder {
    pub(crate) common: LegParameters,
    index: Option<Index>,
    spread: f64,
    initial_rate: Option<f64>,
    compounding: Option<IborCompoundingMethod>,
    arithmetic_average: bool,
    reset_tenor: Option<Tenor>,
    reset_relative_to_end: bool,
    reset: Option<Adjustment>,
    fixing: Option<Adjustment>,
    fixing_offset: Option<i32>,
}

super::leg_setters!(FloatingAnnuityDefinitionBuilder);

impl FloatingAnnuityDefinitionBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the index.
    #[must_use]
    pub fn index(mut self, index: impl Into<Index>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Sets the spread over the index.
    #[must_use]
    pub fn spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    /// Fixes the first coupon at a known rate.
    #[must_use]
    pub fn initial_rate(mut self, rate: Option<f64>) -> Self {
        self.initial_rate = rate;
        self
    }

    /// Compounds IBOR fixings over reset sub-periods.
    #[must_use]
    pub fn compounding_method(mut self, method: Option<IborCompoundingMethod>) -> Self {
        self.compounding = method;
        self
    }

    /// Averages overnight fixings arithmetically instead of compounding them.
    #[must_use]
    pub fn arithmetic_average(mut self, average: bool) -> Self {
        self.arithmetic_average = average;
        self
    }

    /// Sets the reset period for compounded coupons.
    #[must_use]
    pub fn reset_frequency(mut self, tenor: Tenor) -> Self {
        self.reset_tenor = Some(tenor);
        self
    }

    /// Resets at the end of each period (in arrears).
    #[must_use]
    pub fn reset_relative_to_end(mut self, in_arrears: bool) -> Self {
        self.reset_relative_to_end = in_arrears;
        self
    }

    /// Sets the reset date adjustment.
    #[must_use]
    pub fn reset_date_adjustment(
        mut self,
        calendar: std::sync::Arc<dyn Calendar>,
        convention: secdef_core::calendars::BusinessDayConvention,
    ) -> Self {
        self.reset = Some(Adjustment {
            calendar,
            convention,
        });
        self
    }

    /// Sets the fixing calendar and convention.
    #[must_use]
    pub fn fixing_date_adjustment(
        mut self,
        calendar: std::sync::Arc<dyn Calendar>,
        convention: secdef_core::calendars::BusinessDayConvention,
    ) -> Self {
        self.fixing = Some(Adjustment {
            calendar,
            convention,
        });
        self
    }

    /// Sets the fixing lag in business days from the reset date.
    ///
    /// Defaults to minus the index spot lag.
    #[must_use]
    pub fn fixing_offset(mut self, days: i32) -> Self {
        self.fixing_offset = Some(days);
        self
    }

    /// Builds the annuity.
    pub fn build(self) -> InstrumentResult<AnnuityDefinition> {
        let index = self
            .index
            .clone()
            .ok_or_else(|| InstrumentError::missing_field("index"))?;
        let currency = self.common.currency()?;
        let periods = self.common.accrual_periods()?;

        let mut payments = Vec::with_capacity(periods.len() + 2);
        let (initial, last) = self.common.notional_exchanges(&periods)?;
        payments.extend(initial);
        for period in &periods {
            let coupon_period = CouponPeriod {
                currency,
                payment_date: period.payment_date,
                accrual_start: period.accrual_start,
                accrual_end: period.accrual_end,
                payment_year_fraction: period.year_fraction,
                notional: period.notional,
            };
            if let Some(rate) = self.fixed_rate_for(period) {
                payments.push(Payment::CouponFixed(CouponFixed {
                    period: coupon_period,
                    rate,
                }));
                continue;
            }
            let coupon = match &index {
                Index::Ibor(ibor) => self.ibor_coupon(ibor, period, coupon_period)?,
                Index::Overnight(on) => self.overnight_coupon(on, coupon_period),
            };
            payments.push(coupon);
        }
        payments.extend(last);

        debug!(
            index = index.name(),
            coupons = periods.len(),
            payer = self.common.payer,
            "built floating annuity"
        );
        AnnuityDefinition::new(payments, self.common.payer, self.common.calendar_name())
    }

    fn fixed_rate_for(&self, period: &AccrualPeriod) -> Option<f64> {
        if period.is_first {
            if let Some(rate) = self.initial_rate {
                return Some(rate);
            }
        }
        period.stub(&self.common).and_then(|stub| stub.rate())
    }

    fn fixing(&self) -> Adjustment {
        self.fixing.clone().unwrap_or_else(|| self.common.accrual())
    }

    /// Fixing date, deposit start, deposit end and deposit fraction.
    fn ibor_fixing(&self, index: &IborIndex, reset_date: Date) -> InstrumentResult<(Date, Date, Date, f64)> {
        let fixing = self.fixing();
        let reset = match &self.reset {
            Some(adjustment) => adjustment.adjust(reset_date)?,
            None => reset_date,
        };
        let offset = self.fixing_offset.unwrap_or(-index.spot_lag);
        let fixing_date = fixing.adjust(fixing.calendar.add_business_days(reset, offset))?;
        let (deposit_start, deposit_end, fraction) =
            index.fixing_period(fixing_date, fixing.calendar.as_ref())?;
        Ok((fixing_date, deposit_start, deposit_end, fraction))
    }

    fn reset_date(&self, start: Date, end: Date) -> Date {
        if self.reset_relative_to_end {
            end
        } else {
            start
        }
    }

    fn ibor_coupon(
        &self,
        index: &IborIndex,
        period: &AccrualPeriod,
        coupon_period: CouponPeriod,
    ) -> InstrumentResult<Payment> {
        let reset = self.reset_date(period.accrual_start, period.accrual_end);

        if let Some((first, second)) = period.stub(&self.common).and_then(|s| s.indices()) {
            let (fixing_date, ..) = self.ibor_fixing(first, reset)?;
            return Ok(Payment::CouponIborInterpolatedStub(CouponIborInterpolatedStub {
                weight: interpolation_weight(first, second, period)?,
                period: coupon_period,
                fixing_date,
                first_index: first.clone(),
                second_index: second.clone(),
                spread: self.spread,
            }));
        }

        if let (Some(method), Some(reset_tenor)) = (self.compounding, self.reset_tenor) {
            let config = ScheduleConfig::new(period.accrual_start, period.accrual_end, reset_tenor)
                .with_stub_type(StubType::ShortEnd);
            let sub_schedule = Schedule::generate(&config)?;
            if sub_schedule.period_count() > 1 {
                let day_count = self
                    .common
                    .day_count
                    .ok_or_else(|| InstrumentError::missing_field("day_count"))?;
                let sub_periods = sub_schedule
                    .periods()
                    .map(|(start, end)| {
                        let (fixing_date, fixing_start, fixing_end, fixing_factor) =
                            self.ibor_fixing(index, self.reset_date(start, end))?;
                        Ok(CompoundingSubPeriod {
                            accrual_start: start,
                            accrual_end: end,
                            accrual_factor: day_count.year_fraction_f64(start, end),
                            fixing_date,
                            fixing_period_start: fixing_start,
                            fixing_period_end: fixing_end,
                            fixing_factor,
                        })
                    })
                    .collect::<InstrumentResult<Vec<_>>>()?;
                return Ok(Payment::CouponIborCompounding(CouponIborCompounding {
                    period: coupon_period,
                    index: index.clone(),
                    method,
                    spread: self.spread,
                    sub_periods,
                }));
            }
        }

        let (fixing_date, fixing_period_start, fixing_period_end, fixing_year_fraction) =
            self.ibor_fixing(index, reset)?;
        let coupon = CouponIbor {
            period: coupon_period,
            index: index.clone(),
            fixing_date,
            fixing_period_start,
            fixing_period_end,
            fixing_year_fraction,
            spread: self.spread,
        };
        Ok(if self.spread == 0.0 {
            Payment::CouponIbor(coupon)
        } else {
            Payment::CouponIborSpread(coupon)
        })
    }

    fn overnight_coupon(&self, index: &IndexON, coupon_period: CouponPeriod) -> Payment {
        let calendar = self.fixing().calendar;
        let (start, end) = (coupon_period.accrual_start, coupon_period.accrual_end);
        let mut fixing_dates = vec![start];
        let mut current = start;
        while current < end {
            current = calendar.add_business_days(current, 1).min(end);
            fixing_dates.push(current);
        }
        let fixing_factors = fixing_dates
            .windows(2)
            .map(|w| index.day_count.year_fraction_f64(w[0], w[1]))
            .collect();
        let coupon = CouponOn {
            period: coupon_period,
            index: index.clone(),
            fixing_dates,
            fixing_factors,
            spread: self.spread,
        };
        if self.arithmetic_average {
            Payment::CouponOnArithmeticAverage(coupon)
        } else {
            Payment::CouponOn(coupon)
        }
    }
}

/// Weight of the shorter index so the interpolated tenor matches the stub.
fn interpolation_weight(
    first: &IborIndex,
    second: &IborIndex,
    period: &AccrualPeriod,
) -> InstrumentResult<f64> {
    let stub_days = period.accrual_start.days_between(&period.accrual_end) as f64;
    let first_days = period
        .accrual_start
        .days_between(&first.tenor.add_to(period.accrual_start)?) as f64;
    let second_days = period
        .accrual_start
        .days_between(&second.tenor.add_to(period.accrual_start)?) as f64;
    if (second_days - first_days).abs() < f64::EPSILON {
        return Ok(1.0);
    }
    Ok(((second_days - stub_days) / (second_days - first_days)).clamp(0.0, 1.0))
}
