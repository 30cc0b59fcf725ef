//! Annuity builders.
//!
//! Both builders share the leg parameters below and generate the same
//! accrual periods; they differ in the coupon emitted per period.
//!
//! - [`FixedAnnuityDefinitionBuilder`]: fixed-rate coupons, optionally
//!   compounded over business days
//! - [`FloatingAnnuityDefinitionBuilder`]: IBOR and overnight coupons
//!
//! Calendars default to weekends only and adjustments to `Unadjusted`.
//! The maturity adjustment defaults to the accrual adjustment and the
//! payment calendar to the accrual calendar.

mod fixed;
mod floating;

pub use fixed::FixedAnnuityDefinitionBuilder;
pub use floating::FloatingAnnuityDefinitionBuilder;

use std::fmt;
use std::sync::Arc;

use secdef_core::calendars::{BusinessDayConvention, Calendar, RollDateAdjuster, WeekendCalendar};
use secdef_core::daycounts::DayCountConvention;
use secdef_core::types::StubType;
use secdef_core::{Currency, Date, Tenor};

use crate::error::{InstrumentError, InstrumentResult};
use crate::notional::NotionalProvider;
use crate::payment::{Payment, PaymentFixed};
use crate::schedule::{Schedule, ScheduleConfig};
use crate::stub::CouponStub;

/// A calendar paired with the convention applied on it.
#[derive(Clone)]
pub(crate) struct Adjustment {
    pub(crate) calendar: Arc<dyn Calendar>,
    pub(crate) convention: BusinessDayConvention,
}

impl fmt::Debug for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.calendar.name(), self.convention)
    }
}

impl Adjustment {
    pub(crate) fn unadjusted() -> Self {
        Self {
            calendar: Arc::new(WeekendCalendar),
            convention: BusinessDayConvention::Unadjusted,
        }
    }

    pub(crate) fn adjust(&self, date: Date) -> InstrumentResult<Date> {
        Ok(self.calendar.adjust(date, self.convention)?)
    }
}

/// Parameters shared by fixed and floating legs.
#[derive(Clone, Default)]
pub(crate) struct LegParameters {
    pub(crate) payer: bool,
    pub(crate) currency: Option<Currency>,
    pub(crate) start_date: Option<Date>,
    pub(crate) end_date: Option<Date>,
    pub(crate) day_count: Option<DayCountConvention>,
    pub(crate) accrual_tenor: Option<Tenor>,
    pub(crate) roll: Option<RollDateAdjuster>,
    pub(crate) accrual: Option<Adjustment>,
    pub(crate) maturity: Option<Adjustment>,
    pub(crate) payment: Option<Adjustment>,
    pub(crate) payment_offset: i32,
    pub(crate) payment_relative_to_start: bool,
    pub(crate) start_stub: Option<CouponStub>,
    pub(crate) end_stub: Option<CouponStub>,
    pub(crate) notional: Option<NotionalProvider>,
    pub(crate) exchange_initial_notional: bool,
    pub(crate) exchange_final_notional: bool,
}

impl fmt::Debug for LegParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegParameters")
            .field("payer", &self.payer)
            .field("currency", &self.currency)
            .field("start_date", &self.start_date)
            .field("end_date", &self.end_date)
            .field("accrual_tenor", &self.accrual_tenor)
            .field("start_stub", &self.start_stub)
            .field("end_stub", &self.end_stub)
            .finish_non_exhaustive()
    }
}

/// One generated accrual period.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AccrualPeriod {
    pub(crate) accrual_start: Date,
    pub(crate) accrual_end: Date,
    pub(crate) payment_date: Date,
    pub(crate) year_fraction: f64,
    pub(crate) notional: f64,
    pub(crate) is_first: bool,
    pub(crate) is_last: bool,
}

impl AccrualPeriod {
    /// The stub governing this period, if any.
    pub(crate) fn stub<'a>(&self, params: &'a LegParameters) -> Option<&'a CouponStub> {
        let start = params.start_stub.as_ref().filter(|s| {
            self.is_first && (s.stub_type().is_start() || s.stub_type() == StubType::Both)
        });
        let end = params
            .end_stub
            .as_ref()
            .filter(|s| self.is_last && (s.stub_type().is_end() || s.stub_type() == StubType::Both));
        start.or(end)
    }
}

impl LegParameters {
    pub(crate) fn currency(&self) -> InstrumentResult<Currency> {
        self.currency
            .ok_or_else(|| InstrumentError::missing_field("currency"))
    }

    fn notional(&self) -> InstrumentResult<&NotionalProvider> {
        self.notional
            .as_ref()
            .ok_or_else(|| InstrumentError::missing_field("notional"))
    }

    pub(crate) fn accrual(&self) -> Adjustment {
        self.accrual.clone().unwrap_or_else(Adjustment::unadjusted)
    }

    pub(crate) fn payment(&self) -> Adjustment {
        self.payment.clone().unwrap_or_else(|| Adjustment {
            calendar: self.accrual().calendar,
            convention: BusinessDayConvention::Unadjusted,
        })
    }

    fn stub_type(&self) -> StubType {
        let start = self.start_stub.as_ref().map(CouponStub::stub_type);
        let end = self.end_stub.as_ref().map(CouponStub::stub_type);
        match (start, end) {
            (Some(StubType::Both), _) | (_, Some(StubType::Both)) => StubType::Both,
            (Some(s), _) if s.is_start() => s,
            (_, Some(e)) if e.is_end() => e,
            _ => StubType::None,
        }
    }

    /// Generates the unadjusted schedule.
    pub(crate) fn schedule(&self) -> InstrumentResult<Schedule> {
        let start = self
            .start_date
            .ok_or_else(|| InstrumentError::missing_field("start_date"))?;
        let end = self
            .end_date
            .ok_or_else(|| InstrumentError::missing_field("end_date"))?;
        let tenor = self
            .accrual_tenor
            .ok_or_else(|| InstrumentError::missing_field("accrual_tenor"))?;
        let config = ScheduleConfig::new(start, end, tenor)
            .with_stub_type(self.stub_type())
            .with_first_stub_date(self.start_stub.as_ref().and_then(CouponStub::effective_date))
            .with_last_stub_date(self.end_stub.as_ref().and_then(CouponStub::effective_date))
            .with_roll(self.roll.unwrap_or(RollDateAdjuster::Identity));
        Schedule::generate(&config)
    }

    /// Generates adjusted accrual periods with payment dates and notionals.
    pub(crate) fn accrual_periods(&self) -> InstrumentResult<Vec<AccrualPeriod>> {
        let day_count = self
            .day_count
            .ok_or_else(|| InstrumentError::missing_field("day_count"))?;
        let notional = self.notional()?;
        let schedule = self.schedule()?;
        let accrual = self.accrual();
        let maturity = self.maturity.clone().unwrap_or_else(|| accrual.clone());
        let payment = self.payment();

        let last = schedule.dates().len() - 1;
        let adjusted = schedule
            .dates()
            .iter()
            .enumerate()
            .map(|(i, &d)| if i == last { maturity.adjust(d) } else { accrual.adjust(d) })
            .collect::<InstrumentResult<Vec<Date>>>()?;

        let count = adjusted.len() - 1;
        adjusted
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                let (accrual_start, accrual_end) = (w[0], w[1]);
                let reference = if self.payment_relative_to_start {
                    accrual_start
                } else {
                    accrual_end
                };
                let offset = payment.calendar.add_business_days(reference, self.payment_offset);
                Ok(AccrualPeriod {
                    accrual_start,
                    accrual_end,
                    payment_date: payment.adjust(offset)?,
                    year_fraction: day_count.year_fraction_f64(accrual_start, accrual_end),
                    notional: notional.amount_at(accrual_start),
                    is_first: i == 0,
                    is_last: i + 1 == count,
                })
            })
            .collect()
    }

    /// Initial and final notional exchange payments, as configured.
    pub(crate) fn notional_exchanges(
        &self,
        periods: &[AccrualPeriod],
    ) -> InstrumentResult<(Option<Payment>, Option<Payment>)> {
        let currency = self.currency()?;
        let notional = self.notional()?;
        let initial = match periods.first() {
            Some(first) if self.exchange_initial_notional => Some(Payment::Fixed(PaymentFixed::new(
                currency,
                self.payment().adjust(first.accrual_start)?,
                -notional.amount_at(first.accrual_start),
            ))),
            _ => None,
        };
        let last = match periods.last() {
            Some(last) if self.exchange_final_notional => Some(Payment::Fixed(PaymentFixed::new(
                currency,
                last.payment_date,
                notional.amount_at(last.accrual_end),
            ))),
            _ => None,
        };
        Ok((initial, last))
    }

    pub(crate) fn calendar_name(&self) -> String {
        self.payment().calendar.name().to_string()
    }
}

/// Generates the leg-parameter setters on a builder with a `common` field.
macro_rules! leg_setters {
    ($builder:ty) => {
        impl $builder {
            /// Sets the paying side.
            #[must_use]
            pub fn payer(mut self, payer: bool) -> Self {
                self.common.payer = payer;
                self
            }

            /// Sets the currency.
            #[must_use]
            pub fn currency(mut self, currency: secdef_core::Currency) -> Self {
                self.common.currency = Some(currency);
                self
            }

            /// Sets the first accrual start date.
            #[must_use]
            pub fn start_date(mut self, date: secdef_core::Date) -> Self {
                self.common.start_date = Some(date);
                self
            }

            /// Sets the last accrual end date.
            #[must_use]
            pub fn end_date(mut self, date: secdef_core::Date) -> Self {
                self.common.end_date = Some(date);
                self
            }

            /// Sets the accrual day count.
            #[must_use]
            pub fn day_count(mut self, day_count: secdef_core::daycounts::DayCountConvention) -> Self {
                self.common.day_count = Some(day_count);
                self
            }

            /// Sets the regular accrual period.
            #[must_use]
            pub fn accrual_period_frequency(mut self, tenor: secdef_core::Tenor) -> Self {
                self.common.accrual_tenor = Some(tenor);
                self
            }

            /// Sets the roll-date adjuster.
            #[must_use]
            pub fn roll_date_adjuster(
                mut self,
                roll: secdef_core::calendars::RollDateAdjuster,
            ) -> Self {
                self.common.roll = Some(roll);
                self
            }

            /// Sets the accrual date adjustment.
            #[must_use]
            pub fn accrual_adjustment(
                mut self,
                calendar: std::sync::Arc<dyn secdef_core::calendars::Calendar>,
                convention: secdef_core::calendars::BusinessDayConvention,
            ) -> Self {
                self.common.accrual = Some($crate::builders::Adjustment {
                    calendar,
                    convention,
                });
                self
            }

            /// Sets the maturity date adjustment.
            #[must_use]
            pub fn maturity_adjustment(
                mut self,
                calendar: std::sync::Arc<dyn secdef_core::calendars::Calendar>,
                convention: secdef_core::calendars::BusinessDayConvention,
            ) -> Self {
                self.common.maturity = Some($crate::builders::Adjustment {
                    calendar,
                    convention,
                });
                self
            }

            /// Sets the payment date adjustment.
            #[must_use]
            pub fn payment_adjustment(
                mut self,
                calendar: std::sync::Arc<dyn secdef_core::calendars::Calendar>,
                convention: secdef_core::calendars::BusinessDayConvention,
            ) -> Self {
                self.common.payment = Some($crate::builders::Adjustment {
                    calendar,
                    convention,
                });
                self
            }

            /// Sets the payment lag in business days.
            #[must_use]
            pub fn payment_offset(mut self, days: i32) -> Self {
                self.common.payment_offset = days;
                self
            }

            /// Measures the payment lag from the accrual start instead of the end.
            #[must_use]
            pub fn payment_relative_to_start(mut self, relative_to_start: bool) -> Self {
                self.common.payment_relative_to_start = relative_to_start;
                self
            }

            /// Sets the start stub.
            #[must_use]
            pub fn start_stub(mut self, stub: Option<$crate::stub::CouponStub>) -> Self {
                self.common.start_stub = stub;
                self
            }

            /// Sets the end stub.
            #[must_use]
            pub fn end_stub(mut self, stub: Option<$crate::stub::CouponStub>) -> Self {
                self.common.end_stub = stub;
                self
            }

            /// Sets the signed notional provider.
            #[must_use]
            pub fn notional(mut self, notional: $crate::notional::NotionalProvider) -> Self {
                self.common.notional = Some(notional);
                self
            }

            /// Adds a notional payment at the start of the leg.
            #[must_use]
            pub fn exchange_initial_notional(mut self, exchange: bool) -> Self {
                self.common.exchange_initial_notional = exchange;
                self
            }

            /// Adds a notional payment at the end of the leg.
            #[must_use]
            pub fn exchange_final_notional(mut self, exchange: bool) -> Self {
                self.common.exchange_final_notional = exchange;
                self
            }
        }
    };
}

pub(crate) use leg_setters;
