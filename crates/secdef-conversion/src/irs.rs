//! Conversion of leg-based interest-rate swaps.

use std::sync::Arc;

use tracing::{debug, info};

use secdef_core::calendars::{BusinessDayConvention, Calendar, WeekendCalendar};
use secdef_core::{Currency, Date, Tenor};
use secdef_instruments::builders::{FixedAnnuityDefinitionBuilder, FloatingAnnuityDefinitionBuilder};
use secdef_instruments::{
    AnnuityDefinition, CouponStub, IborCompoundingMethod, NotionalProvider, Payment,
    SwapDefinition,
};
use secdef_instruments::payment::PaymentFixed;
use secdef_securities::swap::{
    CompoundingMethod, DateRelativeTo, FixedInterestRateSwapLeg, FloatingInterestRateSwapLeg,
    FloatingRateType, InterestRateSwapLeg, InterestRateSwapSecurity, LegCommon, OffsetType,
    PayReceiveType,
};
use secdef_traits::ReferenceDataProvider;

use crate::annuity_utils::{
    adjustment, classify_swap, joint_calendar, notional_provider, parse_stubs, roll_date_adjuster,
    tenor_from_frequency, StubPair,
};
use crate::error::{ConversionError, ConversionResult};
use crate::index::{ibor_index, overnight_index, stub_ibor_index};

/// Converts [`InterestRateSwapSecurity`] into a [`SwapDefinition`].
///
/// Brazilian swaps (first leg in BRL) become one overnight coupon against
/// one business-day compounded fixed coupon. Every other swap is built leg
/// by leg with the annuity builders and classified afterwards.
#[derive(Debug, Clone)]
pub struct InterestRateSwapSecurityConverter {
    provider: ReferenceDataProvider,
}

impl InterestRateSwapSecurityConverter {
    /// Creates a converter over `provider`.
    pub fn new(provider: ReferenceDataProvider) -> Self {
        Self { provider }
    }

    /// Converts `security`.
    pub fn convert(&self, security: &InterestRateSwapSecurity) -> ConversionResult<SwapDefinition> {
        let first = security
            .legs
            .first()
            .ok_or_else(|| ConversionError::invalid_field("legs", "swap has no legs"))?;
        let pay = security
            .pay_leg()
            .ok_or_else(|| ConversionError::invalid_field("legs", "swap has no pay leg"))?;
        let receive = security
            .receive_leg()
            .ok_or_else(|| ConversionError::invalid_field("legs", "swap has no receive leg"))?;

        let swap = if first.currency() == Currency::BRL {
            self.convert_brazilian(security, pay, receive)?
        } else {
            let pay_annuity = self.leg_annuity(security, pay)?;
            let receive_annuity = self.leg_annuity(security, receive)?;
            classify_swap(pay_annuity, pay.is_fixed(), receive_annuity, receive.is_fixed())
        };
        info!(security = %security.name, kind = swap.kind(), "converted interest rate swap");
        Ok(swap)
    }

    fn leg_annuity(
        &self,
        security: &InterestRateSwapSecurity,
        leg: &InterestRateSwapLeg,
    ) -> ConversionResult<AnnuityDefinition> {
        match leg {
            InterestRateSwapLeg::Fixed(fixed) => self.fixed_annuity(security, fixed),
            InterestRateSwapLeg::Floating(floating) => self.floating_annuity(security, floating),
        }
    }

    fn fixed_annuity(
        &self,
        security: &InterestRateSwapSecurity,
        leg: &FixedInterestRateSwapLeg,
    ) -> ConversionResult<AnnuityDefinition> {
        let p = self.leg_parts(&leg.common)?;
        let mut builder = FixedAnnuityDefinitionBuilder::new()
            .rate(leg.rate.initial_rate)
            .payer(p.payer)
            .currency(p.currency)
            .start_date(security.effective_date)
            .end_date(security.unadjusted_maturity)
            .day_count(leg.common.day_count)
            .accrual_period_frequency(p.tenor)
            .roll_date_adjuster(roll_date_adjuster(leg.common.roll_convention))
            .payment_offset(leg.common.payment_offset)
            .payment_relative_to_start(leg.common.payment_relative_to == DateRelativeTo::Start)
            .start_stub(p.start_stub)
            .end_stub(p.end_stub)
            .notional(p.notional)
            .exchange_initial_notional(security.notional_exchange.exchange_initial_notional)
            .exchange_final_notional(security.notional_exchange.exchange_final_notional);
        if let Some((calendar, convention)) = p.accrual {
            builder = builder.accrual_adjustment(calendar, convention);
        }
        if let Some((calendar, convention)) = p.maturity {
            builder = builder.maturity_adjustment(calendar, convention);
        }
        if let Some((calendar, convention)) = p.payment {
            builder = builder.payment_adjustment(calendar, convention);
        }
        Ok(builder.build()?)
    }

    fn floating_annuity(
        &self,
        security: &InterestRateSwapSecurity,
        leg: &FloatingInterestRateSwapLeg,
    ) -> ConversionResult<AnnuityDefinition> {
        if leg.gearing.is_some_and(|g| g != 1.0) {
            return Err(ConversionError::unsupported(format!(
                "geared floating leg on {}",
                leg.floating_reference_rate_id
            )));
        }
        if leg.fixing_offset_type == OffsetType::Calendar && leg.fixing_adjustment.is_some() {
            return Err(ConversionError::unsupported(
                "calendar-day fixing offsets on floating legs",
            ));
        }

        let p = self.leg_parts(&leg.common)?;
        let id = &leg.floating_reference_rate_id;
        let mut builder = FloatingAnnuityDefinitionBuilder::new();
        builder = match leg.floating_rate_type {
            FloatingRateType::Ibor => builder
                .index(ibor_index(&self.provider, id, leg.floating_rate_type)?)
                .compounding_method(ibor_compounding(leg.common.compounding_method)),
            FloatingRateType::Ois => builder.index(overnight_index(&self.provider, id, p.currency)?),
            FloatingRateType::OvernightArithmeticAverage => builder
                .index(overnight_index(&self.provider, id, p.currency)?)
                .arithmetic_average(true),
            other => {
                return Err(ConversionError::unsupported(format!(
                    "Unsupported floating rate type {other}"
                )))
            }
        };

        builder = builder
            .spread(leg.spread_schedule.as_ref().map_or(0.0, |s| s.initial_rate))
            .initial_rate(leg.custom_rates.as_ref().map(|r| r.initial_rate))
            .reset_frequency(tenor_from_frequency(leg.reset_frequency)?)
            .reset_relative_to_end(leg.reset_relative_to == DateRelativeTo::End)
            .payer(p.payer)
            .currency(p.currency)
            .start_date(security.effective_date)
            .end_date(security.unadjusted_maturity)
            .day_count(leg.common.day_count)
            .accrual_period_frequency(p.tenor)
            .roll_date_adjuster(roll_date_adjuster(leg.common.roll_convention))
            .payment_offset(leg.common.payment_offset)
            .payment_relative_to_start(leg.common.payment_relative_to == DateRelativeTo::Start)
            .start_stub(p.start_stub)
            .end_stub(p.end_stub)
            .notional(p.notional)
            .exchange_initial_notional(security.notional_exchange.exchange_initial_notional)
            .exchange_final_notional(security.notional_exchange.exchange_final_notional);
        if let Some((calendar, convention)) = p.accrual {
            builder = builder.accrual_adjustment(calendar, convention);
        }
        if let Some((calendar, convention)) = p.maturity {
            builder = builder.maturity_adjustment(calendar, convention);
        }
        if let Some((calendar, convention)) = p.payment {
            builder = builder.payment_adjustment(calendar, convention);
        }
        if let Some((calendar, convention)) =
            adjustment(self.provider.holidays.as_ref(), leg.reset_adjustment.as_ref())?
        {
            builder = builder.reset_date_adjustment(calendar, convention);
        }
        if let Some((calendar, convention)) =
            adjustment(self.provider.holidays.as_ref(), leg.fixing_adjustment.as_ref())?
        {
            builder = builder
                .fixing_date_adjustment(calendar, convention)
                .fixing_offset(leg.fixing_offset);
        }
        Ok(builder.build()?)
    }

    /// Start and end stubs of `leg`, with stub indices resolved.
    pub fn leg_stubs(&self, leg: &InterestRateSwapLeg) -> ConversionResult<StubPair> {
        parse_stubs(leg.common().stub_calculation_method.as_ref(), |id| {
            stub_ibor_index(&self.provider, id)
        })
    }

    /// Resolves what fixed and floating legs share.
    fn leg_parts(&self, common: &LegCommon) -> ConversionResult<LegParts> {
        let holidays = self.provider.holidays.as_ref();
        let accrual = adjustment(holidays, common.accrual_adjustment.as_ref())?;
        let (notional_calendar, notional_convention): (Arc<dyn Calendar>, _) = match &accrual {
            Some((calendar, convention)) => (calendar.clone(), *convention),
            None => (Arc::new(WeekendCalendar), BusinessDayConvention::Unadjusted),
        };
        let payer = common.pay_receive_type == PayReceiveType::Pay;
        let (start_stub, end_stub) = parse_stubs(common.stub_calculation_method.as_ref(), |id| {
            stub_ibor_index(&self.provider, id)
        })?;
        Ok(LegParts {
            payer,
            currency: common.notional.currency(),
            tenor: tenor_from_frequency(common.payment_frequency)?,
            notional: notional_provider(
                &common.notional,
                notional_convention,
                notional_calendar.as_ref(),
                payer,
            )?,
            start_stub,
            end_stub,
            maturity: adjustment(holidays, common.maturity_adjustment.as_ref())?,
            payment: adjustment(holidays, common.payment_adjustment.as_ref())?,
            accrual,
        })
    }

    fn convert_brazilian(
        &self,
        security: &InterestRateSwapSecurity,
        pay: &InterestRateSwapLeg,
        receive: &InterestRateSwapLeg,
    ) -> ConversionResult<SwapDefinition> {
        let (fixed, floating) = match (pay, receive) {
            (InterestRateSwapLeg::Fixed(f), InterestRateSwapLeg::Floating(o))
            | (InterestRateSwapLeg::Floating(o), InterestRateSwapLeg::Fixed(f)) => (f, o),
            _ => {
                return Err(ConversionError::unsupported(
                    "BRL swaps must have one fixed and one floating leg",
                ))
            }
        };
        let pay_fixed = pay.is_fixed();
        let currency = floating.common.notional.currency();
        let index = overnight_index(&self.provider, &floating.floating_reference_rate_id, currency)?;
        let calendars = floating
            .common
            .accrual_adjustment
            .as_ref()
            .map(|a| a.calendars.clone())
            .unwrap_or_default();
        let calendar = joint_calendar(self.provider.holidays.as_ref(), &calendars)?;
        let amount = fixed.common.notional.initial_amount();
        let sign = if pay_fixed { 1.0 } else { -1.0 };

        let on_leg = FloatingAnnuityDefinitionBuilder::new()
            .index(index)
            .payer(!pay_fixed)
            .currency(currency)
            .start_date(security.effective_date)
            .end_date(security.unadjusted_maturity)
            .day_count(floating.common.day_count)
            .accrual_period_frequency(Tenor::ZERO)
            .accrual_adjustment(calendar.clone(), BusinessDayConvention::Unadjusted)
            .fixing_date_adjustment(calendar.clone(), BusinessDayConvention::Following)
            .notional(NotionalProvider::constant(sign * amount))
            .build()?;
        let fixed_leg = FixedAnnuityDefinitionBuilder::new()
            .rate(fixed.rate.initial_rate)
            .accrued_compounding(true)
            .payer(pay_fixed)
            .currency(currency)
            .start_date(security.effective_date)
            .end_date(security.unadjusted_maturity)
            .day_count(fixed.common.day_count)
            .accrual_period_frequency(Tenor::ZERO)
            .accrual_adjustment(calendar, BusinessDayConvention::Unadjusted)
            .notional(NotionalProvider::constant(-sign * amount))
            .build()?;

        let exchange = &security.notional_exchange;
        let exchange_date = if exchange.exchange_initial_notional {
            Some((security.effective_date, true))
        } else if exchange.exchange_final_notional {
            Some((security.unadjusted_maturity, false))
        } else {
            None
        };
        let (fixed_leg, on_leg) = match exchange_date {
            Some((date, initial)) => {
                debug!(%date, initial, "BRL notional exchange");
                (
                    with_exchange(fixed_leg, currency, date, -sign * amount, initial)?,
                    with_exchange(on_leg, currency, date, sign * amount, initial)?,
                )
            }
            None => (fixed_leg, on_leg),
        };

        Ok(if pay_fixed {
            SwapDefinition::Generic {
                pay_leg: fixed_leg,
                receive_leg: on_leg,
            }
        } else {
            SwapDefinition::Generic {
                pay_leg: on_leg,
                receive_leg: fixed_leg,
            }
        })
    }
}

/// Leg fields resolved against reference data.
struct LegParts {
    payer: bool,
    currency: Currency,
    tenor: Tenor,
    notional: NotionalProvider,
    start_stub: Option<CouponStub>,
    end_stub: Option<CouponStub>,
    accrual: Option<(Arc<dyn Calendar>, BusinessDayConvention)>,
    maturity: Option<(Arc<dyn Calendar>, BusinessDayConvention)>,
    payment: Option<(Arc<dyn Calendar>, BusinessDayConvention)>,
}

fn ibor_compounding(method: CompoundingMethod) -> Option<IborCompoundingMethod> {
    match method {
        CompoundingMethod::None => None,
        CompoundingMethod::Flat => Some(IborCompoundingMethod::Flat),
        CompoundingMethod::Straight => Some(IborCompoundingMethod::Straight),
        CompoundingMethod::SpreadExclusive => Some(IborCompoundingMethod::SpreadExclusive),
    }
}

fn with_exchange(
    annuity: AnnuityDefinition,
    currency: Currency,
    date: Date,
    amount: f64,
    initial: bool,
) -> ConversionResult<AnnuityDefinition> {
    let exchange = Payment::Fixed(PaymentFixed::new(currency, date, amount));
    let mut payments = annuity.payments().to_vec();
    if initial {
        payments.insert(0, exchange);
    } else {
        payments.push(exchange);
    }
    Ok(AnnuityDefinition::new(
        payments,
        annuity.is_payer(),
        annuity.calendar_name(),
    )?)
}
