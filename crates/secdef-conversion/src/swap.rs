//! Conversion of legacy two-leg swaps.

use std::sync::Arc;

use tracing::info;

use secdef_core::calendars::{Calendar, RollConvention};
use secdef_instruments::builders::{FixedAnnuityDefinitionBuilder, FloatingAnnuityDefinitionBuilder};
use secdef_instruments::{AnnuityDefinition, NotionalProvider, SwapDefinition};
use secdef_securities::swap::{FloatingLegTerms, FloatingRateType, SwapLeg, SwapLegCommon, SwapSecurity};
use secdef_traits::{calendar_for_region, ReferenceDataProvider};

use crate::annuity_utils::{classify_swap, roll_date_adjuster, tenor_from_frequency};
use crate::error::{ConversionError, ConversionResult};
use crate::index::{ibor_index, overnight_index};

/// Converts [`SwapSecurity`] into a [`SwapDefinition`].
///
/// Each leg adjusts on the calendar of its region. Fixed and floating (with
/// or without spread) legs are supported; geared and inflation legs are not.
#[derive(Debug, Clone)]
pub struct SwapSecurityConverter {
    provider: ReferenceDataProvider,
}

impl SwapSecurityConverter {
    /// Creates a converter over `provider`.
    pub fn new(provider: ReferenceDataProvider) -> Self {
        Self { provider }
    }

    /// Converts `security`.
    pub fn convert(&self, security: &SwapSecurity) -> ConversionResult<SwapDefinition> {
        let pay = self.leg_annuity(security, &security.pay_leg, true)?;
        let receive = self.leg_annuity(security, &security.receive_leg, false)?;
        let swap = classify_swap(
            pay,
            is_fixed(&security.pay_leg),
            receive,
            is_fixed(&security.receive_leg),
        );
        info!(security = %security.name, kind = swap.kind(), "converted swap");
        Ok(swap)
    }

    fn leg_annuity(
        &self,
        security: &SwapSecurity,
        leg: &SwapLeg,
        payer: bool,
    ) -> ConversionResult<AnnuityDefinition> {
        match leg {
            SwapLeg::Fixed { common, rate } => {
                let calendar = self.calendar(common)?;
                let sign = if payer { -1.0 } else { 1.0 };
                Ok(FixedAnnuityDefinitionBuilder::new()
                    .rate(*rate)
                    .payer(payer)
                    .currency(common.currency)
                    .start_date(security.effective_date)
                    .end_date(security.maturity_date)
                    .day_count(common.day_count)
                    .accrual_period_frequency(tenor_from_frequency(common.frequency)?)
                    .roll_date_adjuster(roll(common))
                    .accrual_adjustment(calendar.clone(), common.business_day_convention)
                    .payment_adjustment(calendar, common.business_day_convention)
                    .notional(NotionalProvider::constant(sign * common.notional))
                    .exchange_initial_notional(security.exchange_initial_notional)
                    .exchange_final_notional(security.exchange_final_notional)
                    .build()?)
            }
            SwapLeg::Floating { common, terms } => self.floating(security, common, terms, 0.0, payer),
            SwapLeg::FloatingSpread {
                common,
                terms,
                spread,
            } => self.floating(security, common, terms, *spread, payer),
            SwapLeg::FloatingGearing { .. } | SwapLeg::FixedInflation { .. } | SwapLeg::InflationIndex { .. } => {
                Err(ConversionError::unsupported(format!(
                    "Cannot handle {} swap legs",
                    leg.kind()
                )))
            }
        }
    }

    fn floating(
        &self,
        security: &SwapSecurity,
        common: &SwapLegCommon,
        terms: &FloatingLegTerms,
        spread: f64,
        payer: bool,
    ) -> ConversionResult<AnnuityDefinition> {
        let id = &terms.floating_reference_rate_id;
        let builder = FloatingAnnuityDefinitionBuilder::new();
        let builder = match terms.floating_rate_type {
            FloatingRateType::Ibor => {
                builder.index(ibor_index(&self.provider, id, terms.floating_rate_type)?)
            }
            FloatingRateType::Ois => builder.index(overnight_index(&self.provider, id, common.currency)?),
            FloatingRateType::OvernightArithmeticAverage => builder
                .index(overnight_index(&self.provider, id, common.currency)?)
                .arithmetic_average(true),
            other => {
                return Err(ConversionError::unsupported(format!(
                    "Unsupported floating rate type {other}"
                )))
            }
        };
        let calendar = self.calendar(common)?;
        let sign = if payer { -1.0 } else { 1.0 };
        Ok(builder
            .spread(spread)
            .initial_rate(terms.initial_floating_rate)
            .payer(payer)
            .currency(common.currency)
            .start_date(security.effective_date)
            .end_date(security.maturity_date)
            .day_count(common.day_count)
            .accrual_period_frequency(tenor_from_frequency(common.frequency)?)
            .roll_date_adjuster(roll(common))
            .accrual_adjustment(calendar.clone(), common.business_day_convention)
            .payment_adjustment(calendar.clone(), common.business_day_convention)
            .fixing_date_adjustment(calendar, common.business_day_convention)
            .notional(NotionalProvider::constant(sign * common.notional))
            .exchange_initial_notional(security.exchange_initial_notional)
            .exchange_final_notional(security.exchange_final_notional)
            .build()?)
    }

    fn calendar(&self, common: &SwapLegCommon) -> ConversionResult<Arc<dyn Calendar>> {
        Ok(calendar_for_region(
            self.provider.regions.as_ref(),
            self.provider.holidays.as_ref(),
            &common.region_id,
        )?)
    }
}

fn is_fixed(leg: &SwapLeg) -> bool {
    matches!(leg, SwapLeg::Fixed { .. })
}

fn roll(common: &SwapLegCommon) -> secdef_core::calendars::RollDateAdjuster {
    if common.eom {
        roll_date_adjuster(RollConvention::Eom)
    } else {
        roll_date_adjuster(RollConvention::None)
    }
}
