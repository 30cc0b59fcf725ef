//! Conversion of definitions to derivatives, resolving the fixing series they need.
//!
//! Which series a definition needs depends on its security:
//!
//! - FRA: the `Market_Value` series of the underlying index, required,
//!   divided by the configured divisor
//! - swaps: one series per floating leg keyed by the leg's reference rate;
//!   a missing series is treated as empty and percent quotes are normalised
//! - everything else: none

use tracing::{debug, info};

use secdef_core::{Date, DateDoubleTimeSeries};
use secdef_instruments::{InstrumentDefinition, InstrumentDerivative};
use secdef_securities::reference::MARKET_VALUE;
use secdef_securities::{ExternalId, Security};
use secdef_traits::reference_data::HistoricalTimeSeriesSource;

use crate::config::ConversionConfig;
use crate::error::{ConversionError, ConversionResult};

/// Slices definitions at a valuation date with fixings from a series source.
#[derive(Debug, Clone, Default)]
pub struct FixedIncomeConverterDataProvider {
    config: ConversionConfig,
}

impl FixedIncomeConverterDataProvider {
    /// Creates a provider with the normalisation settings of `config`.
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Converts `definition`, the definition of `security`, at `valuation`.
    pub fn convert(
        &self,
        security: &Security,
        definition: Option<&InstrumentDefinition>,
        valuation: Date,
        series: &dyn HistoricalTimeSeriesSource,
    ) -> ConversionResult<InstrumentDerivative> {
        let definition = definition.ok_or_else(|| {
            ConversionError::missing(format!(
                "Definition to convert was null for security {security}"
            ))
        })?;
        let fixings = match security {
            Security::ForwardRateAgreement(fra) => {
                let ids = fra.underlying_id.to_bundle();
                let hts = series
                    .get_time_series(&ids, MARKET_VALUE, None, Some(valuation))?
                    .ok_or_else(|| {
                        ConversionError::missing(format!("Could not get price time series for {ids}"))
                    })?;
                vec![hts.series.divide(self.config.fra_series_divisor)]
            }
            Security::InterestRateSwap(irs) => {
                let pay = irs
                    .pay_leg()
                    .and_then(|leg| leg.as_floating())
                    .map(|leg| &leg.floating_reference_rate_id);
                let receive = irs
                    .receive_leg()
                    .and_then(|leg| leg.as_floating())
                    .map(|leg| &leg.floating_reference_rate_id);
                self.swap_fixings(pay, receive, irs.effective_date, valuation, series)?
            }
            Security::Swap(swap) => {
                let pay = swap.pay_leg.floating_terms().map(|t| &t.floating_reference_rate_id);
                let receive = swap
                    .receive_leg
                    .floating_terms()
                    .map(|t| &t.floating_reference_rate_id);
                self.swap_fixings(pay, receive, swap.effective_date, valuation, series)?
            }
            _ => Vec::new(),
        };
        let derivative = definition.to_derivative(valuation, &fixings)?;
        info!(security = %security, %valuation, series = fixings.len(), "converted to derivative");
        Ok(derivative)
    }

    /// Fixings of the floating legs in pay, receive order.
    fn swap_fixings(
        &self,
        pay: Option<&ExternalId>,
        receive: Option<&ExternalId>,
        effective: Date,
        valuation: Date,
        series: &dyn HistoricalTimeSeriesSource,
    ) -> ConversionResult<Vec<DateDoubleTimeSeries>> {
        let pay = pay
            .map(|id| self.leg_fixings(id, effective, valuation, series))
            .transpose()?;
        let receive = receive
            .map(|id| self.leg_fixings(id, effective, valuation, series))
            .transpose()?;
        match (pay, receive) {
            (Some(pay), Some(receive)) => Ok(vec![pay, receive]),
            (Some(only), None) | (None, Some(only)) => Ok(vec![only]),
            (None, None) => Err(ConversionError::missing(
                "Could not get fixing series for either the pay or receive leg",
            )),
        }
    }

    /// Fixing series of one floating leg; empty when unavailable.
    fn leg_fixings(
        &self,
        id: &ExternalId,
        effective: Date,
        valuation: Date,
        series: &dyn HistoricalTimeSeriesSource,
    ) -> ConversionResult<DateDoubleTimeSeries> {
        if valuation < effective {
            return Ok(DateDoubleTimeSeries::new());
        }
        let ids = id.to_bundle();
        let Some(hts) = series.get_time_series(&ids, MARKET_VALUE, Some(effective), Some(valuation))?
        else {
            info!(index = %id, "no fixing series for index");
            return Ok(DateDoubleTimeSeries::new());
        };
        match hts.series.latest_value() {
            Some(latest) if latest > self.config.series_normalisation_threshold => {
                debug!(index = %id, latest, "normalising percent fixings");
                Ok(hts.series.divide(100.0))
            }
            _ => Ok(hts.series),
        }
    }
}
