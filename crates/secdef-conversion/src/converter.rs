//! Dispatch from any security or trade to its converter.

use tracing::debug;

use secdef_instruments::InstrumentDefinition;
use secdef_securities::{Security, Trade};
use secdef_traits::ReferenceDataProvider;

use crate::bond::BondAndBondFutureTradeConverter;
use crate::cds::CreditDefaultSwapSecurityConverter;
use crate::config::ConversionConfig;
use crate::error::{ConversionError, ConversionResult};
use crate::fra::ForwardRateAgreementSecurityConverter;
use crate::irs::InterestRateSwapSecurityConverter;
use crate::swap::SwapSecurityConverter;

/// Converts any [`Security`] into an [`InstrumentDefinition`].
///
/// Holds one converter per security family, all sharing the same reference
/// data.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use secdef_conversion::{ConversionConfig, SecurityConverter};
/// use secdef_ext_file::InMemoryReferenceStore;
/// use secdef_securities::ExternalIdBundle;
/// use secdef_traits::ReferenceDataProvider;
///
/// let store = Arc::new(InMemoryReferenceStore::from_json_file("reference.json")?);
/// let provider = ReferenceDataProvider::from_single(store);
/// let converter = SecurityConverter::new(provider.clone(), ConversionConfig::default());
/// # let ids = ExternalIdBundle::default();
/// if let Some(security) = provider.securities.get_single(&ids)? {
///     println!("{}", converter.convert(&security)?.kind());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct SecurityConverter {
    irs: InterestRateSwapSecurityConverter,
    swap: SwapSecurityConverter,
    bond: BondAndBondFutureTradeConverter,
    fra: ForwardRateAgreementSecurityConverter,
    cds: CreditDefaultSwapSecurityConverter,
}

impl SecurityConverter {
    /// Creates converters over `provider`.
    pub fn new(provider: ReferenceDataProvider, config: ConversionConfig) -> Self {
        Self {
            irs: InterestRateSwapSecurityConverter::new(provider.clone()),
            swap: SwapSecurityConverter::new(provider.clone()),
            fra: ForwardRateAgreementSecurityConverter::new(provider.clone()),
            cds: CreditDefaultSwapSecurityConverter::new(provider.clone(), config.credit.clone()),
            bond: BondAndBondFutureTradeConverter::new(provider, config),
        }
    }

    /// Converts `security`.
    pub fn convert(&self, security: &Security) -> ConversionResult<InstrumentDefinition> {
        debug!(security = %security, "converting security");
        match security {
            Security::InterestRateSwap(irs) => Ok(InstrumentDefinition::Swap(self.irs.convert(irs)?)),
            Security::Swap(swap) => Ok(InstrumentDefinition::Swap(self.swap.convert(swap)?)),
            Security::GovernmentBond(_)
            | Security::CorporateBond(_)
            | Security::MunicipalBond(_)
            | Security::InflationBond(_)
            | Security::Bill(_)
            | Security::BondFuture(_)
            | Security::FloatingRateNote(_) => self.bond.convert_security(security),
            Security::ForwardRateAgreement(fra) => {
                Ok(InstrumentDefinition::ForwardRateAgreement(self.fra.convert(fra)?))
            }
            Security::StandardCds(cds) => Ok(InstrumentDefinition::Cds(self.cds.convert_standard(cds)?)),
            Security::LegacyCds(cds) => Ok(InstrumentDefinition::Cds(self.cds.convert_legacy(cds)?)),
            Security::IborIndex(_) | Security::OvernightIndex(_) | Security::PriceIndex(_) => {
                Err(ConversionError::unsupported(format!(
                    "{security} is an index, not a tradable instrument"
                )))
            }
        }
    }

    /// Converts `trade`.
    ///
    /// Bond-family trades become transactions; other trades convert their
    /// security.
    pub fn convert_trade(&self, trade: &Trade) -> ConversionResult<InstrumentDefinition> {
        if trade.security.is_bond_family() {
            self.bond.convert(trade)
        } else {
            self.convert(&trade.security)
        }
    }

    /// The bond converter.
    pub fn bond_converter(&self) -> &BondAndBondFutureTradeConverter {
        &self.bond
    }
}
