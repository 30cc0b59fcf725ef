//! Resolution of reference-rate identifiers to indices.
//!
//! Every lookup tries the security source first and falls back to the
//! convention source keyed by the same identifier.

use tracing::debug;

use secdef_core::{Currency, Tenor};
use secdef_instruments::{IborIndex, IndexON, IndexPrice};
use secdef_securities::convention::{IborIndexConvention, OvernightIndexConvention};
use secdef_securities::swap::FloatingRateType;
use secdef_securities::{Convention, ExternalId, Security};
use secdef_traits::ReferenceDataProvider;

use crate::error::{ConversionError, ConversionResult};

/// IBOR index of a floating leg referencing `id`.
pub fn ibor_index(
    provider: &ReferenceDataProvider,
    id: &ExternalId,
    rate_type: FloatingRateType,
) -> ConversionResult<IborIndex> {
    if let Some(index) = ibor_index_from_security(provider, id)? {
        return Ok(index);
    }
    match provider.conventions.get_single(id)? {
        Some(Convention::VanillaIborLeg(leg)) => {
            let index = ibor_index_convention(provider, &leg.ibor_index_convention)?;
            debug!(reference = %id, convention = %leg.name, "IBOR index from leg convention");
            Ok(from_convention(id.value(), &index, leg.reset_tenor))
        }
        Some(other) => Err(ConversionError::invalid_field(
            "floating_reference_rate_id",
            format!("Mis-match between floating rate type {rate_type} and convention {other}"),
        )),
        None => Err(ConversionError::missing(format!("Convention not found for {id}"))),
    }
}

/// IBOR index of a stub reference rate `id`.
pub fn stub_ibor_index(
    provider: &ReferenceDataProvider,
    id: &ExternalId,
) -> ConversionResult<IborIndex> {
    if let Some(index) = ibor_index_from_security(provider, id)? {
        return Ok(index);
    }
    match provider.conventions.get_single(id)? {
        Some(Convention::VanillaIborLeg(leg)) => {
            let index = ibor_index_convention(provider, &leg.ibor_index_convention)?;
            debug!(reference = %id, convention = %leg.name, "stub index from leg convention");
            Ok(from_convention(id.value(), &index, leg.reset_tenor))
        }
        _ => Err(ConversionError::missing(format!(
            "Could not resolve an index convention for rate reference id: {}",
            id.value()
        ))),
    }
}

/// Overnight index referenced by `id`.
///
/// `currency` names the index when it is built from a bare convention.
pub fn overnight_index(
    provider: &ReferenceDataProvider,
    id: &ExternalId,
    currency: Currency,
) -> ConversionResult<IndexON> {
    if let Some(Security::OvernightIndex(security)) =
        provider.securities.get_single(&id.to_bundle())?
    {
        let convention = overnight_index_convention(provider, &security.convention_id)?;
        return Ok(IndexON::new(
            security.name,
            convention.currency,
            convention.day_count,
            convention.publication_lag,
        ));
    }
    match provider.conventions.get_single(id)? {
        Some(Convention::OvernightIndex(convention)) => {
            debug!(reference = %id, "overnight index from convention");
            Ok(IndexON::new(
                id.value(),
                currency,
                convention.day_count,
                convention.publication_lag,
            ))
        }
        Some(other) => Err(ConversionError::invalid_field(
            "floating_reference_rate_id",
            format!("Convention {other} is not an overnight index convention"),
        )),
        None => Err(ConversionError::missing(format!("Convention not found for {id}"))),
    }
}

/// Price index referenced by `id`.
pub fn price_index(
    provider: &ReferenceDataProvider,
    id: &ExternalId,
    currency: Currency,
) -> ConversionResult<IndexPrice> {
    match provider.securities.get_single(&id.to_bundle())? {
        Some(Security::PriceIndex(security)) => Ok(IndexPrice::new(security.name, currency)),
        Some(other) => Err(ConversionError::invalid_field(
            "reference_index_id",
            format!("{id} is a {}, not a price index", other.security_type()),
        )),
        None => Err(ConversionError::missing(format!(
            "Could not get price index security {id}"
        ))),
    }
}

fn ibor_index_from_security(
    provider: &ReferenceDataProvider,
    id: &ExternalId,
) -> ConversionResult<Option<IborIndex>> {
    let Some(Security::IborIndex(security)) = provider.securities.get_single(&id.to_bundle())?
    else {
        return Ok(None);
    };
    let convention = ibor_index_convention(provider, &security.convention_id)?;
    Ok(Some(from_convention(&security.name, &convention, security.tenor)))
}

fn ibor_index_convention(
    provider: &ReferenceDataProvider,
    id: &ExternalId,
) -> ConversionResult<IborIndexConvention> {
    match provider.conventions.get_single(id)? {
        Some(Convention::IborIndex(convention)) => Ok(convention),
        Some(other) => Err(ConversionError::invalid_field(
            "convention_id",
            format!("Convention {other} is not an IBOR index convention"),
        )),
        None => Err(ConversionError::missing(format!("Convention not found for {id}"))),
    }
}

fn overnight_index_convention(
    provider: &ReferenceDataProvider,
    id: &ExternalId,
) -> ConversionResult<OvernightIndexConvention> {
    match provider.conventions.get_single(id)? {
        Some(Convention::OvernightIndex(convention)) => Ok(convention),
        Some(other) => Err(ConversionError::invalid_field(
            "convention_id",
            format!("Convention {other} is not an overnight index convention"),
        )),
        None => Err(ConversionError::missing(format!("Convention not found for {id}"))),
    }
}

fn from_convention(
    name: &str,
    convention: &IborIndexConvention,
    tenor: Tenor,
) -> IborIndex {
    IborIndex::new(
        name,
        convention.currency,
        tenor,
        convention.settlement_days,
        convention.day_count,
        convention.business_day_convention,
        convention.is_eom,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use secdef_core::calendars::BusinessDayConvention;
    use secdef_core::daycounts::DayCountConvention;
    use secdef_ext_file::InMemoryReferenceStore;
    use secdef_securities::convention::VanillaIborLegConvention;
    use secdef_securities::ids::{financial_region_id, simple_name_id};
    use secdef_securities::index::{IborIndexSecurity, OvernightIndexSecurity, PriceIndexSecurity};
    use secdef_securities::stub::StubType;
    use secdef_securities::ExternalIdBundle;

    fn libor_convention() -> Convention {
        Convention::IborIndex(IborIndexConvention {
            name: "USD LIBOR".into(),
            ids: ExternalIdBundle::of(simple_name_id("USD LIBOR")),
            currency: Currency::USD,
            day_count: DayCountConvention::Act360,
            business_day_convention: BusinessDayConvention::ModifiedFollowing,
            settlement_days: 2,
            is_eom: true,
            fixing_calendar: financial_region_id("GB"),
            region_calendar: financial_region_id("US"),
            fixing_page: None,
        })
    }

    fn store() -> ReferenceDataProvider {
        let store = InMemoryReferenceStore::new();
        store.add_convention(libor_convention());
        store.add_convention(Convention::VanillaIborLeg(VanillaIborLegConvention {
            name: "USD 6M LIBOR leg".into(),
            ids: ExternalIdBundle::of(ExternalId::of("TICKER", "US0006M")),
            ibor_index_convention: simple_name_id("USD LIBOR"),
            is_advance_fixing: true,
            interpolated: false,
            reset_tenor: Tenor::Months(6),
            settlement_days: 2,
            is_eom: true,
            stub_type: StubType::ShortStart,
            exchange_notional: false,
            payment_lag: 0,
        }));
        store.add_convention(Convention::OvernightIndex(OvernightIndexConvention {
            name: "SOFR".into(),
            ids: ExternalIdBundle::of(simple_name_id("SOFR")),
            currency: Currency::USD,
            day_count: DayCountConvention::Act360,
            publication_lag: 1,
            region_calendar: financial_region_id("US"),
        }));
        store.add_security(Security::IborIndex(IborIndexSecurity {
            name: "USD LIBOR 3M".into(),
            ids: ExternalIdBundle::of(ExternalId::of("TICKER", "US0003M")),
            tenor: Tenor::Months(3),
            convention_id: simple_name_id("USD LIBOR"),
            description: None,
        }));
        store.add_security(Security::OvernightIndex(OvernightIndexSecurity {
            name: "SOFR".into(),
            ids: ExternalIdBundle::of(ExternalId::of("TICKER", "SOFRRATE")),
            convention_id: simple_name_id("SOFR"),
            description: None,
        }));
        store.add_security(Security::PriceIndex(PriceIndexSecurity {
            name: "US CPI-U NSA".into(),
            ids: ExternalIdBundle::of(ExternalId::of("TICKER", "CPURNSA")),
            convention_id: None,
            description: None,
        }));
        ReferenceDataProvider::from_single(Arc::new(store))
    }

    #[test]
    fn test_ibor_from_security() {
        let index = ibor_index(
            &store(),
            &ExternalId::of("TICKER", "US0003M"),
            FloatingRateType::Ibor,
        )
        .unwrap();
        assert_eq!(index.name, "USD LIBOR 3M");
        assert_eq!(index.tenor, Tenor::Months(3));
        assert_eq!(index.spot_lag, 2);
        assert!(index.end_of_month);
    }

    #[test]
    fn test_ibor_from_leg_convention() {
        let index = ibor_index(
            &store(),
            &ExternalId::of("TICKER", "US0006M"),
            FloatingRateType::Ibor,
        )
        .unwrap();
        assert_eq!(index.name, "US0006M");
        assert_eq!(index.tenor, Tenor::Months(6));
        assert_eq!(index.day_count, DayCountConvention::Act360);
    }

    #[test]
    fn test_ibor_errors() {
        let provider = store();
        let err = ibor_index(&provider, &simple_name_id("SOFR"), FloatingRateType::Ibor).unwrap_err();
        assert!(err
            .to_string()
            .ends_with("Mis-match between floating rate type IBOR and convention OvernightIndexConvention[SOFR]"));

        let err = ibor_index(
            &provider,
            &ExternalId::of("TICKER", "EUR003M"),
            FloatingRateType::Ibor,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Convention not found for TICKER~EUR003M");
    }

    #[test]
    fn test_stub_index_error() {
        let err = stub_ibor_index(&store(), &ExternalId::of("TICKER", "US0002M")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not resolve an index convention for rate reference id: US0002M"
        );
        assert!(stub_ibor_index(&store(), &ExternalId::of("TICKER", "US0006M")).is_ok());
    }

    #[test]
    fn test_overnight_resolution() {
        let provider = store();
        let from_security =
            overnight_index(&provider, &ExternalId::of("TICKER", "SOFRRATE"), Currency::EUR).unwrap();
        assert_eq!(from_security.name, "SOFR");
        assert_eq!(from_security.currency, Currency::USD);

        let from_convention =
            overnight_index(&provider, &simple_name_id("SOFR"), Currency::USD).unwrap();
        assert_eq!(from_convention.name, "SOFR");
        assert_eq!(from_convention.publication_lag, 1);

        assert!(matches!(
            overnight_index(&provider, &ExternalId::of("TICKER", "US0006M"), Currency::USD),
            Err(ConversionError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_price_index() {
        let provider = store();
        let index = price_index(&provider, &ExternalId::of("TICKER", "CPURNSA"), Currency::USD).unwrap();
        assert_eq!(index.name, "US CPI-U NSA");
        assert!(matches!(
            price_index(&provider, &ExternalId::of("TICKER", "US0003M"), Currency::USD),
            Err(ConversionError::InvalidField { .. })
        ));
    }
}
