//! Reference data source traits.
//!
//! These traits define the lookups a converter may perform:
//! - [`HolidaySource`]: non-business days by region or currency
//! - [`RegionSource`]: region records
//! - [`ConventionSource`]: market conventions
//! - [`ConventionBundleSource`]: name-keyed convention bundles
//! - [`SecuritySource`]: securities by identifier bundle
//! - [`LegalEntitySource`]: issuers, obligors and counterparties
//! - [`HistoricalTimeSeriesSource`]: historical fixings
//!
//! Every lookup is synchronous and returns `Ok(None)` when the key is
//! unknown; `Err` is reserved for a failing source.

use std::sync::Arc;

use secdef_core::Date;
use secdef_securities::reference::{HistoricalTimeSeries, Holiday, LegalEntity, Region};
use secdef_securities::{Convention, ConventionBundle, ExternalId, ExternalIdBundle, Security};

use crate::error::TraitError;

// =============================================================================
// CALENDAR DATA
// =============================================================================

/// Trait for holiday providers.
pub trait HolidaySource: Send + Sync {
    /// Get the holidays recorded for `id` (a region or currency identifier).
    fn get_holidays(&self, id: &ExternalId) -> Result<Option<Holiday>, TraitError>;

    /// Returns true if `date` is a recorded holiday for `id`.
    fn is_holiday(&self, id: &ExternalId, date: Date) -> Result<bool, TraitError> {
        Ok(self
            .get_holidays(id)?
            .is_some_and(|holiday| holiday.dates.contains(&date)))
    }
}

/// Trait for region providers.
pub trait RegionSource: Send + Sync {
    /// Get the broadest region carrying `id`.
    fn get_highest_level_region(&self, id: &ExternalId) -> Result<Option<Region>, TraitError>;
}

// =============================================================================
// CONVENTIONS
// =============================================================================

/// Trait for convention providers.
pub trait ConventionSource: Send + Sync {
    /// Get the convention identified by `id`.
    fn get_single(&self, id: &ExternalId) -> Result<Option<Convention>, TraitError>;

    /// Get the first convention matching any identifier in `ids`.
    fn get_bundle(&self, ids: &ExternalIdBundle) -> Result<Option<Convention>, TraitError> {
        for id in ids.iter() {
            if let Some(convention) = self.get_single(id)? {
                return Ok(Some(convention));
            }
        }
        Ok(None)
    }
}

/// Trait for convention bundle providers.
pub trait ConventionBundleSource: Send + Sync {
    /// Get the bundle identified by `id`.
    fn get_convention_bundle(&self, id: &ExternalId)
        -> Result<Option<ConventionBundle>, TraitError>;
}

// =============================================================================
// SECURITIES AND ENTITIES
// =============================================================================

/// Trait for security master providers.
pub trait SecuritySource: Send + Sync {
    /// Get the security matching any identifier in `ids`.
    fn get_single(&self, ids: &ExternalIdBundle) -> Result<Option<Security>, TraitError>;
}

/// Trait for legal entity providers.
pub trait LegalEntitySource: Send + Sync {
    /// Get the entity identified by `id`.
    fn get_single(&self, id: &ExternalId) -> Result<Option<LegalEntity>, TraitError>;
}

// =============================================================================
// HISTORICAL DATA
// =============================================================================

/// Trait for historical time series providers.
pub trait HistoricalTimeSeriesSource: Send + Sync {
    /// Get the `field` series for `ids`, restricted to `[start, end]` when given.
    fn get_time_series(
        &self,
        ids: &ExternalIdBundle,
        field: &str,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<Option<HistoricalTimeSeries>, TraitError>;
}

// =============================================================================
// COMPOSITE REFERENCE DATA PROVIDER
// =============================================================================

/// Combined reference data provider.
#[derive(Clone)]
pub struct ReferenceDataProvider {
    /// Holiday source
    pub holidays: Arc<dyn HolidaySource>,
    /// Region source
    pub regions: Arc<dyn RegionSource>,
    /// Convention source
    pub conventions: Arc<dyn ConventionSource>,
    /// Convention bundle source
    pub convention_bundles: Arc<dyn ConventionBundleSource>,
    /// Security source
    pub securities: Arc<dyn SecuritySource>,
    /// Legal entity source
    pub legal_entities: Arc<dyn LegalEntitySource>,
}

impl std::fmt::Debug for ReferenceDataProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceDataProvider").finish_non_exhaustive()
    }
}

impl ReferenceDataProvider {
    /// Creates a provider where one object serves every lookup.
    pub fn from_single<S>(source: Arc<S>) -> Self
    where
        S: HolidaySource
            + RegionSource
            + ConventionSource
            + ConventionBundleSource
            + SecuritySource
            + LegalEntitySource
            + 'static,
    {
        Self {
            holidays: source.clone(),
            regions: source.clone(),
            conventions: source.clone(),
            convention_bundles: source.clone(),
            securities: source.clone(),
            legal_entities: source,
        }
    }
}
