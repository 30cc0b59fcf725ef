//! In-memory and JSON file reference data sources.

use std::path::Path;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use secdef_securities::reference::{Holiday, LegalEntity, Region};
use secdef_securities::{Convention, ConventionBundle, ExternalId, ExternalIdBundle, Security, Trade};
use secdef_traits::error::TraitError;
use secdef_traits::reference_data::*;

// =============================================================================
// JSON REFERENCE FILE
// =============================================================================

/// Contents of a reference data JSON file.
///
/// Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceDataFile {
    /// Securities, tagged by `security_type`.
    #[serde(default)]
    pub securities: Vec<Security>,
    /// Conventions, tagged by `type`.
    #[serde(default)]
    pub conventions: Vec<Convention>,
    /// Name-keyed convention bundles.
    #[serde(default)]
    pub convention_bundles: Vec<ConventionBundle>,
    /// Regions.
    #[serde(default)]
    pub regions: Vec<Region>,
    /// Holiday sets.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// Legal entities.
    #[serde(default)]
    pub legal_entities: Vec<LegalEntity>,
    /// Trades.
    #[serde(default)]
    pub trades: Vec<Trade>,
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Thread-safe in-memory store serving every reference-data lookup.
///
/// Records are indexed under each of their identifiers; adding a record
/// whose identifier is already taken replaces the earlier one.
#[derive(Debug, Default)]
pub struct InMemoryReferenceStore {
    securities: DashMap<ExternalId, Security>,
    conventions: DashMap<ExternalId, Convention>,
    convention_bundles: DashMap<ExternalId, ConventionBundle>,
    regions: DashMap<ExternalId, Region>,
    holidays: DashMap<ExternalId, Holiday>,
    legal_entities: DashMap<ExternalId, LegalEntity>,
    trades: DashMap<String, Trade>,
}

impl InMemoryReferenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the contents of `file`.
    pub fn from_reference_file(file: ReferenceDataFile) -> Self {
        let store = Self::new();
        store.load(file);
        store
    }

    /// Parse a reference JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, TraitError> {
        let file: ReferenceDataFile =
            serde_json::from_str(json).map_err(|e| TraitError::ParseError(e.to_string()))?;
        Ok(Self::from_reference_file(file))
    }

    /// Load a reference JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| TraitError::IoError(format!("{}: {e}", path.display())))?;
        let store = Self::from_json_str(&json)?;
        debug!(
            path = %path.display(),
            securities = store.securities.len(),
            conventions = store.conventions.len(),
            trades = store.trades.len(),
            "loaded reference data"
        );
        Ok(store)
    }

    /// Add every record of `file`.
    pub fn load(&self, file: ReferenceDataFile) {
        file.securities.into_iter().for_each(|s| self.add_security(s));
        file.conventions.into_iter().for_each(|c| self.add_convention(c));
        file.convention_bundles
            .into_iter()
            .for_each(|b| self.add_convention_bundle(b));
        file.regions.into_iter().for_each(|r| self.add_region(r));
        file.holidays.into_iter().for_each(|h| self.add_holiday(h));
        file.legal_entities
            .into_iter()
            .for_each(|e| self.add_legal_entity(e));
        file.trades.into_iter().for_each(|t| self.add_trade(t));
    }

    /// Add a security under each of its identifiers.
    pub fn add_security(&self, security: Security) {
        insert_all(&self.securities, security.ids().clone(), security);
    }

    /// Add a convention under each of its identifiers.
    pub fn add_convention(&self, convention: Convention) {
        insert_all(&self.conventions, convention.ids().clone(), convention);
    }

    /// Add a convention bundle under each of its identifiers.
    pub fn add_convention_bundle(&self, bundle: ConventionBundle) {
        insert_all(&self.convention_bundles, bundle.ids.clone(), bundle);
    }

    /// Add a region under each of its identifiers.
    pub fn add_region(&self, region: Region) {
        insert_all(&self.regions, region.ids.clone(), region);
    }

    /// Add a holiday set, merging with any dates already recorded for its id.
    pub fn add_holiday(&self, holiday: Holiday) {
        let mut entry = self.holidays.entry(holiday.id.clone()).or_insert_with(|| Holiday {
            id: holiday.id.clone(),
            dates: Vec::new(),
        });
        entry.dates.extend(holiday.dates);
        entry.dates.sort();
        entry.dates.dedup();
    }

    /// Add a legal entity under each of its identifiers.
    pub fn add_legal_entity(&self, entity: LegalEntity) {
        insert_all(&self.legal_entities, entity.ids.clone(), entity);
    }

    /// Add a trade keyed by its id.
    pub fn add_trade(&self, trade: Trade) {
        self.trades.insert(trade.id.clone(), trade);
    }

    /// Get a trade by id.
    pub fn trade(&self, id: &str) -> Option<Trade> {
        self.trades.get(id).map(|t| t.clone())
    }

    /// All trades, ordered by id.
    pub fn trades(&self) -> Vec<Trade> {
        let mut trades: Vec<Trade> = self.trades.iter().map(|t| t.value().clone()).collect();
        trades.sort_by(|a, b| a.id.cmp(&b.id));
        trades
    }

    /// All distinct securities, ordered by name.
    pub fn securities(&self) -> Vec<Security> {
        let mut securities: Vec<Security> = Vec::new();
        for entry in &self.securities {
            if !securities.contains(entry.value()) {
                securities.push(entry.value().clone());
            }
        }
        securities.sort_by(|a, b| a.name().cmp(b.name()));
        securities
    }

    /// Number of indexed security identifiers.
    pub fn len(&self) -> usize {
        self.securities.len()
    }

    /// Check if the store holds no securities.
    pub fn is_empty(&self) -> bool {
        self.securities.is_empty()
    }
}

fn insert_all<T: Clone>(map: &DashMap<ExternalId, T>, ids: ExternalIdBundle, value: T) {
    for id in ids.iter() {
        map.insert(id.clone(), value.clone());
    }
}

fn first_match<T: Clone>(map: &DashMap<ExternalId, T>, ids: &ExternalIdBundle) -> Option<T> {
    ids.iter().find_map(|id| map.get(id).map(|v| v.clone()))
}

impl HolidaySource for InMemoryReferenceStore {
    fn get_holidays(&self, id: &ExternalId) -> Result<Option<Holiday>, TraitError> {
        Ok(self.holidays.get(id).map(|h| h.clone()))
    }
}

impl RegionSource for InMemoryReferenceStore {
    fn get_highest_level_region(&self, id: &ExternalId) -> Result<Option<Region>, TraitError> {
        Ok(self.regions.get(id).map(|r| r.clone()))
    }
}

impl ConventionSource for InMemoryReferenceStore {
    fn get_single(&self, id: &ExternalId) -> Result<Option<Convention>, TraitError> {
        Ok(self.conventions.get(id).map(|c| c.clone()))
    }
}

impl ConventionBundleSource for InMemoryReferenceStore {
    fn get_convention_bundle(
        &self,
        id: &ExternalId,
    ) -> Result<Option<ConventionBundle>, TraitError> {
        Ok(self.convention_bundles.get(id).map(|b| b.clone()))
    }
}

impl SecuritySource for InMemoryReferenceStore {
    fn get_single(&self, ids: &ExternalIdBundle) -> Result<Option<Security>, TraitError> {
        Ok(first_match(&self.securities, ids))
    }
}

impl LegalEntitySource for InMemoryReferenceStore {
    fn get_single(&self, id: &ExternalId) -> Result<Option<LegalEntity>, TraitError> {
        Ok(self.legal_entities.get(id).map(|e| e.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secdef_core::{Currency, Date};
    use secdef_securities::ids::{financial_region_id, simple_name_id};
    use std::io::Write;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    const REFERENCE: &str = r#"{
        "securities": [
            {
                "security_type": "IBOR_INDEX",
                "name": "USD LIBOR 3M",
                "ids": ["TICKER~US0003M", "SECDEF~1"],
                "tenor": "3M",
                "convention_id": "Reference~USD LIBOR"
            }
        ],
        "conventions": [
            {
                "type": "overnight_index",
                "name": "SOFR",
                "ids": ["Reference~SOFR"],
                "currency": "USD",
                "day_count": "Act360",
                "publication_lag": 1
            }
        ],
        "regions": [
            {
                "name": "United States",
                "ids": ["FINANCIAL_REGION~US"],
                "currency": "USD"
            }
        ],
        "holidays": [
            { "id": "FINANCIAL_REGION~US", "dates": ["2025-07-04"] }
        ]
    }"#;

    #[test]
    fn test_load_json_document() {
        let store = InMemoryReferenceStore::from_json_str(REFERENCE).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.securities().len(), 1);

        let by_ticker = SecuritySource::get_single(
            &store,
            &ExternalIdBundle::of(ExternalId::of("TICKER", "US0003M")),
        )
        .unwrap()
        .unwrap();
        assert_eq!(by_ticker.name(), "USD LIBOR 3M");

        let sofr = ConventionSource::get_single(&store, &simple_name_id("SOFR"))
            .unwrap()
            .unwrap();
        assert_eq!(sofr.name(), "SOFR");

        let us = store
            .get_highest_level_region(&financial_region_id("US"))
            .unwrap()
            .unwrap();
        assert_eq!(us.currency, Some(Currency::USD));
        assert!(store
            .is_holiday(&financial_region_id("US"), date(2025, 7, 4))
            .unwrap());
    }

    #[test]
    fn test_unknown_keys_are_none() {
        let store = InMemoryReferenceStore::new();
        assert!(store.is_empty());
        assert!(SecuritySource::get_single(
            &store,
            &ExternalIdBundle::of(ExternalId::of("TICKER", "NOPE"))
        )
        .unwrap()
        .is_none());
        assert!(store.get_holidays(&financial_region_id("GB")).unwrap().is_none());
        assert!(store.trade("T1").is_none());
    }

    #[test]
    fn test_holidays_merge() {
        let store = InMemoryReferenceStore::new();
        let id = financial_region_id("GB");
        store.add_holiday(Holiday {
            id: id.clone(),
            dates: vec![date(2025, 12, 25), date(2025, 12, 26)],
        });
        store.add_holiday(Holiday {
            id: id.clone(),
            dates: vec![date(2025, 8, 25), date(2025, 12, 25)],
        });
        let holiday = store.get_holidays(&id).unwrap().unwrap();
        assert_eq!(
            holiday.dates,
            vec![date(2025, 8, 25), date(2025, 12, 25), date(2025, 12, 26)]
        );
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let result = InMemoryReferenceStore::from_json_str("{ \"securities\": 3 }");
        assert!(matches!(result, Err(TraitError::ParseError(_))));
    }

    #[test]
    fn test_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(REFERENCE.as_bytes()).unwrap();
        let store = InMemoryReferenceStore::from_json_file(file.path()).unwrap();
        assert_eq!(store.securities().len(), 1);

        let missing = InMemoryReferenceStore::from_json_file("/nonexistent/reference.json");
        assert!(matches!(missing, Err(TraitError::IoError(_))));
    }

    #[test]
    fn test_trades_sorted_by_id() {
        use rust_decimal_macros::dec;

        let store = InMemoryReferenceStore::from_json_str(REFERENCE).unwrap();
        let index = store.securities().remove(0);
        store.add_trade(Trade::new("T2", index.clone(), dec!(1)));
        store.add_trade(Trade::new("T1", index, dec!(2)));
        let ids: Vec<String> = store.trades().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["T1".to_string(), "T2".to_string()]);
        assert_eq!(store.trade("T1").unwrap().quantity, dec!(2));
    }
}
