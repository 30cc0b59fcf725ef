//! Reference records: regions, legal entities, holidays and historical series.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use secdef_core::{Currency, Date, DateDoubleTimeSeries};

use crate::ids::{ExternalId, ExternalIdBundle};

/// A geographic or political region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Region name.
    pub name: String,
    /// Identifiers, e.g. `FINANCIAL_REGION~US` and `ISDA_HOLIDAY~USNY`.
    pub ids: ExternalIdBundle,
    /// ISO country code.
    #[serde(default)]
    pub country: Option<String>,
    /// Main currency.
    #[serde(default)]
    pub currency: Option<Currency>,
}

/// A set of non-business days keyed by a region or currency identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Identifier the holidays belong to.
    pub id: ExternalId,
    /// Holiday dates.
    pub dates: Vec<Date>,
}

/// An issuer, obligor or counterparty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalEntity {
    /// Entity name.
    pub name: String,
    /// Identifiers of the entity.
    pub ids: ExternalIdBundle,
    /// Short name or ticker.
    #[serde(default)]
    pub short_name: Option<String>,
    /// Credit ratings by agency.
    #[serde(default)]
    pub ratings: BTreeMap<String, String>,
    /// Industry sector.
    #[serde(default)]
    pub sector: Option<String>,
    /// Region code of domicile.
    #[serde(default)]
    pub region: Option<String>,
}

impl LegalEntity {
    /// Creates an entity with a name and identifiers only.
    pub fn new(name: impl Into<String>, ids: ExternalIdBundle) -> Self {
        Self {
            name: name.into(),
            ids,
            short_name: None,
            ratings: BTreeMap::new(),
            sector: None,
            region: None,
        }
    }
}

/// A named historical series of one data field.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalTimeSeries {
    /// Identifiers the series is keyed by.
    pub ids: ExternalIdBundle,
    /// Data field, e.g. `Market_Value`.
    pub field: String,
    /// The observations.
    pub series: DateDoubleTimeSeries,
}

/// Default data field of historical series.
pub const MARKET_VALUE: &str = "Market_Value";

impl HistoricalTimeSeries {
    /// Creates a market-value series.
    pub fn market_value(ids: ExternalIdBundle, series: DateDoubleTimeSeries) -> Self {
        Self {
            ids,
            field: MARKET_VALUE.to_string(),
            series,
        }
    }
}
