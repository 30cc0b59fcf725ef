//! File-based historical fixing sources.

use std::path::{Path, PathBuf};

use dashmap::DashMap;
use serde::Deserialize;
use tracing::debug;

use secdef_core::{Date, DateDoubleTimeSeries};
use secdef_securities::reference::{HistoricalTimeSeries, MARKET_VALUE};
use secdef_securities::{ExternalId, ExternalIdBundle};
use secdef_traits::error::TraitError;
use secdef_traits::reference_data::HistoricalTimeSeriesSource;

// =============================================================================
// CSV TIME SERIES SOURCE
// =============================================================================

/// CSV record for fixings: `id,date,value`.
#[derive(Debug, Deserialize)]
struct FixingRecord {
    id: String,
    date: String,
    value: f64,
}

/// Historical `Market_Value` series keyed by identifier.
///
/// Loaded from a CSV file with an `id,date,value` header, where `id` is
/// `SCHEME~VALUE` and `date` is `YYYY-MM-DD`. Series can also be added
/// directly with [`CsvTimeSeriesSource::insert`].
#[derive(Debug, Default)]
pub struct CsvTimeSeriesSource {
    file_path: Option<PathBuf>,
    series: DashMap<ExternalId, DateDoubleTimeSeries>,
}

impl CsvTimeSeriesSource {
    /// Create a new CSV time series source.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let source = Self {
            file_path: Some(file_path.as_ref().to_path_buf()),
            series: DashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Create an empty source not backed by a file.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Reload fixings from file.
    pub fn reload(&self) -> Result<(), TraitError> {
        let Some(file_path) = &self.file_path else {
            return Ok(());
        };
        if !file_path.exists() {
            return Ok(()); // Empty source
        }

        let mut reader =
            csv::Reader::from_path(file_path).map_err(|e| TraitError::IoError(e.to_string()))?;

        let mut rows = 0usize;
        for result in reader.deserialize() {
            let record: FixingRecord = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
            let id: ExternalId = record
                .id
                .parse()
                .map_err(|e: secdef_securities::SecurityError| TraitError::ParseError(e.to_string()))?;
            let date =
                Date::parse(&record.date).map_err(|e| TraitError::ParseError(e.to_string()))?;
            self.series.entry(id).or_default().insert(date, record.value);
            rows += 1;
        }

        debug!(path = %file_path.display(), rows, series = self.series.len(), "loaded fixings");
        Ok(())
    }

    /// Add or replace the series of `id`.
    pub fn insert(&self, id: ExternalId, series: DateDoubleTimeSeries) {
        self.series.insert(id, series);
    }

    /// Number of series held.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Check if the source holds no series.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl HistoricalTimeSeriesSource for CsvTimeSeriesSource {
    fn get_time_series(
        &self,
        ids: &ExternalIdBundle,
        field: &str,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<Option<HistoricalTimeSeries>, TraitError> {
        if field != MARKET_VALUE {
            return Ok(None);
        }
        let Some(series) = ids
            .iter()
            .find_map(|id| self.series.get(id).map(|s| s.clone()))
        else {
            return Ok(None);
        };
        let series = match (start, end) {
            (None, None) => series,
            (start, end) => {
                let first = start.or_else(|| series.earliest().map(|(d, _)| d));
                let last = end.or_else(|| series.latest().map(|(d, _)| d));
                match (first, last) {
                    (Some(first), Some(last)) => series.subseries(first, last),
                    _ => series,
                }
            }
        };
        Ok(Some(HistoricalTimeSeries::market_value(ids.clone(), series)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_fixings() {
        let file = csv_file(
            "id,date,value\n\
             TICKER~US0003M,2025-01-13,4.31\n\
             TICKER~US0003M,2025-01-14,4.30\n\
             TICKER~SOFRRATE,2025-01-14,4.29\n",
        );
        let source = CsvTimeSeriesSource::new(file.path()).unwrap();
        assert_eq!(source.len(), 2);

        let ids = ExternalIdBundle::of(ExternalId::of("TICKER", "US0003M"));
        let hts = source
            .get_time_series(&ids, MARKET_VALUE, None, None)
            .unwrap()
            .unwrap();
        assert_eq!(hts.series.len(), 2);
        assert_eq!(hts.series.value_on(date(2025, 1, 14)), Some(4.30));
    }

    #[test]
    fn test_date_window_and_field() {
        let source = CsvTimeSeriesSource::in_memory();
        let id = ExternalId::of("TICKER", "US0003M");
        source.insert(
            id.clone(),
            DateDoubleTimeSeries::from_pairs([
                (date(2025, 1, 10), 0.043),
                (date(2025, 1, 13), 0.044),
                (date(2025, 1, 14), 0.045),
            ]),
        );
        let ids = ExternalIdBundle::of(id);
        let window = source
            .get_time_series(&ids, MARKET_VALUE, Some(date(2025, 1, 11)), None)
            .unwrap()
            .unwrap();
        assert_eq!(window.series.len(), 2);
        assert!(source
            .get_time_series(&ids, "PX_LAST", None, None)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_missing_file_is_empty_and_bad_rows_fail() {
        let source = CsvTimeSeriesSource::new("/nonexistent/fixings.csv").unwrap();
        assert!(source.is_empty());

        let file = csv_file("id,date,value\nTICKER~X,2025-02-30,1.0\n");
        assert!(matches!(
            CsvTimeSeriesSource::new(file.path()),
            Err(TraitError::ParseError(_))
        ));
    }
}
