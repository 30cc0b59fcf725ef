//! # Secdef Ext File
//!
//! File-based and in-memory reference data for the secdef converters.
//!
//! This crate provides default implementations for tests, batch runs and
//! static data:
//! - [`InMemoryReferenceStore`]: every reference-data source over `DashMap`s,
//!   loadable from one JSON file
//! - [`CsvTimeSeriesSource`]: historical fixings from an `id,date,value` CSV

#![warn(missing_docs)]
#![warn(clippy::all)]

mod market_data;
mod reference_data;

pub use market_data::*;
pub use reference_data::*;

use std::path::Path;
use std::sync::Arc;

use secdef_traits::{ReferenceDataProvider, TraitError};

/// Create a reference data provider from a JSON reference file.
pub fn create_file_reference_data(
    reference_json: impl AsRef<Path>,
) -> Result<ReferenceDataProvider, TraitError> {
    let store = InMemoryReferenceStore::from_json_file(reference_json)?;
    Ok(ReferenceDataProvider::from_single(Arc::new(store)))
}

/// Create a historical time series source from a fixings CSV.
pub fn create_file_time_series(
    fixings_csv: impl AsRef<Path>,
) -> Result<Arc<CsvTimeSeriesSource>, TraitError> {
    Ok(Arc::new(CsvTimeSeriesSource::new(fixings_csv)?))
}
