//! # Secdef Traits
//!
//! Lookup contracts for the secdef conversion layer.
//!
//! This crate contains the trait definitions converters depend on plus a
//! small set of calendar helpers built on them. Implementations live in
//! extension crates such as `secdef-ext-file`.
//!
//! ## Module Structure
//!
//! - [`reference_data`]: holiday, region, convention, convention bundle,
//!   security, legal entity and historical time series sources
//! - [`calendar`]: holiday-source calendars and calendar lookup helpers
//!
//! ## Dependency Injection
//!
//! Converters take their sources through a [`ReferenceDataProvider`]:
//!
//! ```ignore
//! let provider = ReferenceDataProvider::from_single(Arc::new(store));
//! let converter = SecurityConverter::new(provider, config);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod calendar;
pub mod error;
pub mod reference_data;

// Re-export commonly used types
pub use calendar::{calendar_for_currency, calendar_for_ids, calendar_for_region, HolidaySourceCalendar};
pub use error::TraitError;
pub use reference_data::*;
