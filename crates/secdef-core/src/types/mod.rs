//! Domain types shared by the security and instrument models.
//!
//! - [`Date`]: Calendar date
//! - [`Tenor`]: Length of time in calendar units
//! - [`Frequency`]: Payment and reset frequency
//! - [`Currency`]: ISO currency codes
//! - [`DateDoubleTimeSeries`]: Dated observations for fixings and prices
//! - [`StubType`], [`YieldConvention`]: Market convention labels

mod conventions;
mod currency;
mod date;
mod frequency;
mod tenor;
mod timeseries;

pub use conventions::{StubType, YieldConvention};
pub use currency::Currency;
pub use date::Date;
pub use frequency::Frequency;
pub use tenor::Tenor;
pub use timeseries::DateDoubleTimeSeries;
