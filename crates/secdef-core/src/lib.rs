//! # Secdef Core
//!
//! Foundational date and convention types for the secdef conversion layer.
//!
//! This crate provides the building blocks shared by the security model,
//! the instrument-definition model and the converters between them:
//!
//! - **Types**: `Date`, `Tenor`, `Frequency`, `Currency`, dated time series
//! - **Day Count Conventions**: year fraction calculations
//! - **Business Day Calendars**: holiday calendars, adjustment conventions
//!   and roll-date adjusters
//!
//! ## Example
//!
//! ```rust
//! use secdef_core::prelude::*;
//!
//! let cal = WeekendCalendar;
//! let saturday = Date::from_ymd(2025, 1, 4).unwrap();
//! let adjusted = cal.adjust(saturday, BusinessDayConvention::Following).unwrap();
//! assert_eq!(adjusted, Date::from_ymd(2025, 1, 6).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        BusinessDayConvention, Calendar, HolidayCalendar, JointCalendar, RollConvention,
        RollDateAdjuster, WeekendCalendar,
    };
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        Currency, Date, DateDoubleTimeSeries, Frequency, StubType, Tenor, YieldConvention,
    };
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Currency, Date, DateDoubleTimeSeries, Frequency, Tenor};
