//! Rate and price indices referenced by coupons.

use serde::{Deserialize, Serialize};
use std::fmt;

use secdef_core::calendars::{BusinessDayConvention, Calendar};
use secdef_core::daycounts::DayCountConvention;
use secdef_core::{Currency, Date, Tenor};

use crate::error::InstrumentResult;

/// A term deposit (IBOR-style) index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IborIndex {
    /// Index name, e.g. `USDLIBOR3M`.
    pub name: String,
    /// Currency of the deposit.
    pub currency: Currency,
    /// Deposit tenor.
    pub tenor: Tenor,
    /// Business days between fixing and deposit start.
    pub spot_lag: i32,
    /// Deposit day count.
    pub day_count: DayCountConvention,
    /// Adjustment of the deposit end date.
    pub business_day_convention: BusinessDayConvention,
    /// End-of-month rule for the deposit end date.
    pub end_of_month: bool,
}

impl IborIndex {
    /// Creates an index.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        currency: Currency,
        tenor: Tenor,
        spot_lag: i32,
        day_count: DayCountConvention,
        business_day_convention: BusinessDayConvention,
        end_of_month: bool,
    ) -> Self {
        Self {
            name: name.into(),
            currency,
            tenor,
            spot_lag,
            day_count,
            business_day_convention,
            end_of_month,
        }
    }

    /// Deposit start, end and year fraction for a fixing on `fixing_date`.
    pub fn fixing_period(
        &self,
        fixing_date: Date,
        calendar: &dyn Calendar,
    ) -> InstrumentResult<(Date, Date, f64)> {
        let start = calendar.add_business_days(fixing_date, self.spot_lag);
        let mut end = self.tenor.add_to(start)?;
        if self.end_of_month && start.is_end_of_month() {
            end = end.end_of_month();
        }
        let end = calendar.adjust(end, self.business_day_convention)?;
        Ok((start, end, self.day_count.year_fraction_f64(start, end)))
    }
}

impl fmt::Display for IborIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.currency, self.tenor)
    }
}

/// An overnight index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexON {
    /// Index name, e.g. `FEDFUNDS`.
    pub name: String,
    /// Currency.
    pub currency: Currency,
    /// Day count of the overnight deposits.
    pub day_count: DayCountConvention,
    /// Days between the fixing date and its publication.
    pub publication_lag: i32,
}

impl IndexON {
    /// Creates an overnight index.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        currency: Currency,
        day_count: DayCountConvention,
        publication_lag: i32,
    ) -> Self {
        Self {
            name: name.into(),
            currency,
            day_count,
            publication_lag,
        }
    }
}

/// A price (inflation) index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexPrice {
    /// Index name, e.g. `CPURNSA`.
    pub name: String,
    /// Currency.
    pub currency: Currency,
}

impl IndexPrice {
    /// Creates a price index.
    #[must_use]
    pub fn new(name: impl Into<String>, currency: Currency) -> Self {
        Self {
            name: name.into(),
            currency,
        }
    }
}

/// A deposit index a floating leg can reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Index {
    /// Term deposit index.
    Ibor(IborIndex),
    /// Overnight index.
    Overnight(IndexON),
}

impl Index {
    /// Index name.
    pub fn name(&self) -> &str {
        match self {
            Index::Ibor(index) => &index.name,
            Index::Overnight(index) => &index.name,
        }
    }

    /// Index currency.
    pub fn currency(&self) -> Currency {
        match self {
            Index::Ibor(index) => index.currency,
            Index::Overnight(index) => index.currency,
        }
    }
}

impl From<IborIndex> for Index {
    fn from(index: IborIndex) -> Self {
        Index::Ibor(index)
    }
}

impl From<IndexON> for Index {
    fn from(index: IndexON) -> Self {
        Index::Overnight(index)
    }
}
