//! Dated numeric time series.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Date;

/// An ordered series of `(Date, f64)` observations.
///
/// Used for historical fixings and prices. Internally a `BTreeMap` so that
/// "latest on or before" lookups and range slices are cheap.
///
/// # Example
///
/// ```rust
/// use secdef_core::types::{Date, DateDoubleTimeSeries};
///
/// let d1 = Date::from_ymd(2024, 1, 2).unwrap();
/// let d2 = Date::from_ymd(2024, 1, 3).unwrap();
/// let series = DateDoubleTimeSeries::from_pairs([(d1, 5.0), (d2, 5.25)]);
///
/// assert_eq!(series.latest(), Some((d2, 5.25)));
/// assert_eq!(series.divide(100.0).value_on(d1), Some(0.05));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateDoubleTimeSeries {
    points: BTreeMap<Date, f64>,
}

impl DateDoubleTimeSeries {
    /// Creates an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a series from date/value pairs. Later duplicates win.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Date, f64)>) -> Self {
        Self {
            points: pairs.into_iter().collect(),
        }
    }

    /// Inserts or replaces an observation.
    pub fn insert(&mut self, date: Date, value: f64) {
        self.points.insert(date, value);
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the observation on exactly `date`.
    #[must_use]
    pub fn value_on(&self, date: Date) -> Option<f64> {
        self.points.get(&date).copied()
    }

    /// Returns the most recent observation on or before `date`.
    #[must_use]
    pub fn latest_on_or_before(&self, date: Date) -> Option<(Date, f64)> {
        self.points
            .range(..=date)
            .next_back()
            .map(|(d, v)| (*d, *v))
    }

    /// Returns the most recent observation.
    #[must_use]
    pub fn latest(&self) -> Option<(Date, f64)> {
        self.points.iter().next_back().map(|(d, v)| (*d, *v))
    }

    /// Returns the value of the most recent observation.
    #[must_use]
    pub fn latest_value(&self) -> Option<f64> {
        self.latest().map(|(_, v)| v)
    }

    /// Returns the earliest observation.
    #[must_use]
    pub fn earliest(&self) -> Option<(Date, f64)> {
        self.points.iter().next().map(|(d, v)| (*d, *v))
    }

    /// Returns the sub-series between `start` and `end`, both inclusive.
    #[must_use]
    pub fn subseries(&self, start: Date, end: Date) -> Self {
        if start > end {
            return Self::new();
        }
        Self {
            points: self
                .points
                .range(start..=end)
                .map(|(d, v)| (*d, *v))
                .collect(),
        }
    }

    /// Returns a new series with every value divided by `divisor`.
    #[must_use]
    pub fn divide(&self, divisor: f64) -> Self {
        Self {
            points: self.points.iter().map(|(d, v)| (*d, v / divisor)).collect(),
        }
    }

    /// Iterates observations in date order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.points.iter().map(|(d, v)| (*d, *v))
    }

    /// Returns all observation dates in order.
    #[must_use]
    pub fn dates(&self) -> Vec<Date> {
        self.points.keys().copied().collect()
    }
}

impl FromIterator<(Date, f64)> for DateDoubleTimeSeries {
    fn from_iter<T: IntoIterator<Item = (Date, f64)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}
