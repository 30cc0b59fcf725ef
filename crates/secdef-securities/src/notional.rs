//! Notional schedules of interest-rate swap legs.

use serde::{Deserialize, Serialize};

use secdef_core::{Currency, Date};

use crate::error::{SecurityError, SecurityResult};

/// How a scheduled notional amount applies to the previous amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NotionalShiftType {
    /// The amount replaces the notional.
    #[default]
    Outright,
    /// The amount is added to the notional.
    Additive,
    /// The notional is multiplied by the amount.
    Multiplicative,
}

/// A fixed notional amount in one currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestRateNotional {
    /// Currency of the amount.
    pub currency: Currency,
    /// The amount.
    pub amount: f64,
}

impl InterestRateNotional {
    /// Creates a notional.
    pub fn new(currency: Currency, amount: f64) -> Self {
        Self { currency, amount }
    }
}

/// A possibly varying notional: an initial amount plus dated steps.
///
/// Each schedule entry takes effect on its date and stays in effect until
/// the next entry. An empty date list describes a constant notional.
///
/// # Example
///
/// ```rust
/// use secdef_core::{Currency, Date};
/// use secdef_securities::notional::InterestRateSwapNotional;
///
/// let d1 = Date::from_ymd(2025, 1, 15).unwrap();
/// let d2 = Date::from_ymd(2026, 1, 15).unwrap();
/// let notional = InterestRateSwapNotional::of_schedule(
///     Currency::USD,
///     vec![d1, d2],
///     vec![1_000_000.0, 500_000.0],
/// ).unwrap();
///
/// assert_eq!(notional.amount_at(Date::from_ymd(2025, 6, 1).unwrap()), 1_000_000.0);
/// assert_eq!(notional.amount_at(Date::from_ymd(2027, 1, 1).unwrap()), 500_000.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRateSwapNotional {
    currency: Currency,
    #[serde(default)]
    dates: Vec<Date>,
    notionals: Vec<f64>,
    #[serde(default)]
    shift_types: Vec<NotionalShiftType>,
}

impl InterestRateSwapNotional {
    /// Creates a constant notional.
    #[must_use]
    pub fn of_amount(currency: Currency, amount: f64) -> Self {
        Self {
            currency,
            dates: Vec::new(),
            notionals: vec![amount],
            shift_types: vec![NotionalShiftType::Outright],
        }
    }

    /// Creates an outright schedule from dates and amounts.
    pub fn of_schedule(
        currency: Currency,
        dates: Vec<Date>,
        notionals: Vec<f64>,
    ) -> SecurityResult<Self> {
        let shift_types = vec![NotionalShiftType::Outright; notionals.len()];
        Self::new(currency, dates, notionals, shift_types)
    }

    /// Creates a schedule with explicit shift types.
    ///
    /// Dates must be ascending and there must be one amount and one shift
    /// type per date (a constant notional has one amount and no dates).
    pub fn new(
        currency: Currency,
        dates: Vec<Date>,
        notionals: Vec<f64>,
        shift_types: Vec<NotionalShiftType>,
    ) -> SecurityResult<Self> {
        let notional = Self {
            currency,
            dates,
            notionals,
            shift_types,
        };
        notional.validate()?;
        Ok(notional)
    }

    /// Checks the schedule shape.
    pub fn validate(&self) -> SecurityResult<()> {
        if self.notionals.is_empty() {
            return Err(SecurityError::invalid_notional(
                "at least one notional amount is required",
            ));
        }
        if !self.dates.is_empty() && self.dates.len() != self.notionals.len() {
            return Err(SecurityError::invalid_notional(format!(
                "{} dates but {} amounts",
                self.dates.len(),
                self.notionals.len()
            )));
        }
        if !self.shift_types.is_empty() && self.shift_types.len() != self.notionals.len() {
            return Err(SecurityError::invalid_notional(format!(
                "{} shift types but {} amounts",
                self.shift_types.len(),
                self.notionals.len()
            )));
        }
        if let Some(pair) = self.dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(SecurityError::invalid_notional(format!(
                "dates must be strictly ascending: {} is not before {}",
                pair[0], pair[1]
            )));
        }
        Ok(())
    }

    /// Returns the currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the schedule dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the scheduled amounts.
    pub fn notionals(&self) -> &[f64] {
        &self.notionals
    }

    /// Returns the shift types, one per amount.
    pub fn shift_types(&self) -> &[NotionalShiftType] {
        &self.shift_types
    }

    /// Returns the first scheduled amount.
    pub fn initial_amount(&self) -> f64 {
        self.notionals.first().copied().unwrap_or(0.0)
    }

    /// Returns a copy with the schedule dates replaced.
    ///
    /// Used when rolling schedule dates onto business days; the replacement
    /// must keep the shape of the schedule.
    pub fn with_dates(&self, dates: Vec<Date>) -> SecurityResult<Self> {
        Self::new(
            self.currency,
            dates,
            self.notionals.clone(),
            self.shift_types.clone(),
        )
    }

    /// Returns a copy with each schedule date moved to the matching entry of
    /// `dates`, which must be non-decreasing.
    ///
    /// Rolling onto business days can land two entries on the same date.
    /// Such entries collapse into one outright entry holding the amount
    /// resolved at the later of them.
    pub fn with_rolled_dates(&self, dates: Vec<Date>) -> SecurityResult<Self> {
        if dates.len() != self.dates.len() {
            return Err(SecurityError::invalid_notional(format!(
                "{} rolled dates for {} schedule dates",
                dates.len(),
                self.dates.len()
            )));
        }
        if !dates.windows(2).any(|w| w[0] == w[1]) {
            return self.with_dates(dates);
        }

        let mut merged_dates: Vec<Date> = Vec::with_capacity(dates.len());
        let mut amounts: Vec<f64> = Vec::with_capacity(dates.len());
        for (rolled, original) in dates.into_iter().zip(&self.dates) {
            let amount = self.amount_at(*original);
            if merged_dates.last() == Some(&rolled) {
                if let Some(last) = amounts.last_mut() {
                    *last = amount;
                }
            } else {
                merged_dates.push(rolled);
                amounts.push(amount);
            }
        }
        Self::of_schedule(self.currency, merged_dates, amounts)
    }

    /// Returns the amount in effect on `date`.
    ///
    /// That is the resolved amount at the last schedule date on or before
    /// `date`; before the first date it is the initial amount.
    pub fn amount_at(&self, date: Date) -> f64 {
        if self.dates.is_empty() {
            return self.initial_amount();
        }
        let last_index = match self.dates.iter().rposition(|d| *d <= date) {
            Some(i) => i,
            None => return self.initial_amount(),
        };

        let mut amount = 0.0;
        for (i, step) in self.notionals.iter().take(last_index + 1).enumerate() {
            let shift = self.shift_types.get(i).copied().unwrap_or_default();
            amount = match shift {
                _ if i == 0 => *step,
                NotionalShiftType::Outright => *step,
                NotionalShiftType::Additive => amount + step,
                NotionalShiftType::Multiplicative => amount * step,
            };
        }
        amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_constant_notional() {
        let n = InterestRateSwapNotional::of_amount(Currency::USD, 1e6);
        assert!(n.dates().is_empty());
        assert_relative_eq!(n.initial_amount(), 1e6);
        assert_relative_eq!(n.amount_at(date(1990, 1, 1)), 1e6);
        assert_relative_eq!(n.amount_at(date(2090, 1, 1)), 1e6);
    }

    #[test]
    fn test_step_lookup() {
        let n = InterestRateSwapNotional::of_schedule(
            Currency::EUR,
            vec![date(2025, 1, 15), date(2025, 7, 15), date(2026, 1, 15)],
            vec![100.0, 75.0, 50.0],
        )
        .unwrap();

        assert_relative_eq!(n.amount_at(date(2024, 12, 31)), 100.0);
        assert_relative_eq!(n.amount_at(date(2025, 1, 15)), 100.0);
        assert_relative_eq!(n.amount_at(date(2025, 7, 14)), 100.0);
        assert_relative_eq!(n.amount_at(date(2025, 7, 15)), 75.0);
        assert_relative_eq!(n.amount_at(date(2030, 1, 1)), 50.0);
    }

    #[test]
    fn test_shift_types_resolve_cumulatively() {
        let n = InterestRateSwapNotional::new(
            Currency::USD,
            vec![date(2025, 1, 1), date(2026, 1, 1), date(2027, 1, 1)],
            vec![100.0, 20.0, 0.5],
            vec![
                NotionalShiftType::Outright,
                NotionalShiftType::Additive,
                NotionalShiftType::Multiplicative,
            ],
        )
        .unwrap();

        assert_relative_eq!(n.amount_at(date(2025, 6, 1)), 100.0);
        assert_relative_eq!(n.amount_at(date(2026, 6, 1)), 120.0);
        assert_relative_eq!(n.amount_at(date(2027, 6, 1)), 60.0);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(InterestRateSwapNotional::of_schedule(
            Currency::USD,
            vec![date(2025, 1, 1)],
            vec![1.0, 2.0]
        )
        .is_err());
        assert!(InterestRateSwapNotional::of_schedule(
            Currency::USD,
            vec![date(2025, 2, 1), date(2025, 1, 1)],
            vec![1.0, 2.0]
        )
        .is_err());
        assert!(InterestRateSwapNotional::of_schedule(Currency::USD, vec![], vec![]).is_err());
    }

    #[test]
    fn test_with_dates_keeps_amounts() {
        let n = InterestRateSwapNotional::of_schedule(
            Currency::USD,
            vec![date(2025, 1, 4), date(2025, 7, 5)],
            vec![10.0, 5.0],
        )
        .unwrap();
        let moved = n.with_dates(vec![date(2025, 1, 6), date(2025, 7, 7)]).unwrap();
        assert_eq!(moved.notionals(), n.notionals());
        assert_eq!(moved.dates()[0], date(2025, 1, 6));
        assert!(n.with_dates(vec![date(2025, 1, 6)]).is_err());
    }

    #[test]
    fn test_rolled_dates_collapse_onto_one_day() {
        let n = InterestRateSwapNotional::new(
            Currency::USD,
            vec![date(2025, 1, 15), date(2025, 7, 4), date(2025, 7, 5)],
            vec![100.0, 20.0, 0.5],
            vec![
                NotionalShiftType::Outright,
                NotionalShiftType::Additive,
                NotionalShiftType::Multiplicative,
            ],
        )
        .unwrap();
        let rolled = n
            .with_rolled_dates(vec![date(2025, 1, 15), date(2025, 7, 7), date(2025, 7, 7)])
            .unwrap();

        assert_eq!(rolled.dates(), &[date(2025, 1, 15), date(2025, 7, 7)]);
        assert_relative_eq!(rolled.amount_at(date(2025, 7, 4)), 100.0);
        assert_relative_eq!(rolled.amount_at(date(2025, 7, 7)), 60.0);
        assert!(n
            .with_rolled_dates(vec![date(2025, 1, 15), date(2025, 7, 7), date(2025, 7, 6)])
            .is_err());
    }
}
