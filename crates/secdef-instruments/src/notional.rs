//! Notional providers.

use std::fmt;
use std::sync::Arc;

use secdef_core::Date;

/// A signed notional as a function of date.
///
/// Cheap to clone; clones share the underlying function.
///
/// # Example
///
/// ```rust
/// use secdef_core::Date;
/// use secdef_instruments::NotionalProvider;
///
/// let provider = NotionalProvider::constant(-1_000_000.0);
/// let d = Date::from_ymd(2030, 1, 1).unwrap();
/// assert_eq!(provider.amount_at(d), -1_000_000.0);
/// ```
#[derive(Clone)]
pub struct NotionalProvider {
    f: Arc<dyn Fn(Date) -> f64 + Send + Sync>,
}

impl NotionalProvider {
    /// Wraps a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Date) -> f64 + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// A provider returning `amount` on every date.
    #[must_use]
    pub fn constant(amount: f64) -> Self {
        Self::new(move |_| amount)
    }

    /// Notional in effect on `date`.
    pub fn amount_at(&self, date: Date) -> f64 {
        (self.f)(date)
    }
}

impl fmt::Debug for NotionalProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionalProvider").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_function() {
        let switch = Date::from_ymd(2026, 1, 1).unwrap();
        let provider = NotionalProvider::new(move |d| if d < switch { 100.0 } else { 50.0 });
        let copy = provider.clone();
        assert_eq!(copy.amount_at(Date::from_ymd(2025, 6, 1).unwrap()), 100.0);
        assert_eq!(copy.amount_at(switch), 50.0);
    }
}
