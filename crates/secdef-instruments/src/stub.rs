//! Resolved coupon stubs.
//!
//! A [`CouponStub`] tells an annuity builder how to treat an irregular first
//! or last period: at a fixed rate, by interpolating between two IBOR
//! indices, or as a plain irregular period of the given type.

use serde::{Deserialize, Serialize};

use secdef_core::types::StubType;
use secdef_core::Date;

use crate::index::IborIndex;

/// An irregular period description attached to one end of a leg.
///
/// A stub carries at most one of a stub rate or an index pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponStub {
    stub_type: StubType,
    effective_date: Option<Date>,
    rate: Option<f64>,
    indices: Option<(IborIndex, IborIndex)>,
}

impl CouponStub {
    /// A stub with only its type.
    #[must_use]
    pub fn new(stub_type: StubType) -> Self {
        Self {
            stub_type,
            effective_date: None,
            rate: None,
            indices: None,
        }
    }

    /// A stub ending (start side) or starting (end side) on `date`.
    #[must_use]
    pub fn dated(stub_type: StubType, date: Date) -> Self {
        Self {
            effective_date: Some(date),
            ..Self::new(stub_type)
        }
    }

    /// A stub paying a fixed `rate`.
    #[must_use]
    pub fn with_rate(stub_type: StubType, date: Option<Date>, rate: f64) -> Self {
        Self {
            effective_date: date,
            rate: Some(rate),
            ..Self::new(stub_type)
        }
    }

    /// A stub interpolated between `first` and `second`.
    #[must_use]
    pub fn interpolated(
        stub_type: StubType,
        date: Option<Date>,
        first: IborIndex,
        second: IborIndex,
    ) -> Self {
        Self {
            effective_date: date,
            indices: Some((first, second)),
            ..Self::new(stub_type)
        }
    }

    /// Stub type.
    pub fn stub_type(&self) -> StubType {
        self.stub_type
    }

    /// Stub boundary date, if fixed.
    pub fn effective_date(&self) -> Option<Date> {
        self.effective_date
    }

    /// Stub rate, if fixed.
    pub fn rate(&self) -> Option<f64> {
        self.rate
    }

    /// Interpolation indices, shorter tenor first.
    pub fn indices(&self) -> Option<(&IborIndex, &IborIndex)> {
        self.indices.as_ref().map(|(a, b)| (a, b))
    }

    /// Returns true if the stub interpolates between two indices.
    pub fn is_interpolated(&self) -> bool {
        self.indices.is_some()
    }

    /// Returns true if the stub pays a fixed rate.
    pub fn has_stub_rate(&self) -> bool {
        self.rate.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secdef_core::calendars::BusinessDayConvention;
    use secdef_core::daycounts::DayCountConvention;
    use secdef_core::{Currency, Tenor};

    fn libor(months: i32) -> IborIndex {
        IborIndex::new(
            format!("USDLIBOR{months}M"),
            Currency::USD,
            Tenor::Months(months),
            2,
            DayCountConvention::Act360,
            BusinessDayConvention::ModifiedFollowing,
            false,
        )
    }

    #[test]
    fn test_kinds_are_exclusive() {
        let bare = CouponStub::new(StubType::ShortStart);
        assert!(!bare.has_stub_rate());
        assert!(!bare.is_interpolated());
        assert_eq!(bare.effective_date(), None);

        let rate = CouponStub::with_rate(StubType::ShortStart, None, 0.01);
        assert!(rate.has_stub_rate());
        assert!(!rate.is_interpolated());

        let interp = CouponStub::interpolated(StubType::LongEnd, None, libor(1), libor(3));
        assert!(interp.is_interpolated());
        assert!(!interp.has_stub_rate());
        assert_eq!(interp.indices().unwrap().1.tenor, Tenor::Months(3));
    }

    #[test]
    fn test_value_equality() {
        let d = Date::from_ymd(2025, 3, 20).unwrap();
        assert_eq!(
            CouponStub::dated(StubType::Both, d),
            CouponStub::dated(StubType::Both, d)
        );
        assert_ne!(
            CouponStub::dated(StubType::Both, d),
            CouponStub::new(StubType::Both)
        );
    }
}
