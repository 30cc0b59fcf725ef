//! Calendars backed by a [`HolidaySource`].
//!
//! Holidays are read once when the calendar is built, so business-day
//! queries never touch the source and never fail.

use std::sync::Arc;

use tracing::debug;

use secdef_core::calendars::{Calendar, HolidayCalendar};
use secdef_core::{Currency, Date};
use secdef_securities::ids::currency_region_id;
use secdef_securities::ExternalId;

use crate::error::TraitError;
use crate::reference_data::{HolidaySource, RegionSource};

/// A weekend-plus-holidays calendar over one or more holiday identifiers.
///
/// A date is a holiday if any of the identifiers records it. Identifiers
/// with no holiday record contribute weekends only.
#[derive(Debug, Clone)]
pub struct HolidaySourceCalendar {
    inner: HolidayCalendar,
}

impl HolidaySourceCalendar {
    /// Loads the holidays of `ids` from `source`.
    pub fn load(source: &dyn HolidaySource, ids: &[ExternalId]) -> Result<Self, TraitError> {
        let mut dates: Vec<Date> = Vec::new();
        for id in ids {
            match source.get_holidays(id)? {
                Some(holiday) => dates.extend(holiday.dates),
                None => debug!(calendar = %id, "no holidays recorded; weekends only"),
            }
        }
        let name = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("+");
        Ok(Self {
            inner: HolidayCalendar::new(name, dates),
        })
    }
}

impl Calendar for HolidaySourceCalendar {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_business_day(&self, date: Date) -> bool {
        self.inner.is_business_day(date)
    }
}

// =============================================================================
// CALENDAR UTILITIES
// =============================================================================

/// Calendar over the given holiday identifiers.
pub fn calendar_for_ids(
    holidays: &dyn HolidaySource,
    ids: &[ExternalId],
) -> Result<Arc<dyn Calendar>, TraitError> {
    Ok(Arc::new(HolidaySourceCalendar::load(holidays, ids)?))
}

/// Calendar of a currency.
pub fn calendar_for_currency(
    holidays: &dyn HolidaySource,
    currency: Currency,
) -> Result<Arc<dyn Calendar>, TraitError> {
    calendar_for_ids(holidays, &[currency_region_id(currency)])
}

/// Calendar of a region, using every identifier the region carries.
///
/// Fails when the region is unknown.
pub fn calendar_for_region(
    regions: &dyn RegionSource,
    holidays: &dyn HolidaySource,
    region_id: &ExternalId,
) -> Result<Arc<dyn Calendar>, TraitError> {
    let region = regions
        .get_highest_level_region(region_id)?
        .ok_or_else(|| TraitError::NotFound(format!("region {region_id}")))?;
    let ids: Vec<ExternalId> = region.ids.iter().cloned().collect();
    calendar_for_ids(holidays, &ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secdef_core::calendars::BusinessDayConvention;
    use secdef_securities::ids::financial_region_id;
    use secdef_securities::reference::{Holiday, Region};
    use secdef_securities::ExternalIdBundle;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    struct Fixture;

    impl HolidaySource for Fixture {
        fn get_holidays(&self, id: &ExternalId) -> Result<Option<Holiday>, TraitError> {
            if *id == financial_region_id("US") {
                Ok(Some(Holiday {
                    id: id.clone(),
                    dates: vec![date(2025, 7, 4)],
                }))
            } else if *id == financial_region_id("GB") {
                Ok(Some(Holiday {
                    id: id.clone(),
                    dates: vec![date(2025, 8, 25)],
                }))
            } else {
                Ok(None)
            }
        }
    }

    impl RegionSource for Fixture {
        fn get_highest_level_region(&self, id: &ExternalId) -> Result<Option<Region>, TraitError> {
            if *id == financial_region_id("US") {
                Ok(Some(Region {
                    name: "United States".into(),
                    ids: ExternalIdBundle::of(financial_region_id("US")),
                    country: Some("US".into()),
                    currency: Some(Currency::USD),
                }))
            } else {
                Ok(None)
            }
        }
    }

    #[test]
    fn test_joint_holidays() {
        let cal = HolidaySourceCalendar::load(
            &Fixture,
            &[financial_region_id("US"), financial_region_id("GB")],
        )
        .unwrap();
        assert_eq!(cal.name(), "FINANCIAL_REGION~US+FINANCIAL_REGION~GB");
        assert!(!cal.is_business_day(date(2025, 7, 4)));
        assert!(!cal.is_business_day(date(2025, 8, 25)));
        assert!(cal.is_business_day(date(2025, 8, 26)));
    }

    #[test]
    fn test_unknown_ids_give_weekend_calendar() {
        let cal = calendar_for_currency(&Fixture, Currency::JPY).unwrap();
        assert!(cal.is_business_day(date(2025, 7, 4)));
        assert_eq!(
            cal.adjust(date(2025, 7, 5), BusinessDayConvention::Following).unwrap(),
            date(2025, 7, 7)
        );
    }

    #[test]
    fn test_region_calendar() {
        let cal = calendar_for_region(&Fixture, &Fixture, &financial_region_id("US")).unwrap();
        assert!(!cal.is_business_day(date(2025, 7, 4)));
        assert!(matches!(
            calendar_for_region(&Fixture, &Fixture, &financial_region_id("XX")),
            Err(TraitError::NotFound(_))
        ));
    }
}
