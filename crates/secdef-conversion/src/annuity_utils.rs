//! Helpers shared by the swap converters.
//!
//! [`parse_stubs`] turns a leg's stub descriptor into the start and end
//! [`CouponStub`]s the annuity builders consume, and [`notional_provider`]
//! turns a notional schedule into a signed amount-by-date function.

use std::sync::Arc;

use tracing::debug;

use secdef_core::calendars::{BusinessDayConvention, Calendar, RollConvention, RollDateAdjuster};
use secdef_core::{Date, Frequency, Tenor};
use secdef_instruments::{AnnuityDefinition, CouponStub, IborIndex, NotionalProvider, SwapDefinition};
use secdef_securities::notional::InterestRateSwapNotional;
use secdef_securities::stub::{StubCalculationMethod, StubType};
use secdef_securities::swap::DateAdjustment;
use secdef_securities::ExternalId;
use secdef_traits::{calendar_for_ids, HolidaySource};

use crate::error::{ConversionError, ConversionResult};

/// Start and end stubs of a leg.
pub type StubPair = (Option<CouponStub>, Option<CouponStub>);

/// Resolves the stubs described by `method`.
///
/// Reference rate ids on the descriptor are resolved with `resolve_index`.
/// On each side an explicit rate wins over an index pair, which wins over a
/// bare stub. Dual stubs carry their end dates on both sides; a single start
/// or end stub carries its date only with a rate.
///
/// # Example
///
/// ```rust
/// use secdef_conversion::annuity_utils::parse_stubs;
/// use secdef_instruments::CouponStub;
/// use secdef_securities::stub::{StubCalculationMethod, StubType};
///
/// let method = StubCalculationMethod::new(StubType::ShortStart);
/// let stubs = parse_stubs(Some(&method), |_| unreachable!()).unwrap();
/// assert_eq!(stubs, (Some(CouponStub::new(StubType::ShortStart)), None));
/// ```
pub fn parse_stubs<F>(
    method: Option<&StubCalculationMethod>,
    mut resolve_index: F,
) -> ConversionResult<StubPair>
where
    F: FnMut(&ExternalId) -> ConversionResult<IborIndex>,
{
    let Some(method) = method else {
        return Ok((None, None));
    };
    method.validate()?;
    let stub_type = method.stub_type();

    let mut resolve_pair = |ids: Option<(&ExternalId, &ExternalId)>| -> ConversionResult<_> {
        match ids {
            Some((start, end)) => Ok(Some((resolve_index(start)?, resolve_index(end)?))),
            None => Ok(None),
        }
    };
    let first_indices = resolve_pair(method.first_stub_reference_rate_ids())?;
    let last_indices = resolve_pair(method.last_stub_reference_rate_ids())?;

    let stubs = match stub_type {
        StubType::Both => (
            Some(side(
                stub_type,
                method.first_stub_rate(),
                first_indices,
                method.first_stub_end_date(),
                true,
            )),
            Some(side(
                stub_type,
                method.last_stub_rate(),
                last_indices,
                method.last_stub_end_date(),
                true,
            )),
        ),
        StubType::ShortStart | StubType::LongStart => (
            Some(side(
                stub_type,
                method.first_stub_rate(),
                first_indices,
                method.first_stub_end_date(),
                false,
            )),
            None,
        ),
        StubType::ShortEnd | StubType::LongEnd => (
            None,
            Some(side(
                stub_type,
                method.last_stub_rate(),
                last_indices,
                method.last_stub_end_date(),
                false,
            )),
        ),
        StubType::None => (Some(CouponStub::new(stub_type)), Some(CouponStub::new(stub_type))),
    };
    debug!(?stub_type, start = stubs.0.is_some(), end = stubs.1.is_some(), "resolved stubs");
    Ok(stubs)
}

fn side(
    stub_type: StubType,
    rate: Option<f64>,
    indices: Option<(IborIndex, IborIndex)>,
    date: Option<Date>,
    dual: bool,
) -> CouponStub {
    match (rate, indices) {
        (Some(rate), _) => CouponStub::with_rate(stub_type, date, rate),
        (None, Some((first, second))) => {
            CouponStub::interpolated(stub_type, date.filter(|_| dual), first, second)
        }
        (None, None) if dual => match date {
            Some(date) => CouponStub::dated(stub_type, date),
            None => CouponStub::new(stub_type),
        },
        (None, None) => CouponStub::new(stub_type),
    }
}

/// Builds the signed notional of a leg.
///
/// Schedule dates are rolled onto business days of `calendar`; the input
/// schedule is left untouched. Entries that roll onto the same day collapse
/// into the later one. Payer legs are negative.
pub fn notional_provider(
    notional: &InterestRateSwapNotional,
    convention: BusinessDayConvention,
    calendar: &dyn Calendar,
    payer: bool,
) -> ConversionResult<NotionalProvider> {
    let adjusted_dates = notional
        .dates()
        .iter()
        .map(|date| calendar.adjust(*date, convention))
        .collect::<Result<Vec<_>, _>>()?;
    let adjusted = notional.with_rolled_dates(adjusted_dates)?;
    let sign = if payer { -1.0 } else { 1.0 };
    Ok(NotionalProvider::new(move |date| sign * adjusted.amount_at(date)))
}

/// Accrual tenor of a payment frequency.
///
/// `Never` is a single period and whole years are expressed in months.
pub fn tenor_from_frequency(frequency: Frequency) -> ConversionResult<Tenor> {
    frequency
        .period()
        .map(|tenor| tenor.normalized())
        .ok_or_else(|| {
            ConversionError::unsupported(format!(
                "Frequency {frequency:?} has no accrual period"
            ))
        })
}

/// Roll-date adjuster of a roll convention.
pub fn roll_date_adjuster(roll: RollConvention) -> RollDateAdjuster {
    roll.adjuster()
}

/// Joint holiday calendar over `ids`.
pub fn joint_calendar(
    holidays: &dyn HolidaySource,
    ids: &[ExternalId],
) -> ConversionResult<Arc<dyn Calendar>> {
    Ok(calendar_for_ids(holidays, ids)?)
}

/// Calendar and convention of an optional date adjustment.
///
/// `None` unless the adjustment names at least one calendar.
pub fn adjustment(
    holidays: &dyn HolidaySource,
    adjustment: Option<&DateAdjustment>,
) -> ConversionResult<Option<(Arc<dyn Calendar>, BusinessDayConvention)>> {
    match adjustment {
        Some(adjustment) if !adjustment.calendars.is_empty() => Ok(Some((
            joint_calendar(holidays, &adjustment.calendars)?,
            adjustment.convention,
        ))),
        _ => Ok(None),
    }
}

/// Classifies a converted pair of legs.
///
/// A leg counts as fixed only if the security leg is fixed and every
/// coupon of its annuity pays a known rate.
pub fn classify_swap(
    pay_leg: AnnuityDefinition,
    pay_is_fixed: bool,
    receive_leg: AnnuityDefinition,
    receive_is_fixed: bool,
) -> SwapDefinition {
    let pay_fixed = pay_is_fixed && pay_leg.all_fixed();
    let receive_fixed = receive_is_fixed && receive_leg.all_fixed();
    let swap = match (pay_fixed, receive_fixed) {
        (true, false) => SwapDefinition::fixed_against(pay_leg, receive_leg),
        (false, true) => SwapDefinition::fixed_against(receive_leg, pay_leg),
        _ => SwapDefinition::Generic {
            pay_leg,
            receive_leg,
        },
    };
    debug!(kind = swap.kind(), "classified swap");
    swap
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use secdef_core::calendars::{HolidayCalendar, WeekendCalendar};
    use secdef_core::daycounts::DayCountConvention;
    use secdef_core::Currency;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn libor(name: &str, months: i32) -> IborIndex {
        IborIndex::new(
            name,
            Currency::USD,
            Tenor::Months(months),
            2,
            DayCountConvention::Act360,
            BusinessDayConvention::ModifiedFollowing,
            false,
        )
    }

    fn resolver(id: &ExternalId) -> ConversionResult<IborIndex> {
        match id.value() {
            "USDLIBOR1M" => Ok(libor("USDLIBOR1M", 1)),
            "USDLIBOR3M" => Ok(libor("USDLIBOR3M", 3)),
            other => Err(ConversionError::missing(format!(
                "Could not resolve an index convention for rate reference id: {other}"
            ))),
        }
    }

    fn no_index(_: &ExternalId) -> ConversionResult<IborIndex> {
        Err(ConversionError::missing("unexpected index lookup"))
    }

    #[test]
    fn test_no_method() {
        assert_eq!(parse_stubs(None, no_index).unwrap(), (None, None));
    }

    #[test]
    fn test_short_start_bare() {
        let method = StubCalculationMethod::new(StubType::ShortStart);
        assert_eq!(
            parse_stubs(Some(&method), no_index).unwrap(),
            (Some(CouponStub::new(StubType::ShortStart)), None)
        );
    }

    #[test]
    fn test_both_with_first_rate_only() {
        let method = StubCalculationMethod::new(StubType::Both)
            .with_first_stub_end_date(date(2025, 3, 15))
            .with_last_stub_end_date(date(2029, 12, 15))
            .with_first_stub_rate(0.021);
        let (start, end) = parse_stubs(Some(&method), no_index).unwrap();
        let start = start.unwrap();
        let end = end.unwrap();
        assert_eq!(start.rate(), Some(0.021));
        assert_eq!(start.effective_date(), Some(date(2025, 3, 15)));
        assert_eq!(end.rate(), None);
        assert_eq!(end.effective_date(), Some(date(2029, 12, 15)));
    }

    #[test]
    fn test_rate_beats_index_pair() {
        let method = StubCalculationMethod::new(StubType::LongEnd)
            .with_last_stub_rate(0.03)
            .with_last_stub_end_date(date(2030, 1, 15))
            .with_last_stub_start_reference_rate_id(ExternalId::of("TICKER", "USDLIBOR1M"))
            .with_last_stub_end_reference_rate_id(ExternalId::of("TICKER", "USDLIBOR3M"));
        let (start, end) = parse_stubs(Some(&method), resolver).unwrap();
        assert!(start.is_none());
        let end = end.unwrap();
        assert!(end.has_stub_rate());
        assert!(!end.is_interpolated());
        assert_eq!(end.effective_date(), Some(date(2030, 1, 15)));
    }

    #[test]
    fn test_index_pair_on_single_stub_has_no_date() {
        let method = StubCalculationMethod::new(StubType::ShortStart)
            .with_first_stub_end_date(date(2025, 3, 15))
            .with_first_stub_start_reference_rate_id(ExternalId::of("TICKER", "USDLIBOR1M"))
            .with_first_stub_end_reference_rate_id(ExternalId::of("TICKER", "USDLIBOR3M"));
        let (start, _) = parse_stubs(Some(&method), resolver).unwrap();
        let start = start.unwrap();
        assert!(start.is_interpolated());
        assert_eq!(start.effective_date(), None);
        let (first, second) = start.indices().unwrap();
        assert_eq!(first.tenor, Tenor::Months(1));
        assert_eq!(second.tenor, Tenor::Months(3));
    }

    #[test]
    fn test_nan_rate_is_unset() {
        let method = StubCalculationMethod::new(StubType::ShortStart).with_first_stub_rate(f64::NAN);
        let (start, _) = parse_stubs(Some(&method), no_index).unwrap();
        assert!(!start.unwrap().has_stub_rate());
    }

    #[test]
    fn test_none_type_gives_bare_markers() {
        let method = StubCalculationMethod::new(StubType::None);
        let (start, end) = parse_stubs(Some(&method), no_index).unwrap();
        assert_eq!(start, Some(CouponStub::new(StubType::None)));
        assert_eq!(end, Some(CouponStub::new(StubType::None)));
    }

    #[test]
    fn test_validation_and_resolution_errors() {
        let method = StubCalculationMethod::new(StubType::Both);
        assert!(matches!(
            parse_stubs(Some(&method), no_index),
            Err(ConversionError::Validation(_))
        ));

        let method = StubCalculationMethod::new(StubType::ShortStart)
            .with_first_stub_start_reference_rate_id(ExternalId::of("TICKER", "EURIBOR1M"))
            .with_first_stub_end_reference_rate_id(ExternalId::of("TICKER", "USDLIBOR3M"));
        let err = parse_stubs(Some(&method), resolver).unwrap_err();
        assert!(err.to_string().contains("EURIBOR1M"));
    }

    #[test]
    fn test_notional_adjusts_schedule_dates() {
        let schedule = InterestRateSwapNotional::of_schedule(
            Currency::USD,
            vec![date(2025, 1, 15), date(2025, 7, 5)],
            vec![1_000_000.0, 600_000.0],
        )
        .unwrap();
        let provider = notional_provider(
            &schedule,
            BusinessDayConvention::Following,
            &WeekendCalendar,
            true,
        )
        .unwrap();
        // 2025-07-05 is a Saturday; the step takes effect on Monday.
        assert_eq!(provider.amount_at(date(2025, 7, 5)), -1_000_000.0);
        assert_eq!(provider.amount_at(date(2025, 7, 7)), -600_000.0);
        assert_eq!(schedule.dates()[1], date(2025, 7, 5));
    }

    #[test]
    fn test_notional_holiday_calendar() {
        let calendar = HolidayCalendar::new("US", [date(2025, 7, 4)]);
        let schedule = InterestRateSwapNotional::of_schedule(
            Currency::USD,
            vec![date(2025, 1, 15), date(2025, 7, 4)],
            vec![100.0, 50.0],
        )
        .unwrap();
        let provider =
            notional_provider(&schedule, BusinessDayConvention::Preceding, &calendar, false).unwrap();
        assert_eq!(provider.amount_at(date(2025, 7, 3)), 50.0);
    }

    #[test]
    fn test_notional_dates_rolling_onto_same_day() {
        let calendar = HolidayCalendar::new("US", [date(2025, 7, 4)]);
        let schedule = InterestRateSwapNotional::of_schedule(
            Currency::USD,
            vec![date(2025, 1, 15), date(2025, 7, 4), date(2025, 7, 5)],
            vec![100.0, 80.0, 60.0],
        )
        .unwrap();
        let provider =
            notional_provider(&schedule, BusinessDayConvention::Following, &calendar, false).unwrap();
        assert_eq!(provider.amount_at(date(2025, 7, 4)), 100.0);
        assert_eq!(provider.amount_at(date(2025, 7, 7)), 60.0);
        assert_eq!(schedule.dates().len(), 3);
    }

    #[test]
    fn test_tenor_from_frequency() {
        assert_eq!(tenor_from_frequency(Frequency::Never).unwrap(), Tenor::ZERO);
        assert_eq!(tenor_from_frequency(Frequency::Annual).unwrap(), Tenor::Months(12));
        assert_eq!(tenor_from_frequency(Frequency::Quarterly).unwrap(), Tenor::Months(3));
        assert!(matches!(
            tenor_from_frequency(Frequency::Continuous),
            Err(ConversionError::Unsupported(_))
        ));
    }

    fn stub_method() -> impl Strategy<Value = StubCalculationMethod> {
        let stub_type = prop_oneof![
            Just(StubType::None),
            Just(StubType::ShortStart),
            Just(StubType::LongStart),
            Just(StubType::ShortEnd),
            Just(StubType::LongEnd),
            Just(StubType::Both),
        ];
        (
            stub_type,
            prop::option::of(-0.01f64..0.1),
            prop::option::of(-0.01f64..0.1),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(stub_type, first_rate, last_rate, first_pair, last_pair)| {
                let mut method = StubCalculationMethod::new(stub_type)
                    .with_first_stub_end_date(date(2025, 3, 15))
                    .with_last_stub_end_date(date(2029, 12, 15));
                if let Some(rate) = first_rate {
                    method = method.with_first_stub_rate(rate);
                }
                if let Some(rate) = last_rate {
                    method = method.with_last_stub_rate(rate);
                }
                if first_pair {
                    method = method
                        .with_first_stub_start_reference_rate_id(ExternalId::of("TICKER", "USDLIBOR1M"))
                        .with_first_stub_end_reference_rate_id(ExternalId::of("TICKER", "USDLIBOR3M"));
                }
                if last_pair {
                    method = method
                        .with_last_stub_start_reference_rate_id(ExternalId::of("TICKER", "USDLIBOR1M"))
                        .with_last_stub_end_reference_rate_id(ExternalId::of("TICKER", "USDLIBOR3M"));
                }
                method
            })
    }

    proptest! {
        #[test]
        fn parse_stubs_is_idempotent(method in stub_method()) {
            let first = parse_stubs(Some(&method), resolver).unwrap();
            let second = parse_stubs(Some(&method.clone()), resolver).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn stub_side_follows_type(method in stub_method()) {
            let (start, end) = parse_stubs(Some(&method), resolver).unwrap();
            match method.stub_type() {
                StubType::ShortStart | StubType::LongStart => {
                    prop_assert!(start.is_some() && end.is_none());
                }
                StubType::ShortEnd | StubType::LongEnd => {
                    prop_assert!(start.is_none() && end.is_some());
                }
                _ => prop_assert!(start.is_some() && end.is_some()),
            }
            if let Some(stub) = start.filter(|_| method.stub_type().has_first_stub()) {
                prop_assert_eq!(stub.rate(), method.first_stub_rate());
            }
        }

        #[test]
        fn constant_notional_is_signed_initial_amount(
            amount in 1.0f64..1e9,
            payer in any::<bool>(),
            offset in 0i64..20_000,
        ) {
            let notional = InterestRateSwapNotional::of_amount(Currency::EUR, amount);
            let provider = notional_provider(
                &notional,
                BusinessDayConvention::ModifiedFollowing,
                &WeekendCalendar,
                payer,
            ).unwrap();
            let expected = if payer { -amount } else { amount };
            prop_assert_eq!(provider.amount_at(date(1990, 1, 1).add_days(offset)), expected);
        }

        #[test]
        fn business_day_schedule_is_unchanged(
            start in 0i64..5_000,
            steps in prop::collection::vec(1i64..400, 1..6),
        ) {
            let calendar = WeekendCalendar;
            let mut dates = Vec::new();
            let mut current = date(2000, 1, 3).add_days(start);
            for step in steps {
                current = calendar
                    .adjust(current.add_days(step), BusinessDayConvention::Following)
                    .unwrap();
                if dates.last().map_or(true, |last| current > *last) {
                    dates.push(current);
                }
            }
            let amounts: Vec<f64> = (1..=dates.len()).map(|i| i as f64 * 100.0).collect();
            let notional = InterestRateSwapNotional::of_schedule(Currency::USD, dates.clone(), amounts).unwrap();
            let provider = notional_provider(
                &notional,
                BusinessDayConvention::Following,
                &calendar,
                false,
            ).unwrap();
            for d in dates {
                prop_assert_eq!(provider.amount_at(d), notional.amount_at(d));
            }
        }

        #[test]
        fn rolled_schedule_matches_at_business_days(
            start in 0i64..5_000,
            steps in prop::collection::vec(1i64..5, 1..8),
        ) {
            let calendar = WeekendCalendar;
            let mut dates = vec![date(2000, 1, 3).add_days(start)];
            for step in steps {
                let next = dates[dates.len() - 1].add_days(step);
                dates.push(next);
            }
            let amounts: Vec<f64> = (1..=dates.len()).map(|i| i as f64 * 10.0).collect();
            let notional = InterestRateSwapNotional::of_schedule(Currency::USD, dates.clone(), amounts).unwrap();
            let provider = notional_provider(
                &notional,
                BusinessDayConvention::Following,
                &calendar,
                true,
            ).unwrap();
            for d in dates {
                let rolled = calendar.adjust(d, BusinessDayConvention::Following).unwrap();
                prop_assert_eq!(provider.amount_at(rolled), -notional.amount_at(rolled));
            }
        }
    }
}
