//! Accrual schedule generation.
//!
//! Schedules are generated on unadjusted dates:
//! - start stubs roll backward from the end date, so the irregular period
//!   sits at the front
//! - end stubs roll forward from the start date
//! - `Both` rolls forward between the two stub boundary dates
//! - `None` rolls backward
//!
//! Long stubs merge the irregular period into its regular neighbour.
//! The roll-date adjuster applies to generated dates only, never to the
//! start, end or explicit stub dates.
//!
//! # Example
//!
//! ```rust
//! use secdef_core::{Date, Tenor};
//! use secdef_instruments::schedule::{Schedule, ScheduleConfig};
//!
//! let config = ScheduleConfig::new(
//!     Date::from_ymd(2025, 1, 15).unwrap(),
//!     Date::from_ymd(2026, 1, 15).unwrap(),
//!     Tenor::Months(6),
//! );
//! let schedule = Schedule::generate(&config).unwrap();
//! assert_eq!(schedule.period_count(), 2);
//! ```

use secdef_core::calendars::{BusinessDayConvention, Calendar, RollDateAdjuster};
use secdef_core::types::StubType;
use secdef_core::{Date, Tenor};

use crate::error::{InstrumentError, InstrumentResult};

/// Configuration for schedule generation.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// First accrual start date.
    pub start_date: Date,
    /// Last accrual end date.
    pub end_date: Date,
    /// Regular period length; zero gives a single period.
    pub tenor: Tenor,
    /// Stub placement.
    pub stub_type: StubType,
    /// End of the start stub, if fixed.
    pub first_stub_date: Option<Date>,
    /// Start of the end stub, if fixed.
    pub last_stub_date: Option<Date>,
    /// Roll rule for generated dates.
    pub roll: RollDateAdjuster,
}

impl ScheduleConfig {
    /// Creates a configuration with no stub and no roll rule.
    #[must_use]
    pub fn new(start_date: Date, end_date: Date, tenor: Tenor) -> Self {
        Self {
            start_date,
            end_date,
            tenor,
            stub_type: StubType::None,
            first_stub_date: None,
            last_stub_date: None,
            roll: RollDateAdjuster::Identity,
        }
    }

    /// Sets the stub type.
    #[must_use]
    pub fn with_stub_type(mut self, stub_type: StubType) -> Self {
        self.stub_type = stub_type;
        self
    }

    /// Sets the end of the start stub.
    #[must_use]
    pub fn with_first_stub_date(mut self, date: Option<Date>) -> Self {
        self.first_stub_date = date;
        self
    }

    /// Sets the start of the end stub.
    #[must_use]
    pub fn with_last_stub_date(mut self, date: Option<Date>) -> Self {
        self.last_stub_date = date;
        self
    }

    /// Sets the roll rule.
    #[must_use]
    pub fn with_roll(mut self, roll: RollDateAdjuster) -> Self {
        self.roll = roll;
        self
    }

    fn inside(&self, date: Option<Date>) -> Option<Date> {
        date.filter(|d| *d > self.start_date && *d < self.end_date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Backward,
    Forward,
}

/// Unadjusted accrual dates, start and end included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    dates: Vec<Date>,
}

impl Schedule {
    /// Generates the schedule described by `config`.
    pub fn generate(config: &ScheduleConfig) -> InstrumentResult<Self> {
        let (start, end) = (config.start_date, config.end_date);
        if end <= start {
            return Err(InstrumentError::invalid_schedule(format!(
                "End date {end} must be after start date {start}"
            )));
        }
        if config.tenor.is_zero() {
            return Ok(Self {
                dates: vec![start, end],
            });
        }
        if config.tenor.add_to(start)? <= start {
            return Err(InstrumentError::invalid_schedule(format!(
                "Accrual tenor must be positive: {}",
                config.tenor
            )));
        }

        let mut interior = match config.stub_type {
            StubType::ShortStart | StubType::LongStart => match config.inside(config.first_stub_date) {
                Some(stub_end) => {
                    let (mut dates, _) =
                        roll_between(stub_end, end, config.tenor, config.roll, Direction::Backward)?;
                    dates.insert(0, stub_end);
                    dates
                }
                None => {
                    let (mut dates, exact) =
                        roll_between(start, end, config.tenor, config.roll, Direction::Backward)?;
                    if config.stub_type == StubType::LongStart && !exact && !dates.is_empty() {
                        dates.remove(0);
                    }
                    dates
                }
            },
            StubType::ShortEnd | StubType::LongEnd => match config.inside(config.last_stub_date) {
                Some(stub_start) => {
                    let (mut dates, _) =
                        roll_between(start, stub_start, config.tenor, config.roll, Direction::Forward)?;
                    dates.push(stub_start);
                    dates
                }
                None => {
                    let (mut dates, exact) =
                        roll_between(start, end, config.tenor, config.roll, Direction::Forward)?;
                    if config.stub_type == StubType::LongEnd && !exact && !dates.is_empty() {
                        dates.pop();
                    }
                    dates
                }
            },
            StubType::Both => {
                let lo = config.inside(config.first_stub_date).unwrap_or(start);
                let hi = config.inside(config.last_stub_date).unwrap_or(end);
                if lo >= hi {
                    vec![lo]
                } else {
                    let (mut dates, _) =
                        roll_between(lo, hi, config.tenor, config.roll, Direction::Forward)?;
                    dates.insert(0, lo);
                    dates.push(hi);
                    dates
                }
            }
            StubType::None => roll_between(start, end, config.tenor, config.roll, Direction::Backward)?.0,
        };

        interior.retain(|d| *d > start && *d < end);
        let mut dates = Vec::with_capacity(interior.len() + 2);
        dates.push(start);
        dates.extend(interior);
        dates.push(end);
        dates.dedup();
        Ok(Self { dates })
    }

    /// Unadjusted dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Number of accrual periods.
    pub fn period_count(&self) -> usize {
        self.dates.len() - 1
    }

    /// Iterates over `(start, end)` unadjusted periods.
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        self.dates.windows(2).map(|w| (w[0], w[1]))
    }

    /// Business-day adjusted dates.
    ///
    /// The last date uses `end_convention`, every other date `convention`.
    pub fn adjusted(
        &self,
        calendar: &dyn Calendar,
        convention: BusinessDayConvention,
        end_convention: BusinessDayConvention,
    ) -> InstrumentResult<Vec<Date>> {
        let last = self.dates.len() - 1;
        self.dates
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                let conv = if i == last { end_convention } else { convention };
                Ok(calendar.adjust(d, conv)?)
            })
            .collect()
    }
}

/// Rolls `tenor` steps from one end of `(lo, hi)` towards the other.
///
/// Returns the dates strictly inside the interval in ascending order, and
/// whether the first step past the far end landed exactly on it.
fn roll_between(
    lo: Date,
    hi: Date,
    tenor: Tenor,
    roll: RollDateAdjuster,
    direction: Direction,
) -> InstrumentResult<(Vec<Date>, bool)> {
    let mut dates = Vec::new();
    let mut k = 1;
    loop {
        let raw = match direction {
            Direction::Backward => tenor.times(-k).add_to(hi)?,
            Direction::Forward => tenor.times(k).add_to(lo)?,
        };
        let (past, exact) = match direction {
            Direction::Backward => (raw <= lo, raw == lo),
            Direction::Forward => (raw >= hi, raw == hi),
        };
        if past {
            dates.sort();
            dates.dedup();
            return Ok((dates, exact));
        }
        let rolled = roll.adjust(raw);
        if rolled > lo && rolled < hi {
            dates.push(rolled);
        }
        k += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secdef_core::calendars::{RollConvention, WeekendCalendar};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn generate(config: ScheduleConfig) -> Vec<Date> {
        Schedule::generate(&config).unwrap().dates().to_vec()
    }

    #[test]
    fn test_regular_quarterly() {
        let dates = generate(ScheduleConfig::new(
            date(2025, 1, 15),
            date(2026, 1, 15),
            Tenor::Months(3),
        ));
        assert_eq!(
            dates,
            vec![
                date(2025, 1, 15),
                date(2025, 4, 15),
                date(2025, 7, 15),
                date(2025, 10, 15),
                date(2026, 1, 15)
            ]
        );
    }

    #[test]
    fn test_start_stubs() {
        let base = ScheduleConfig::new(date(2025, 2, 1), date(2026, 1, 15), Tenor::Months(3));
        let short = generate(base.clone().with_stub_type(StubType::ShortStart));
        assert_eq!(
            short,
            vec![
                date(2025, 2, 1),
                date(2025, 4, 15),
                date(2025, 7, 15),
                date(2025, 10, 15),
                date(2026, 1, 15)
            ]
        );

        let long = generate(base.with_stub_type(StubType::LongStart));
        assert_eq!(
            long,
            vec![
                date(2025, 2, 1),
                date(2025, 7, 15),
                date(2025, 10, 15),
                date(2026, 1, 15)
            ]
        );
    }

    #[test]
    fn test_end_stubs() {
        let base = ScheduleConfig::new(date(2025, 2, 1), date(2026, 1, 15), Tenor::Months(3));
        let short = generate(base.clone().with_stub_type(StubType::ShortEnd));
        assert_eq!(
            short,
            vec![
                date(2025, 2, 1),
                date(2025, 5, 1),
                date(2025, 8, 1),
                date(2025, 11, 1),
                date(2026, 1, 15)
            ]
        );

        let long = generate(base.with_stub_type(StubType::LongEnd));
        assert_eq!(long.len(), 4);
        assert_eq!(long[2], date(2025, 8, 1));
    }

    #[test]
    fn test_explicit_stub_dates() {
        let config = ScheduleConfig::new(date(2025, 1, 10), date(2026, 1, 5), Tenor::Months(3))
            .with_stub_type(StubType::Both)
            .with_first_stub_date(Some(date(2025, 3, 15)))
            .with_last_stub_date(Some(date(2025, 12, 15)));
        assert_eq!(
            generate(config),
            vec![
                date(2025, 1, 10),
                date(2025, 3, 15),
                date(2025, 6, 15),
                date(2025, 9, 15),
                date(2025, 12, 15),
                date(2026, 1, 5)
            ]
        );

        let config = ScheduleConfig::new(date(2025, 1, 10), date(2025, 10, 15), Tenor::Months(3))
            .with_stub_type(StubType::ShortStart)
            .with_first_stub_date(Some(date(2025, 4, 15)));
        assert_eq!(
            generate(config),
            vec![
                date(2025, 1, 10),
                date(2025, 4, 15),
                date(2025, 7, 15),
                date(2025, 10, 15)
            ]
        );
    }

    #[test]
    fn test_imm_roll() {
        let config = ScheduleConfig::new(date(2025, 3, 19), date(2026, 3, 18), Tenor::Months(3))
            .with_roll(RollConvention::Imm.adjuster());
        assert_eq!(
            generate(config),
            vec![
                date(2025, 3, 19),
                date(2025, 6, 18),
                date(2025, 9, 17),
                date(2025, 12, 17),
                date(2026, 3, 18)
            ]
        );
    }

    #[test]
    fn test_zero_tenor_single_period() {
        let schedule = Schedule::generate(&ScheduleConfig::new(
            date(2025, 1, 2),
            date(2030, 1, 2),
            Tenor::ZERO,
        ))
        .unwrap();
        assert_eq!(schedule.period_count(), 1);
        assert_eq!(
            schedule.periods().next(),
            Some((date(2025, 1, 2), date(2030, 1, 2)))
        );
    }

    #[test]
    fn test_invalid_range() {
        let err = Schedule::generate(&ScheduleConfig::new(
            date(2025, 1, 2),
            date(2025, 1, 2),
            Tenor::Months(3),
        ))
        .unwrap_err();
        assert!(matches!(err, InstrumentError::InvalidSchedule { .. }));
    }

    #[test]
    fn test_adjusted_dates() {
        let schedule = Schedule::generate(&ScheduleConfig::new(
            date(2025, 1, 5),
            date(2025, 7, 5),
            Tenor::Months(3),
        ))
        .unwrap();
        let adjusted = schedule
            .adjusted(
                &WeekendCalendar,
                BusinessDayConvention::Following,
                BusinessDayConvention::Preceding,
            )
            .unwrap();
        assert_eq!(adjusted, vec![date(2025, 1, 6), date(2025, 4, 7), date(2025, 7, 4)]);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn stub_type() -> impl Strategy<Value = StubType> {
            prop_oneof![
                Just(StubType::None),
                Just(StubType::ShortStart),
                Just(StubType::LongStart),
                Just(StubType::ShortEnd),
                Just(StubType::LongEnd),
            ]
        }

        proptest! {
            #[test]
            fn dates_strictly_increase_between_bounds(
                start_offset in 0i64..3_000,
                length in 1i64..4_000,
                months in prop::sample::select(vec![1, 3, 6, 12]),
                stub in stub_type(),
            ) {
                let start = date(2020, 1, 1).add_days(start_offset);
                let end = start.add_days(length);
                let config = ScheduleConfig::new(start, end, Tenor::Months(months))
                    .with_stub_type(stub);
                let schedule = Schedule::generate(&config).unwrap();
                let dates = schedule.dates();
                prop_assert_eq!(dates[0], start);
                prop_assert_eq!(dates[dates.len() - 1], end);
                prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
