//! Roll conventions and the date adjusters they select.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Date;

/// Roll convention of a swap leg.
///
/// Fixes the day within the month on which regular periods roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RollConvention {
    /// No roll rule; dates roll from the schedule anchor.
    #[default]
    None,
    /// Last day of the month.
    Eom,
    /// Third Wednesday of the month.
    Imm,
    /// Thursday before the second Friday (Australian IMM).
    ImmAud,
    /// Monday before the third Wednesday (Canadian IMM).
    ImmCad,
    /// First Wednesday after the ninth day (New Zealand IMM).
    ImmNzd,
    /// Floating rate note convention; dates follow the anchor.
    Frn,
    /// Second Friday (Sydney Futures Exchange).
    Sfe,
    /// Monday of the week (treasury bill auctions).
    Tbill,
}

impl RollConvention {
    /// Returns the adjuster applying this convention to unadjusted dates.
    #[must_use]
    pub fn adjuster(&self) -> RollDateAdjuster {
        match self {
            RollConvention::None | RollConvention::Frn => RollDateAdjuster::Identity,
            RollConvention::Eom => RollDateAdjuster::EndOfMonth,
            RollConvention::Imm => RollDateAdjuster::NthWeekday {
                nth: 3,
                weekday: Weekday::Wed,
                shift_days: 0,
            },
            RollConvention::ImmAud => RollDateAdjuster::NthWeekday {
                nth: 2,
                weekday: Weekday::Fri,
                shift_days: -1,
            },
            RollConvention::ImmCad => RollDateAdjuster::NthWeekday {
                nth: 3,
                weekday: Weekday::Wed,
                shift_days: -2,
            },
            RollConvention::ImmNzd => RollDateAdjuster::WeekdayAfterDay {
                day: 9,
                weekday: Weekday::Wed,
            },
            RollConvention::Sfe => RollDateAdjuster::NthWeekday {
                nth: 2,
                weekday: Weekday::Fri,
                shift_days: 0,
            },
            RollConvention::Tbill => RollDateAdjuster::StartOfWeek,
        }
    }
}

impl std::fmt::Display for RollConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RollConvention::None => "NONE",
            RollConvention::Eom => "EOM",
            RollConvention::Imm => "IMM",
            RollConvention::ImmAud => "IMM_AUD",
            RollConvention::ImmCad => "IMM_CAD",
            RollConvention::ImmNzd => "IMM_NZD",
            RollConvention::Frn => "FRN",
            RollConvention::Sfe => "SFE",
            RollConvention::Tbill => "TBILL",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for RollConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NONE" | "" => Ok(RollConvention::None),
            "EOM" => Ok(RollConvention::Eom),
            "IMM" => Ok(RollConvention::Imm),
            "IMM_AUD" => Ok(RollConvention::ImmAud),
            "IMM_CAD" => Ok(RollConvention::ImmCad),
            "IMM_NZD" => Ok(RollConvention::ImmNzd),
            "FRN" => Ok(RollConvention::Frn),
            "SFE" => Ok(RollConvention::Sfe),
            "TBILL" => Ok(RollConvention::Tbill),
            _ => Err(CoreError::unknown("roll convention", s)),
        }
    }
}

/// Moves an unadjusted schedule date to its roll day within the same month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RollDateAdjuster {
    /// Leaves dates unchanged.
    Identity,
    /// Last calendar day of the month.
    EndOfMonth,
    /// The `nth` occurrence of `weekday`, shifted by `shift_days`.
    NthWeekday {
        /// 1-based occurrence.
        nth: u32,
        /// Target weekday.
        weekday: Weekday,
        /// Calendar days added after locating the weekday.
        shift_days: i64,
    },
    /// The first `weekday` strictly after day `day` of the month.
    WeekdayAfterDay {
        /// Day of month.
        day: u32,
        /// Target weekday.
        weekday: Weekday,
    },
    /// Monday of the date's week.
    StartOfWeek,
}

impl RollDateAdjuster {
    /// Returns true if the adjuster leaves dates unchanged.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        matches!(self, RollDateAdjuster::Identity)
    }

    /// Applies the roll rule to a date.
    #[must_use]
    pub fn adjust(&self, date: Date) -> Date {
        match *self {
            RollDateAdjuster::Identity => date,
            RollDateAdjuster::EndOfMonth => date.end_of_month(),
            RollDateAdjuster::NthWeekday {
                nth,
                weekday,
                shift_days,
            } => date.nth_weekday_of_month(nth, weekday).add_days(shift_days),
            RollDateAdjuster::WeekdayAfterDay { day, weekday } => date
                .start_of_month()
                .add_days(i64::from(day))
                .next_or_same(weekday),
            RollDateAdjuster::StartOfWeek => date.previous_or_same(Weekday::Mon),
        }
    }
}
