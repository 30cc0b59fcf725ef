//! Market convention enums shared by the security and instrument models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which irregular period(s) a leg schedule has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StubType {
    /// Regular schedule, no stub.
    #[default]
    None,
    /// Short first period.
    ShortStart,
    /// Long first period.
    LongStart,
    /// Short last period.
    ShortEnd,
    /// Long last period.
    LongEnd,
    /// Both a first and a last stub period.
    Both,
}

impl StubType {
    /// Returns true for short or long start stubs.
    pub fn is_start(&self) -> bool {
        matches!(self, StubType::ShortStart | StubType::LongStart)
    }

    /// Returns true for short or long end stubs.
    pub fn is_end(&self) -> bool {
        matches!(self, StubType::ShortEnd | StubType::LongEnd)
    }

    /// Returns true if the schedule has a first stub period.
    pub fn has_first_stub(&self) -> bool {
        self.is_start() || *self == StubType::Both
    }

    /// Returns true if the schedule has a last stub period.
    pub fn has_last_stub(&self) -> bool {
        self.is_end() || *self == StubType::Both
    }
}

impl fmt::Display for StubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StubType::None => "NONE",
            StubType::ShortStart => "SHORT_START",
            StubType::LongStart => "LONG_START",
            StubType::ShortEnd => "SHORT_END",
            StubType::LongEnd => "LONG_END",
            StubType::Both => "BOTH",
        };
        write!(f, "{name}")
    }
}

/// Market yield convention quoted for a bond or bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum YieldConvention {
    /// Street convention (compounded at coupon frequency).
    #[default]
    StreetConvention,
    /// US Treasury equivalent.
    UsTreasuryEquivalent,
    /// ISMA / ICMA annual yield.
    Isma,
    /// Discount yield (bills).
    Discount,
    /// Money-market yield.
    Money,
    /// Brazilian inflation-linked bond yield.
    BrazilIlBond,
    /// UK index-linked yield.
    UkIlBond,
}

