//! Tenor (period) type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Date;
use crate::error::{CoreError, CoreResult};

/// A length of time expressed in calendar units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Tenor {
    /// A number of calendar days.
    Days(i32),
    /// A number of weeks.
    Weeks(i32),
    /// A number of months.
    Months(i32),
    /// A number of years.
    Years(i32),
}

impl Tenor {
    /// The zero-length tenor.
    pub const ZERO: Tenor = Tenor::Days(0);

    /// Returns true if the tenor has zero length.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(
            self,
            Tenor::Days(0) | Tenor::Weeks(0) | Tenor::Months(0) | Tenor::Years(0)
        )
    }

    /// Expresses whole years as months, so `1Y` becomes `12M`.
    #[must_use]
    pub fn normalized(&self) -> Tenor {
        match *self {
            Tenor::Years(n) => Tenor::Months(n * 12),
            other => other,
        }
    }

    /// Returns the number of months for month/year tenors.
    #[must_use]
    pub fn months(&self) -> Option<i32> {
        match *self {
            Tenor::Months(n) => Some(n),
            Tenor::Years(n) => Some(n * 12),
            Tenor::Days(_) | Tenor::Weeks(_) => None,
        }
    }

    /// Returns the tenor multiplied by `factor`.
    #[must_use]
    pub fn times(&self, factor: i32) -> Tenor {
        match *self {
            Tenor::Days(n) => Tenor::Days(n * factor),
            Tenor::Weeks(n) => Tenor::Weeks(n * factor),
            Tenor::Months(n) => Tenor::Months(n * factor),
            Tenor::Years(n) => Tenor::Years(n * factor),
        }
    }

    /// Adds the tenor to a date, clamping to month end where needed.
    pub fn add_to(&self, date: Date) -> CoreResult<Date> {
        match *self {
            Tenor::Days(n) => Ok(date.add_days(i64::from(n))),
            Tenor::Weeks(n) => Ok(date.add_days(7 * i64::from(n))),
            Tenor::Months(n) => date.add_months(n),
            Tenor::Years(n) => date.add_years(n),
        }
    }

    /// Subtracts the tenor from a date.
    pub fn subtract_from(&self, date: Date) -> CoreResult<Date> {
        self.times(-1).add_to(date)
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tenor::Days(n) => write!(f, "{n}D"),
            Tenor::Weeks(n) => write!(f, "{n}W"),
            Tenor::Months(n) => write!(f, "{n}M"),
            Tenor::Years(n) => write!(f, "{n}Y"),
        }
    }
}

impl FromStr for Tenor {
    type Err = CoreError;

    /// Parses `"3M"`, `"1Y"`, `"2W"`, `"0D"` (ISO `"P3M"` is also accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_uppercase();
        let body = trimmed.strip_prefix('P').unwrap_or(&trimmed);
        if body.len() < 2 {
            return Err(CoreError::invalid_tenor(s));
        }
        let (count, unit) = body.split_at(body.len() - 1);
        let n: i32 = count
            .parse()
            .map_err(|_| CoreError::invalid_tenor(format!("bad count in '{s}'")))?;
        match unit {
            "D" => Ok(Tenor::Days(n)),
            "W" => Ok(Tenor::Weeks(n)),
            "M" => Ok(Tenor::Months(n)),
            "Y" => Ok(Tenor::Years(n)),
            _ => Err(CoreError::invalid_tenor(format!("bad unit in '{s}'"))),
        }
    }
}

impl TryFrom<String> for Tenor {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tenor> for String {
    fn from(tenor: Tenor) -> Self {
        tenor.to_string()
    }
}
