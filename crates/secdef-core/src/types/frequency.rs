//! Payment and reset frequencies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Tenor;
use crate::error::CoreError;

/// Payment, reset or compounding frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// A single payment at maturity.
    Never,
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year)
    #[default]
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Every two months
    Bimonthly,
    /// Monthly payments (12 per year)
    Monthly,
    /// Every two weeks
    Biweekly,
    /// Weekly payments
    Weekly,
    /// Daily
    Daily,
    /// Continuous; has no period representation.
    Continuous,
}

impl Frequency {
    /// Returns the period between payments.
    ///
    /// `Never` maps to the zero tenor and `Continuous` has no period.
    #[must_use]
    pub fn period(&self) -> Option<Tenor> {
        match self {
            Frequency::Never => Some(Tenor::ZERO),
            Frequency::Annual => Some(Tenor::Years(1)),
            Frequency::SemiAnnual => Some(Tenor::Months(6)),
            Frequency::Quarterly => Some(Tenor::Months(3)),
            Frequency::Bimonthly => Some(Tenor::Months(2)),
            Frequency::Monthly => Some(Tenor::Months(1)),
            Frequency::Biweekly => Some(Tenor::Weeks(2)),
            Frequency::Weekly => Some(Tenor::Weeks(1)),
            Frequency::Daily => Some(Tenor::Days(1)),
            Frequency::Continuous => None,
        }
    }

    /// Returns the number of periods per year, zero for `Never`.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Never | Frequency::Continuous => 0,
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Bimonthly => 6,
            Frequency::Monthly => 12,
            Frequency::Biweekly => 26,
            Frequency::Weekly => 52,
            Frequency::Daily => 365,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Never => "Never",
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Bimonthly => "Bimonthly",
            Frequency::Monthly => "Monthly",
            Frequency::Biweekly => "Biweekly",
            Frequency::Weekly => "Weekly",
            Frequency::Daily => "Daily",
            Frequency::Continuous => "Continuous",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Frequency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['-', '_', ' '], "").as_str() {
            "NEVER" | "ZERO" | "1T" => Ok(Frequency::Never),
            "ANNUAL" | "1Y" | "12M" => Ok(Frequency::Annual),
            "SEMIANNUAL" | "6M" => Ok(Frequency::SemiAnnual),
            "QUARTERLY" | "3M" => Ok(Frequency::Quarterly),
            "BIMONTHLY" | "2M" => Ok(Frequency::Bimonthly),
            "MONTHLY" | "1M" => Ok(Frequency::Monthly),
            "BIWEEKLY" | "2W" => Ok(Frequency::Biweekly),
            "WEEKLY" | "1W" => Ok(Frequency::Weekly),
            "DAILY" | "1D" => Ok(Frequency::Daily),
            "CONTINUOUS" => Ok(Frequency::Continuous),
            _ => Err(CoreError::unknown("frequency", s)),
        }
    }
}
