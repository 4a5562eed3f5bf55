//! Periods of regular time series.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CheckLastError, Result};

/// Sampling frequency of a regular series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Yearly,
    HalfYearly,
    Quarterly,
    Monthly,
}

impl Frequency {
    /// Number of periods in one year.
    pub fn periods_per_year(self) -> u32 {
        match self {
            Frequency::Yearly => 1,
            Frequency::HalfYearly => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    fn months(self) -> u32 {
        12 / self.periods_per_year()
    }
}

/// One period of a regular series, e.g. `2024-Q1`.
///
/// `position` is zero-based within the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TsPeriod {
    frequency: Frequency,
    year: i32,
    position: u32,
}

impl TsPeriod {
    /// Create a period, validating the position against the frequency.
    pub fn new(frequency: Frequency, year: i32, position: u32) -> Result<Self> {
        if position >= frequency.periods_per_year() {
            return Err(CheckLastError::Parse(format!(
                "position {} out of range for {:?}",
                position, frequency
            )));
        }
        Ok(Self {
            frequency,
            year,
            position,
        })
    }

    /// Monthly period from a one-based month.
    pub fn monthly(year: i32, month: u32) -> Result<Self> {
        if month == 0 {
            return Err(CheckLastError::Parse("month 0 is not valid".to_string()));
        }
        Self::new(Frequency::Monthly, year, month - 1)
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    /// Period `n` steps after (or before, when negative) this one.
    pub fn plus(&self, n: i64) -> Self {
        let per_year = i64::from(self.frequency.periods_per_year());
        let index = i64::from(self.year) * per_year + i64::from(self.position) + n;
        Self {
            frequency: self.frequency,
            year: index.div_euclid(per_year) as i32,
            position: index.rem_euclid(per_year) as u32,
        }
    }

    fn first_month(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.position * self.frequency.months())
    }
}

impl Ord for TsPeriod {
    fn cmp(&self, other: &Self) -> Ordering {
        self.first_month()
            .cmp(&other.first_month())
            .then_with(|| {
                self.frequency
                    .periods_per_year()
                    .cmp(&other.frequency.periods_per_year())
            })
    }
}

impl PartialOrd for TsPeriod {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.frequency {
            Frequency::Yearly => write!(f, "{}", self.year),
            Frequency::HalfYearly => write!(f, "{}-H{}", self.year, self.position + 1),
            Frequency::Quarterly => write!(f, "{}-Q{}", self.year, self.position + 1),
            Frequency::Monthly => write!(f, "{}-{:02}", self.year, self.position + 1),
        }
    }
}

impl FromStr for TsPeriod {
    type Err = CheckLastError;

    /// Parses `2024`, `2024-H2`, `2024-Q3`, `2024-07` and `2024-07-31`.
    fn from_str(s: &str) -> Result<Self> {
        let bad = || CheckLastError::Parse(format!("invalid period '{}'", s));
        let text = s.trim();

        let (year, rest) = match text.split_once('-') {
            None => {
                let year = text.parse::<i32>().map_err(|_| bad())?;
                return Self::new(Frequency::Yearly, year, 0);
            }
            Some((year, rest)) => (year.parse::<i32>().map_err(|_| bad())?, rest),
        };

        let number = |digits: &str| digits.parse::<u32>().map_err(|_| bad());
        let period = match rest.chars().next() {
            Some('H') | Some('h') => {
                Self::new(Frequency::HalfYearly, year, number(&rest[1..])?.wrapping_sub(1))
            }
            Some('Q') | Some('q') => {
                Self::new(Frequency::Quarterly, year, number(&rest[1..])?.wrapping_sub(1))
            }
            _ => {
                let month = rest.split('-').next().unwrap_or(rest);
                Self::monthly(year, number(month)?)
            }
        };
        period.map_err(|_| bad())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        assert_eq!(TsPeriod::new(Frequency::Yearly, 2024, 0).unwrap().to_string(), "2024");
        assert_eq!(TsPeriod::new(Frequency::HalfYearly, 2024, 1).unwrap().to_string(), "2024-H2");
        assert_eq!(TsPeriod::new(Frequency::Quarterly, 2024, 0).unwrap().to_string(), "2024-Q1");
        assert_eq!(TsPeriod::monthly(2024, 3).unwrap().to_string(), "2024-03");
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!("2024".parse::<TsPeriod>().unwrap().frequency(), Frequency::Yearly);
        assert_eq!("2024-h1".parse::<TsPeriod>().unwrap().position(), 0);
        assert_eq!("2024-Q4".parse::<TsPeriod>().unwrap().position(), 3);
        let date = "2024-07-31".parse::<TsPeriod>().unwrap();
        assert_eq!(date, TsPeriod::monthly(2024, 7).unwrap());
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!("2024-13".parse::<TsPeriod>().is_err());
        assert!("2024-Q5".parse::<TsPeriod>().is_err());
        assert!("2024-Q0".parse::<TsPeriod>().is_err());
        assert!("2024-00".parse::<TsPeriod>().is_err());
        assert!("abcd".parse::<TsPeriod>().is_err());
    }

    #[test]
    fn test_plus_crosses_years() {
        let dec = TsPeriod::monthly(2023, 12).unwrap();
        assert_eq!(dec.plus(1), TsPeriod::monthly(2024, 1).unwrap());
        assert_eq!(dec.plus(-12), TsPeriod::monthly(2022, 12).unwrap());
        let q1 = TsPeriod::new(Frequency::Quarterly, 2024, 0).unwrap();
        assert_eq!(q1.plus(-1).to_string(), "2023-Q4");
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = TsPeriod::monthly(2023, 11).unwrap();
        let b = TsPeriod::monthly(2024, 2).unwrap();
        let c = TsPeriod::new(Frequency::Quarterly, 2024, 1).unwrap();
        assert!(a < b);
        assert!(b < c);
    }
}
