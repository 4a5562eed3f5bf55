//! Number of trailing periods checked.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CheckLastError, Result};

/// Number of trailing periods held out by a check; always 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BackCount(u8);

impl BackCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;

    pub fn new(count: u8) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&count) {
            return Err(CheckLastError::invalid_config(
                "back_count",
                format!("number of last checked values can only be 1, 2 or 3, got {}", count),
            ));
        }
        Ok(Self(count))
    }

    pub fn get(self) -> usize {
        usize::from(self.0)
    }
}

impl Default for BackCount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for BackCount {
    type Error = CheckLastError;

    fn try_from(count: u8) -> Result<Self> {
        Self::new(count)
    }
}

impl From<BackCount> for u8 {
    fn from(count: BackCount) -> Self {
        count.0
    }
}

impl fmt::Display for BackCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_one_to_three() {
        for n in 1..=3u8 {
            assert_eq!(BackCount::new(n).unwrap().get(), usize::from(n));
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            BackCount::new(0),
            Err(CheckLastError::InvalidConfiguration { .. })
        ));
        assert!(BackCount::new(4).is_err());
    }

    #[test]
    fn test_default_is_one() {
        assert_eq!(BackCount::default().get(), 1);
    }
}
