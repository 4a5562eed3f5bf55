//! Series identities and data.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::period::TsPeriod;

/// Unique name of a series; the reconciliation key of the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesIdentity(String);

impl SeriesIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name on a single line; multi-line names are joined with spaces.
    pub fn display_name(&self) -> String {
        self.0.lines().map(str::trim).collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for SeriesIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl From<&str> for SeriesIdentity {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for SeriesIdentity {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Observations of a regular series. Missing observations are `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TsData {
    start: TsPeriod,
    values: Vec<f64>,
}

impl TsData {
    pub fn new(start: TsPeriod, values: Vec<f64>) -> Self {
        Self { start, values }
    }

    pub fn start(&self) -> TsPeriod {
        self.start
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of periods, missing ones included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Number of non-missing observations.
    pub fn observation_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_finite()).count()
    }

    /// True when the series has no usable observation.
    pub fn is_empty(&self) -> bool {
        self.observation_count() == 0
    }

    pub fn period_at(&self, index: usize) -> TsPeriod {
        self.start.plus(index as i64)
    }

    /// Period of the last value, if any.
    pub fn last_period(&self) -> Option<TsPeriod> {
        self.values
            .len()
            .checked_sub(1)
            .map(|last| self.period_at(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_joins_lines() {
        let id = SeriesIdentity::new("Exports\nBelgium\n");
        assert_eq!(id.display_name(), "Exports Belgium");
        assert_eq!(id.as_str(), "Exports\nBelgium\n");
    }

    #[test]
    fn test_last_period() {
        let start = TsPeriod::monthly(2023, 11).unwrap();
        let data = TsData::new(start, vec![1.0, 2.0, 3.0]);
        assert_eq!(data.last_period(), Some(TsPeriod::monthly(2024, 1).unwrap()));
        assert_eq!(TsData::new(start, vec![]).last_period(), None);
    }

    #[test]
    fn test_is_empty_ignores_missing() {
        let start = TsPeriod::monthly(2024, 1).unwrap();
        assert!(TsData::new(start, vec![]).is_empty());
        assert!(TsData::new(start, vec![f64::NAN, f64::NAN]).is_empty());
        let data = TsData::new(start, vec![f64::NAN, 4.0]);
        assert!(!data.is_empty());
        assert_eq!(data.observation_count(), 1);
    }
}
