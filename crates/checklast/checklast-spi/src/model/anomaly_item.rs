//! Per-series check state.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::back_count::BackCount;
use super::check_outcome::CheckOutcome;
use super::period::TsPeriod;
use super::series::{SeriesIdentity, TsData};
use super::severity::ErrorKind;

/// Processing status of an [`AnomalyItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemStatus {
    #[default]
    Unprocessed,
    Processed,
    /// The series has no usable data.
    Invalid,
    /// The checker could not model the series.
    NotProcessable,
}

impl ItemStatus {
    /// Banner text shown for failed items.
    pub fn message(self) -> Option<&'static str> {
        match self {
            ItemStatus::Invalid => Some("Invalid or empty data"),
            ItemStatus::NotProcessable => Some("Check can't be processed"),
            ItemStatus::Unprocessed | ItemStatus::Processed => None,
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ItemStatus::Unprocessed => "Unprocessed",
            ItemStatus::Processed => "Processed",
            ItemStatus::Invalid => "Invalid",
            ItemStatus::NotProcessable => "NotProcessable",
        };
        f.write_str(text)
    }
}

/// Observed value of a held-out period and its forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodCheck {
    pub observed: f64,
    pub forecast: f64,
}

impl PeriodCheck {
    pub fn new(observed: f64, forecast: f64) -> Self {
        Self { observed, forecast }
    }

    /// `|observed - forecast|`
    pub fn absolute_error(&self) -> Option<f64> {
        let error = (self.observed - self.forecast).abs();
        error.is_finite().then_some(error)
    }

    /// Absolute error scaled by `|observed|`; absent when observed is zero.
    pub fn relative_error(&self) -> Option<f64> {
        let scale = self.observed.abs();
        if scale == 0.0 || !scale.is_finite() {
            return None;
        }
        self.absolute_error().map(|error| error / scale)
    }
}

/// Check state of one tracked series.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyItem {
    identity: SeriesIdentity,
    series: Option<Arc<TsData>>,
    back_count: BackCount,
    status: ItemStatus,
    results: Vec<Option<PeriodCheck>>,
    reason: Option<String>,
}

impl AnomalyItem {
    /// Fresh, unprocessed item.
    pub fn new(identity: SeriesIdentity, series: Option<Arc<TsData>>, back_count: BackCount) -> Self {
        Self {
            identity,
            series,
            back_count,
            status: ItemStatus::Unprocessed,
            results: Vec::new(),
            reason: None,
        }
    }

    pub fn identity(&self) -> &SeriesIdentity {
        &self.identity
    }

    pub fn series(&self) -> Option<&Arc<TsData>> {
        self.series.as_ref()
    }

    /// Swap the series handle. Results are kept.
    pub fn set_series(&mut self, series: Option<Arc<TsData>>) {
        self.series = series;
    }

    pub fn last_period(&self) -> Option<TsPeriod> {
        self.series.as_ref().and_then(|data| data.last_period())
    }

    pub fn back_count(&self) -> BackCount {
        self.back_count
    }

    /// Change the number of checked periods; stored results are cleared.
    pub fn set_back_count(&mut self, back_count: BackCount) {
        self.back_count = back_count;
        self.reset();
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn is_processed(&self) -> bool {
        self.status == ItemStatus::Processed
    }

    pub fn is_invalid(&self) -> bool {
        self.status == ItemStatus::Invalid
    }

    pub fn is_not_processable(&self) -> bool {
        self.status == ItemStatus::NotProcessable
    }

    /// Failure reason reported by the checker, if any.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Per-period results, most recent period first.
    pub fn results(&self) -> &[Option<PeriodCheck>] {
        &self.results
    }

    pub fn period_check(&self, period: usize) -> Option<&PeriodCheck> {
        self.results.get(period).and_then(Option::as_ref)
    }

    pub fn absolute_error(&self, period: usize) -> Option<f64> {
        self.period_check(period).and_then(PeriodCheck::absolute_error)
    }

    pub fn relative_error(&self, period: usize) -> Option<f64> {
        self.period_check(period).and_then(PeriodCheck::relative_error)
    }

    pub fn error(&self, period: usize, kind: ErrorKind) -> Option<f64> {
        match kind {
            ErrorKind::Absolute => self.absolute_error(period),
            ErrorKind::Relative => self.relative_error(period),
        }
    }

    /// Clear results and return to `Unprocessed`.
    pub fn reset(&mut self) {
        self.status = ItemStatus::Unprocessed;
        self.results.clear();
        self.reason = None;
    }

    /// Record a check outcome. Only an unprocessed item accepts one;
    /// returns whether the outcome was applied.
    pub fn apply(&mut self, outcome: CheckOutcome) -> bool {
        if self.status != ItemStatus::Unprocessed {
            return false;
        }
        match outcome {
            CheckOutcome::Success(mut periods) => {
                periods.truncate(self.back_count.get());
                self.results = periods;
                self.status = ItemStatus::Processed;
            }
            CheckOutcome::Empty => {
                self.results.clear();
                self.status = ItemStatus::Invalid;
            }
            CheckOutcome::ModelingFailure(reason) => {
                self.results.clear();
                self.reason = Some(reason);
                self.status = ItemStatus::NotProcessable;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> AnomalyItem {
        AnomalyItem::new(SeriesIdentity::new("A"), None, BackCount::new(2).unwrap())
    }

    #[test]
    fn test_errors_from_period_check() {
        let check = PeriodCheck::new(100.0, 95.0);
        assert_eq!(check.absolute_error(), Some(5.0));
        assert!((check.relative_error().unwrap() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_relative_error_absent_for_zero_observed() {
        let check = PeriodCheck::new(0.0, 3.0);
        assert_eq!(check.absolute_error(), Some(3.0));
        assert_eq!(check.relative_error(), None);
    }

    #[test]
    fn test_apply_success_truncates_to_back_count() {
        let mut item = item();
        let periods = vec![
            Some(PeriodCheck::new(10.0, 9.0)),
            None,
            Some(PeriodCheck::new(1.0, 1.0)),
        ];
        assert!(item.apply(CheckOutcome::Success(periods)));
        assert!(item.is_processed());
        assert_eq!(item.results().len(), 2);
        assert_eq!(item.absolute_error(0), Some(1.0));
        assert_eq!(item.absolute_error(1), None);
        assert_eq!(item.relative_error(2), None);
    }

    #[test]
    fn test_apply_only_from_unprocessed() {
        let mut item = item();
        assert!(item.apply(CheckOutcome::ModelingFailure("no model".to_string())));
        assert!(!item.apply(CheckOutcome::Success(vec![Some(PeriodCheck::new(1.0, 2.0))])));
        assert!(item.is_not_processable());
        assert_eq!(item.reason(), Some("no model"));
        assert!(item.results().is_empty());
    }

    #[test]
    fn test_set_back_count_resets() {
        let mut item = item();
        item.apply(CheckOutcome::Empty);
        assert!(item.is_invalid());
        item.set_back_count(BackCount::new(3).unwrap());
        assert_eq!(item.status(), ItemStatus::Unprocessed);
        assert_eq!(item.back_count().get(), 3);
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(ItemStatus::Invalid.message(), Some("Invalid or empty data"));
        assert_eq!(ItemStatus::NotProcessable.message(), Some("Check can't be processed"));
        assert_eq!(ItemStatus::Processed.message(), None);
    }
}
