//! Incremental anomaly tracker.
//!
//! The tracker keeps one [`AnomalyItem`] per series of the current collection.
//! Checks run lazily: an item is only handed to the [`ForecastChecker`] when it
//! is selected or explicitly processed, and configuration changes merely reset
//! items so that the next selection recomputes them.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use checklast_api::{ReportParameters, Thresholds, TrackerConfig};
use checklast_spi::{
    AnomalyItem, BackCount, CellKey, CheckLastError, CheckOutcome, ErrorKind, ExportSink,
    ForecastChecker, ItemStatus, ModelSpecification, Result, SeriesIdentity, SeriesSource,
    Severity, TrackerEvent, TrackerListener, TsData,
};
use tracing::{debug, info, warn};

use crate::checkers::TimeoutChecker;
use crate::classification::classify;
use crate::export;
use crate::table::{SortKey, TableProjection};

/// Per-session state of last-period checks over a series collection.
pub struct AnomalyTracker {
    base_checker: Arc<dyn ForecastChecker>,
    checker: Arc<dyn ForecastChecker>,
    config: TrackerConfig,
    items: HashMap<SeriesIdentity, AnomalyItem>,
    order: Vec<SeriesIdentity>,
    listeners: Vec<Box<dyn TrackerListener>>,
}

impl AnomalyTracker {
    /// Create an empty tracker. Fails when `config` is invalid.
    pub fn new(config: TrackerConfig, checker: Arc<dyn ForecastChecker>) -> Result<Self> {
        config.validate()?;
        let effective = Self::effective_checker(&checker, &config);
        Ok(Self {
            base_checker: checker,
            checker: effective,
            config,
            items: HashMap::new(),
            order: Vec::new(),
            listeners: Vec::new(),
        })
    }

    /// Create an empty tracker with the default configuration.
    pub fn with_checker(checker: Arc<dyn ForecastChecker>) -> Self {
        let config = TrackerConfig::default();
        Self {
            checker: Self::effective_checker(&checker, &config),
            base_checker: checker,
            config,
            items: HashMap::new(),
            order: Vec::new(),
            listeners: Vec::new(),
        }
    }

    fn effective_checker(
        checker: &Arc<dyn ForecastChecker>,
        config: &TrackerConfig,
    ) -> Arc<dyn ForecastChecker> {
        match config.check_timeout() {
            Some(timeout) => Arc::new(TimeoutChecker::new(Arc::clone(checker), timeout)),
            None => Arc::clone(checker),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn back_count(&self) -> BackCount {
        self.config.back_count
    }

    pub fn specification(&self) -> ModelSpecification {
        self.config.specification
    }

    pub fn thresholds(&self) -> Thresholds {
        self.config.thresholds
    }

    /// Number of tracked series.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Series identities in display order.
    pub fn identities(&self) -> &[SeriesIdentity] {
        &self.order
    }

    /// Items in display order.
    pub fn items(&self) -> impl Iterator<Item = &AnomalyItem> + '_ {
        self.order.iter().filter_map(move |id| self.items.get(id))
    }

    pub fn item(&self, index: usize) -> Option<&AnomalyItem> {
        self.order.get(index).and_then(|id| self.items.get(id))
    }

    pub fn get(&self, identity: &SeriesIdentity) -> Option<&AnomalyItem> {
        self.items.get(identity)
    }

    pub fn index_of(&self, identity: &SeriesIdentity) -> Option<usize> {
        self.order.iter().position(|id| id == identity)
    }

    /// Banner text for a failed row.
    pub fn message(&self, index: usize) -> Option<&'static str> {
        self.item(index).and_then(|item| item.status().message())
    }

    /// Severity band of an error cell. Only relative errors are classified.
    pub fn severity(&self, index: usize, key: CellKey) -> Option<Severity> {
        if key.kind != ErrorKind::Relative {
            return None;
        }
        let item = self.item(index)?;
        classify(item.relative_error(key.period), &self.config.thresholds)
    }

    pub fn report_parameters(&self) -> ReportParameters {
        ReportParameters::new(&self.config, self.len())
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    pub fn add_listener(&mut self, listener: impl TrackerListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&self, event: TrackerEvent) {
        for listener in &self.listeners {
            listener.on_event(&event);
        }
    }

    // ------------------------------------------------------------------
    // Reconciliation
    // ------------------------------------------------------------------

    /// Synchronize tracked items with a new ordered collection.
    ///
    /// Items whose identity survives keep their status and results; new
    /// identities start unprocessed; missing ones are dropped. Duplicate
    /// identities collapse to their last occurrence.
    pub fn reconcile<I>(&mut self, series: I)
    where
        I: IntoIterator<Item = (SeriesIdentity, Arc<TsData>)>,
    {
        let mut latest: HashMap<SeriesIdentity, (usize, Arc<TsData>)> = HashMap::new();
        for (position, (identity, data)) in series.into_iter().enumerate() {
            latest.insert(identity, (position, data));
        }

        let mut entries: Vec<(SeriesIdentity, usize, Arc<TsData>)> = latest
            .into_iter()
            .map(|(identity, (position, data))| (identity, position, data))
            .collect();
        entries.sort_by_key(|(_, position, _)| *position);

        let mut previous = std::mem::take(&mut self.items);
        let mut order = Vec::with_capacity(entries.len());
        let mut created = 0usize;

        for (identity, _, data) in entries {
            let item = match previous.remove(&identity) {
                Some(mut item) => {
                    item.set_series(Some(data));
                    item
                }
                None => {
                    created += 1;
                    AnomalyItem::new(identity.clone(), Some(data), self.config.back_count)
                }
            };
            self.items.insert(identity.clone(), item);
            order.push(identity);
        }
        self.order = order;

        info!(
            series = self.order.len(),
            created,
            dropped = previous.len(),
            "reconciled series collection"
        );
        self.emit(TrackerEvent::CollectionChanged {
            count: self.order.len(),
        });
    }

    /// Reconcile with the current content of `source`.
    pub fn on_collection_change(&mut self, source: &dyn SeriesSource) {
        self.reconcile(source.series());
    }

    // ------------------------------------------------------------------
    // Processing
    // ------------------------------------------------------------------

    /// Check the item at `index` if it is still unprocessed.
    ///
    /// Returns the item status afterwards, or `None` for an unknown index.
    pub fn process(&mut self, index: usize) -> Option<ItemStatus> {
        if self.process_at(index)? {
            self.emit(TrackerEvent::RowUpdated { index });
        }
        self.item(index).map(AnomalyItem::status)
    }

    /// Same as [`process`](Self::process), addressed by identity.
    pub fn process_identity(&mut self, identity: &SeriesIdentity) -> Option<ItemStatus> {
        let index = self.index_of(identity)?;
        self.process(index)
    }

    /// Select a row: process it when needed and notify listeners.
    pub fn select(&mut self, index: Option<usize>) -> Option<&AnomalyItem> {
        let index = index.filter(|&i| i < self.order.len());
        if let Some(i) = index {
            if self.process_at(i) == Some(true) {
                self.emit(TrackerEvent::RowUpdated { index: i });
            }
        }
        self.emit(TrackerEvent::SelectionChanged { index });
        index.and_then(|i| self.item(i))
    }

    /// Check every unprocessed item, in display order.
    ///
    /// Returns the number of items checked. With the `parallel` feature the
    /// checker calls run concurrently; results are still applied and
    /// notified in display order.
    pub fn process_all(&mut self) -> usize {
        let spec = self.config.specification;
        let back_count = self.config.back_count;
        let pending: Vec<(usize, Arc<TsData>)> = self
            .order
            .iter()
            .enumerate()
            .filter_map(|(index, id)| {
                let item = self.items.get(id)?;
                if item.status() != ItemStatus::Unprocessed {
                    return None;
                }
                item.series().map(|data| (index, Arc::clone(data)))
            })
            .collect();

        let checker = self.checker.as_ref();

        #[cfg(feature = "parallel")]
        let outcomes: Vec<(usize, CheckOutcome)> = {
            use rayon::prelude::*;
            pending
                .par_iter()
                .map(|(index, data)| (*index, run_check(checker, data, spec, back_count)))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<(usize, CheckOutcome)> = pending
            .iter()
            .map(|(index, data)| (*index, run_check(checker, data, spec, back_count)))
            .collect();

        let count = outcomes.len();
        for (index, outcome) in outcomes {
            if self.apply_outcome(index, outcome) {
                self.emit(TrackerEvent::RowUpdated { index });
            }
        }
        count
    }

    /// `Some(true)` when a check ran, `Some(false)` when none was needed.
    fn process_at(&mut self, index: usize) -> Option<bool> {
        let identity = self.order.get(index)?;
        let item = self.items.get(identity)?;
        if item.status() != ItemStatus::Unprocessed {
            return Some(false);
        }
        let Some(data) = item.series().cloned() else {
            return Some(false);
        };

        let outcome = run_check(
            self.checker.as_ref(),
            &data,
            self.config.specification,
            self.config.back_count,
        );
        Some(self.apply_outcome(index, outcome))
    }

    fn apply_outcome(&mut self, index: usize, outcome: CheckOutcome) -> bool {
        let Some(identity) = self.order.get(index) else {
            return false;
        };
        let Some(item) = self.items.get_mut(identity) else {
            return false;
        };

        match &outcome {
            CheckOutcome::Success(periods) => {
                debug!(series = %identity, periods = periods.len(), "series checked")
            }
            CheckOutcome::Empty => debug!(series = %identity, "series has no usable data"),
            CheckOutcome::ModelingFailure(reason) => {
                warn!(series = %identity, checker = self.checker.name(), %reason, "check failed")
            }
        }
        item.apply(outcome)
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Change the number of checked periods (1, 2 or 3).
    ///
    /// Every item is reset and will be recomputed on its next selection.
    pub fn set_back_count(&mut self, count: u8) -> Result<()> {
        let new = BackCount::new(count)?;
        let old = self.config.back_count;
        self.config.back_count = new;
        for item in self.items.values_mut() {
            item.set_back_count(new);
        }
        info!(%old, %new, "number of checked periods changed");
        self.emit(TrackerEvent::BackCountChanged { old, new });
        self.emit(TrackerEvent::StructureChanged);
        Ok(())
    }

    /// Change the model specification; every item is reset.
    pub fn set_specification(&mut self, spec: ModelSpecification) {
        let old = self.config.specification;
        self.config.specification = spec;
        self.reset_items();
        info!(%old, new = %spec, "specification changed");
        self.emit(TrackerEvent::SpecificationChanged { old, new: spec });
        self.emit(TrackerEvent::DataChanged);
    }

    /// Set the warning threshold; must be `>= 0` and below the red one.
    pub fn set_orange_threshold(&mut self, orange: f64) -> Result<()> {
        let red = self.config.thresholds.red;
        if !orange.is_finite() || orange < 0.0 || orange >= red {
            return Err(CheckLastError::invalid_config(
                "orange",
                "orange value must be >= 0 and < red value",
            ));
        }
        self.apply_thresholds(Thresholds { orange, red });
        Ok(())
    }

    /// Set the critical threshold; must be above the orange one.
    pub fn set_red_threshold(&mut self, red: f64) -> Result<()> {
        let orange = self.config.thresholds.orange;
        if !red.is_finite() || red <= orange {
            return Err(CheckLastError::invalid_config(
                "red",
                "red value must be greater than orange value",
            ));
        }
        self.apply_thresholds(Thresholds { orange, red });
        Ok(())
    }

    /// Set both thresholds at once.
    pub fn set_thresholds(&mut self, orange: f64, red: f64) -> Result<()> {
        let thresholds = Thresholds::new(orange, red)?;
        self.apply_thresholds(thresholds);
        Ok(())
    }

    /// Replace the whole configuration.
    ///
    /// Items are reset only when the specification or the number of checked
    /// periods changes.
    pub fn set_config(&mut self, config: TrackerConfig) -> Result<()> {
        config.validate()?;
        let previous = std::mem::replace(&mut self.config, config);

        if previous.check_timeout_ms != self.config.check_timeout_ms {
            self.checker = Self::effective_checker(&self.base_checker, &self.config);
        }
        if previous.back_count != self.config.back_count {
            let new = self.config.back_count;
            for item in self.items.values_mut() {
                item.set_back_count(new);
            }
            self.emit(TrackerEvent::BackCountChanged {
                old: previous.back_count,
                new,
            });
            self.emit(TrackerEvent::StructureChanged);
        }
        if previous.specification != self.config.specification {
            self.reset_items();
            self.emit(TrackerEvent::SpecificationChanged {
                old: previous.specification,
                new: self.config.specification,
            });
        }
        if previous.thresholds != self.config.thresholds {
            self.emit(TrackerEvent::ThresholdsChanged {
                orange: self.config.thresholds.orange,
                red: self.config.thresholds.red,
            });
        }
        info!(config = ?self.config, "configuration replaced");
        self.emit(TrackerEvent::DataChanged);
        Ok(())
    }

    fn apply_thresholds(&mut self, thresholds: Thresholds) {
        self.config.thresholds = thresholds;
        info!(orange = thresholds.orange, red = thresholds.red, "thresholds changed");
        self.emit(TrackerEvent::ThresholdsChanged {
            orange: thresholds.orange,
            red: thresholds.red,
        });
        self.emit(TrackerEvent::DataChanged);
    }

    fn reset_items(&mut self) {
        for item in self.items.values_mut() {
            item.reset();
        }
    }

    // ------------------------------------------------------------------
    // Projection and export
    // ------------------------------------------------------------------

    /// Display table: name, last period and the error columns.
    pub fn projection(&self) -> TableProjection {
        TableProjection::new(self)
    }

    /// Export table: the display table with a status column.
    pub fn export_table(&self) -> TableProjection {
        TableProjection::with_columns(self, export::export_columns(self.config.back_count))
    }

    /// Serialize the export table and hand it to `sink`.
    pub fn export_to(&self, sink: &mut dyn ExportSink) -> Result<()> {
        export::export(self, sink, None)
    }

    /// Like [`export_to`](Self::export_to), rows in the order given by `key`.
    pub fn export_sorted_to(&self, sink: &mut dyn ExportSink, key: SortKey) -> Result<()> {
        export::export(self, sink, Some(key))
    }
}

/// Run one check, folding every failure into the outcome.
fn run_check(
    checker: &dyn ForecastChecker,
    data: &TsData,
    spec: ModelSpecification,
    back_count: BackCount,
) -> CheckOutcome {
    if data.is_empty() {
        return CheckOutcome::Empty;
    }
    let result = panic::catch_unwind(AssertUnwindSafe(|| checker.check(data, spec, back_count)));
    match result {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(CheckLastError::SeriesInvalid(_))) => CheckOutcome::Empty,
        Ok(Err(err)) => CheckOutcome::ModelingFailure(err.to_string()),
        Err(payload) => {
            let message = if let Some(s) = payload.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic".to_string()
            };
            CheckOutcome::ModelingFailure(format!("check panicked: {}", message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checklast_spi::{PeriodCheck, TsPeriod};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Replays observed/forecast pairs; fails for series named "B".
    struct FixedChecker {
        calls: AtomicUsize,
    }

    impl FixedChecker {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl ForecastChecker for FixedChecker {
        fn name(&self) -> &str {
            "fixed"
        }

        fn check(
            &self,
            data: &TsData,
            _spec: ModelSpecification,
            back_count: BackCount,
        ) -> Result<CheckOutcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if data.values()[0] < 0.0 {
                return Err(CheckLastError::ModelingFailure("cannot build model".to_string()));
            }
            let values = data.values();
            let periods = (0..back_count.get())
                .map(|k| {
                    values
                        .len()
                        .checked_sub(k + 1)
                        .map(|i| PeriodCheck::new(values[i], values[i] * 0.95))
                })
                .collect();
            Ok(CheckOutcome::Success(periods))
        }
    }

    fn series(values: Vec<f64>) -> Arc<TsData> {
        Arc::new(TsData::new(TsPeriod::monthly(2024, 1).unwrap(), values))
    }

    fn collection() -> Vec<(SeriesIdentity, Arc<TsData>)> {
        vec![
            (SeriesIdentity::new("A"), series(vec![90.0, 100.0])),
            (SeriesIdentity::new("B"), series(vec![-1.0, 5.0])),
            (SeriesIdentity::new("C"), series(vec![])),
        ]
    }

    fn tracker() -> (AnomalyTracker, Arc<FixedChecker>) {
        let checker = FixedChecker::new();
        let mut tracker = AnomalyTracker::with_checker(checker.clone());
        tracker.reconcile(collection());
        (tracker, checker)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = TrackerConfig::default();
        config.thresholds = Thresholds { orange: 5.0, red: 4.0 };
        assert!(AnomalyTracker::new(config, FixedChecker::new()).is_err());
    }

    #[test]
    fn test_reconcile_creates_unprocessed_items_in_order() {
        let (tracker, _) = tracker();
        let names: Vec<&str> = tracker.identities().iter().map(|id| id.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert!(tracker.items().all(|item| item.status() == ItemStatus::Unprocessed));
    }

    #[test]
    fn test_reconcile_collapses_duplicates_to_last() {
        let checker = FixedChecker::new();
        let mut tracker = AnomalyTracker::with_checker(checker);
        let last = series(vec![1.0, 2.0, 3.0]);
        tracker.reconcile(vec![
            (SeriesIdentity::new("A"), series(vec![1.0])),
            (SeriesIdentity::new("B"), series(vec![2.0])),
            (SeriesIdentity::new("A"), last.clone()),
        ]);
        let names: Vec<&str> = tracker.identities().iter().map(|id| id.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        let item = tracker.get(&SeriesIdentity::new("A")).unwrap();
        assert!(Arc::ptr_eq(item.series().unwrap(), &last));
    }

    #[test]
    fn test_reconcile_keeps_state_and_refreshes_handle() {
        let (mut tracker, checker) = tracker();
        tracker.process(0);
        let before = tracker.item(0).unwrap().results().to_vec();

        let replacement = series(vec![1.0, 2.0]);
        tracker.reconcile(vec![
            (SeriesIdentity::new("D"), series(vec![1.0])),
            (SeriesIdentity::new("A"), replacement.clone()),
        ]);

        let item = tracker.get(&SeriesIdentity::new("A")).unwrap();
        assert!(item.is_processed());
        assert_eq!(item.results(), before.as_slice());
        assert!(Arc::ptr_eq(item.series().unwrap(), &replacement));
        assert!(tracker.get(&SeriesIdentity::new("B")).is_none());
        assert_eq!(tracker.index_of(&SeriesIdentity::new("A")), Some(1));
        assert_eq!(checker.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_process_outcomes() {
        let (mut tracker, _) = tracker();
        assert_eq!(tracker.process(0), Some(ItemStatus::Processed));
        assert_eq!(tracker.process(1), Some(ItemStatus::NotProcessable));
        assert_eq!(tracker.process(2), Some(ItemStatus::Invalid));
        assert_eq!(tracker.process(3), None);

        let a = tracker.item(0).unwrap();
        assert!((a.absolute_error(0).unwrap() - 5.0).abs() < 1e-9);
        assert!((a.relative_error(0).unwrap() - 0.05).abs() < 1e-9);
        assert_eq!(tracker.message(1), Some("Check can't be processed"));
        assert_eq!(tracker.message(2), Some("Invalid or empty data"));
    }

    #[test]
    fn test_empty_series_never_reaches_checker() {
        let (mut tracker, checker) = tracker();
        tracker.process(2);
        assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_process_is_idempotent() {
        let (mut tracker, checker) = tracker();
        tracker.process(0);
        tracker.process(1);
        tracker.process(0);
        tracker.process(1);
        assert_eq!(checker.calls.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.item(1).unwrap().status(), ItemStatus::NotProcessable);
    }

    #[test]
    fn test_select_emits_events() {
        let (mut tracker, _) = tracker();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        tracker.add_listener(move |event: &TrackerEvent| sink.lock().unwrap().push(event.clone()));

        assert!(tracker.select(Some(0)).unwrap().is_processed());
        tracker.select(Some(0));
        tracker.select(None);

        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                TrackerEvent::RowUpdated { index: 0 },
                TrackerEvent::SelectionChanged { index: Some(0) },
                TrackerEvent::SelectionChanged { index: Some(0) },
                TrackerEvent::SelectionChanged { index: None },
            ]
        );
    }

    #[test]
    fn test_process_all() {
        let (mut tracker, _) = tracker();
        tracker.process(0);
        assert_eq!(tracker.process_all(), 2);
        assert_eq!(tracker.item(1).unwrap().status(), ItemStatus::NotProcessable);
        assert_eq!(tracker.item(2).unwrap().status(), ItemStatus::Invalid);
        assert_eq!(tracker.process_all(), 0);
    }

    #[test]
    fn test_set_back_count_resets_everything() {
        let (mut tracker, _) = tracker();
        tracker.process_all();
        tracker.set_back_count(3).unwrap();
        assert!(tracker.items().all(|item| item.status() == ItemStatus::Unprocessed
            && item.results().is_empty()
            && item.back_count().get() == 3));

        tracker.process(0);
        assert_eq!(tracker.item(0).unwrap().results().len(), 3);
    }

    #[test]
    fn test_set_back_count_rejects_out_of_range() {
        let (mut tracker, _) = tracker();
        tracker.process(0);
        assert!(tracker.set_back_count(0).is_err());
        assert!(tracker.set_back_count(4).is_err());
        assert_eq!(tracker.back_count().get(), 1);
        assert!(tracker.item(0).unwrap().is_processed());
    }

    #[test]
    fn test_set_specification_resets_lazily() {
        let (mut tracker, checker) = tracker();
        tracker.process(0);
        tracker.set_specification(ModelSpecification::Tr1);
        assert_eq!(tracker.item(0).unwrap().status(), ItemStatus::Unprocessed);
        assert_eq!(checker.calls.load(Ordering::SeqCst), 1);
        tracker.select(Some(0));
        assert_eq!(checker.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_threshold_setters_validate() {
        let (mut tracker, _) = tracker();
        assert!(tracker.set_orange_threshold(5.0).is_err());
        assert!(tracker.set_orange_threshold(-1.0).is_err());
        assert!(tracker.set_red_threshold(4.0).is_err());
        assert!(tracker.set_red_threshold(3.0).is_err());
        assert_eq!(tracker.thresholds(), Thresholds::default());

        tracker.set_red_threshold(10.0).unwrap();
        tracker.set_orange_threshold(6.0).unwrap();
        assert_eq!(tracker.thresholds(), Thresholds { orange: 6.0, red: 10.0 });
    }

    #[test]
    fn test_thresholds_do_not_reprocess() {
        let (mut tracker, checker) = tracker();
        tracker.process(0);
        tracker.set_thresholds(0.04, 0.06).unwrap();
        assert!(tracker.item(0).unwrap().is_processed());
        assert_eq!(checker.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            tracker.severity(0, CellKey::new(0, ErrorKind::Relative)),
            Some(Severity::Warning)
        );
        assert_eq!(tracker.severity(0, CellKey::new(0, ErrorKind::Absolute)), None);
    }

    #[test]
    fn test_set_config_resets_only_on_model_change() {
        let (mut tracker, _) = tracker();
        tracker.process(0);

        let mut config = tracker.config().clone();
        config.thresholds = Thresholds { orange: 1.0, red: 2.0 };
        tracker.set_config(config.clone()).unwrap();
        assert!(tracker.item(0).unwrap().is_processed());

        config.specification = ModelSpecification::Tr0;
        tracker.set_config(config).unwrap();
        assert_eq!(tracker.item(0).unwrap().status(), ItemStatus::Unprocessed);
    }

    #[test]
    fn test_report_parameters() {
        let (tracker, _) = tracker();
        let params = tracker.report_parameters();
        assert_eq!(params.series_count, 3);
        assert_eq!(params.specification, "TRfull");
        assert_eq!(params.back_count.get(), 1);
    }

    /// Panics on every series but "C".
    struct PanickingChecker;

    impl ForecastChecker for PanickingChecker {
        fn name(&self) -> &str {
            "panicking"
        }

        fn check(
            &self,
            data: &TsData,
            _spec: ModelSpecification,
            _back_count: BackCount,
        ) -> Result<CheckOutcome> {
            if data.values()[0] < 1.0 {
                panic!("engine crashed");
            }
            Ok(CheckOutcome::Success(vec![Some(PeriodCheck::new(2.0, 1.0))]))
        }
    }

    #[test]
    fn test_panicking_checker_without_timeout_is_contained() {
        let mut tracker = AnomalyTracker::with_checker(Arc::new(PanickingChecker));
        assert!(tracker.config().check_timeout().is_none());
        tracker.reconcile(vec![
            (SeriesIdentity::new("A"), series(vec![0.5, 2.0])),
            (SeriesIdentity::new("B"), series(vec![0.0, 2.0])),
            (SeriesIdentity::new("C"), series(vec![1.0, 2.0])),
        ]);

        assert_eq!(tracker.process_all(), 3);
        let statuses: Vec<ItemStatus> = tracker.items().map(|item| item.status()).collect();
        assert_eq!(
            statuses,
            vec![
                ItemStatus::NotProcessable,
                ItemStatus::NotProcessable,
                ItemStatus::Processed,
            ]
        );
        assert!(tracker.item(0).unwrap().reason().unwrap().contains("engine crashed"));
    }

    #[test]
    fn test_select_contains_panicking_checker() {
        let mut tracker = AnomalyTracker::with_checker(Arc::new(PanickingChecker));
        tracker.reconcile(vec![(SeriesIdentity::new("A"), series(vec![0.0, 2.0]))]);
        let item = tracker.select(Some(0)).unwrap();
        assert_eq!(item.status(), ItemStatus::NotProcessable);
    }
}
