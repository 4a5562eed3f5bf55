//! Tracker change notifications.

use super::back_count::BackCount;
use super::specification::ModelSpecification;

/// Notification emitted by the tracker after a state change.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    /// Series collection reconciled.
    CollectionChanged { count: usize },
    /// A row was selected (and processed when needed).
    SelectionChanged { index: Option<usize> },
    /// Stored results of one row changed.
    RowUpdated { index: usize },
    BackCountChanged { old: BackCount, new: BackCount },
    SpecificationChanged {
        old: ModelSpecification,
        new: ModelSpecification,
    },
    ThresholdsChanged { orange: f64, red: f64 },
    /// The set of table columns changed.
    StructureChanged,
    /// Every row may have changed.
    DataChanged,
}
