//! Check Last Core
//!
//! Implementations for the last-period anomaly tracker: reconciliation with a
//! series source, on-demand checks, severity classification, the sortable
//! result table and its export.

mod checkers;
mod classification;
mod collection;
mod export;
mod table;
mod tracker;

pub use checkers::{SmoothingChecker, TimeoutChecker};
pub use classification::classify;
pub use collection::TsCollection;
pub use export::{export_columns, read_delimited, to_delimited, ClipboardSink, FileSink};
pub use table::{SortKey, TableProjection};
pub use tracker::AnomalyTracker;
