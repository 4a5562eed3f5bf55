//! Data models for last-period checks.
//!
//! This module contains the data structures shared by the tracker, its
//! collaborators and the display/export layers.

mod anomaly_item;
mod back_count;
mod check_outcome;
mod period;
mod series;
mod severity;
mod specification;
mod table;
mod tracker_event;

pub use anomaly_item::{AnomalyItem, ItemStatus, PeriodCheck};
pub use back_count::BackCount;
pub use check_outcome::CheckOutcome;
pub use period::{Frequency, TsPeriod};
pub use series::{SeriesIdentity, TsData};
pub use severity::{CellKey, ErrorKind, Severity};
pub use specification::ModelSpecification;
pub use table::{Cell, Column};
pub use tracker_event::TrackerEvent;
