//! Check Last Service Provider Interface
//!
//! Defines the traits and types shared by the last-period anomaly tracker:
//!
//! - [`ForecastChecker`]: holds out the last periods of a series and forecasts them
//! - [`SeriesSource`]: supplies the ordered collection of named series
//! - [`TrackerListener`]: receives change notifications from the tracker
//! - [`ExportSink`]: receives exported tables
//! - [`CheckLastError`]: standardized error type

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{ExportSink, ForecastChecker, SeriesSource, TrackerListener};
pub use error::{CheckLastError, Result};
pub use model::{
    AnomalyItem, BackCount, Cell, CellKey, CheckOutcome, Column, ErrorKind, Frequency,
    ItemStatus, ModelSpecification, PeriodCheck, SeriesIdentity, Severity, TrackerEvent, TsData,
    TsPeriod,
};
