//! Check Last API
//!
//! Configuration types and report snapshots for the last-period anomaly tracker.

mod config;
mod report;

pub use config::{Thresholds, TrackerConfig};
pub use report::ReportParameters;

// Re-export SPI types
pub use checklast_spi::{BackCount, CheckLastError, ModelSpecification, Result};
