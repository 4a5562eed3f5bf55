//! Check Last Facade
//!
//! Unified re-exports for last-period anomaly checks.
//!
//! This facade provides a single entry point to all Check Last functionality:
//! - Contracts (`ForecastChecker`, `SeriesSource`, `TrackerListener`, `ExportSink`) and models from SPI
//! - Configuration types from API
//! - `AnomalyTracker`, classification, table projection, export and checkers from Core

// Re-export everything from SPI
pub use checklast_spi::*;

// Re-export everything from API
pub use checklast_api::*;

// Re-export everything from Core
pub use checklast_core::*;
