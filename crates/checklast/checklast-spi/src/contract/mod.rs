//! Contract definitions for last-period checks.
//!
//! This module contains trait definitions that collaborators of the tracker implement.

mod export_sink;
mod forecast_checker;
mod series_source;
mod tracker_listener;

pub use export_sink::ExportSink;
pub use forecast_checker::ForecastChecker;
pub use series_source::SeriesSource;
pub use tracker_listener::TrackerListener;
