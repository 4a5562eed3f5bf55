//! Forecast checker trait definition.

use crate::error::Result;
use crate::model::{BackCount, CheckOutcome, ModelSpecification, TsData};

/// Last-period forecast check.
///
/// Implementations hold out the last `back_count` observations of a series,
/// forecast them from the remaining data with the model described by `spec`,
/// and report observed/forecast pairs ordered from the most recent period
/// backwards.
///
/// An `Err` is treated exactly like [`CheckOutcome::ModelingFailure`] by the
/// tracker.
pub trait ForecastChecker: Send + Sync {
    /// Checker name, used in logs.
    fn name(&self) -> &str;

    /// Run the check on one series.
    fn check(
        &self,
        data: &TsData,
        spec: ModelSpecification,
        back_count: BackCount,
    ) -> Result<CheckOutcome>;
}
