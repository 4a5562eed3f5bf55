//! Forecast check outcomes.

use serde::{Deserialize, Serialize};

use super::anomaly_item::PeriodCheck;

/// Result of one last-period check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CheckOutcome {
    /// One entry per checked period, most recent first. `None` marks a
    /// period without a valid forecast or observation.
    Success(Vec<Option<PeriodCheck>>),
    /// The series has no usable data.
    Empty,
    /// No model could be built for this series and specification.
    ModelingFailure(String),
}

impl CheckOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CheckOutcome::Success(_))
    }
}
