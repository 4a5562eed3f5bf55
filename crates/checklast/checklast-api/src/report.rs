//! Report parameters exposed to external reporting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use checklast_spi::BackCount;

use crate::config::TrackerConfig;

/// Read-only snapshot of the parameters of a check run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportParameters {
    pub specification: String,
    pub back_count: BackCount,
    pub series_count: usize,
    pub orange_threshold: f64,
    pub red_threshold: f64,
}

impl ReportParameters {
    pub fn new(config: &TrackerConfig, series_count: usize) -> Self {
        Self {
            specification: config.specification.to_string(),
            back_count: config.back_count,
            series_count,
            orange_threshold: config.thresholds.orange,
            red_threshold: config.thresholds.red,
        }
    }

    /// Keyed form consumed by report templates.
    pub fn to_map(&self) -> BTreeMap<&'static str, Value> {
        let mut map = BTreeMap::new();
        map.insert("_SPECIFICATION", Value::from(self.specification.clone()));
        map.insert("_NB_CHECK_LAST", Value::from(self.back_count.get()));
        map.insert("_NB_OF_SERIES", Value::from(self.series_count));
        map.insert("_ORANGE_CELLS", Value::from(self.orange_threshold));
        map.insert("_RED_CELLS", Value::from(self.red_threshold));
        map
    }
}
