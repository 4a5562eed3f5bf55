//! Tracker configuration.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use checklast_spi::{BackCount, CheckLastError, ModelSpecification, Result};

/// Relative error thresholds of the severity bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Lower bound of the warning band (default: 4.0).
    pub orange: f64,
    /// Lower bound of the critical band (default: 5.0).
    pub red: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            orange: 4.0,
            red: 5.0,
        }
    }
}

impl Thresholds {
    /// Validated thresholds: `0 <= orange < red`, both finite.
    pub fn new(orange: f64, red: f64) -> Result<Self> {
        let thresholds = Self { orange, red };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.orange.is_finite() || self.orange < 0.0 {
            return Err(CheckLastError::invalid_config(
                "orange",
                "orange value must be >= 0 and < red value",
            ));
        }
        if !self.red.is_finite() || self.red <= self.orange {
            return Err(CheckLastError::invalid_config(
                "red",
                "red value must be greater than orange value",
            ));
        }
        Ok(())
    }
}

/// Complete tracker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Modelling specification handed to the checker (default: TRfull).
    pub specification: ModelSpecification,
    /// Number of trailing periods checked (default: 1).
    pub back_count: BackCount,
    pub thresholds: Thresholds,
    /// Upper bound on one check, in milliseconds. `None` waits forever.
    pub check_timeout_ms: Option<u64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            specification: ModelSpecification::default(),
            back_count: BackCount::default(),
            thresholds: Thresholds::default(),
            check_timeout_ms: None,
        }
    }
}

impl TrackerConfig {
    pub fn new(
        specification: ModelSpecification,
        back_count: BackCount,
        thresholds: Thresholds,
    ) -> Result<Self> {
        let config = Self {
            specification,
            back_count,
            thresholds,
            check_timeout_ms: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        if self.check_timeout_ms == Some(0) {
            return Err(CheckLastError::invalid_config(
                "check_timeout_ms",
                "timeout must be positive",
            ));
        }
        Ok(())
    }

    pub fn check_timeout(&self) -> Option<Duration> {
        self.check_timeout_ms.map(Duration::from_millis)
    }

    /// Parse and validate a JSON configuration.
    ///
    /// An out-of-range `back_count` is reported as invalid configuration,
    /// like the setters do.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(parse_error)?;
        if let Some(count) = value.get("back_count").and_then(Value::as_u64) {
            match u8::try_from(count) {
                Ok(count) => {
                    BackCount::new(count)?;
                }
                Err(_) => {
                    return Err(CheckLastError::invalid_config(
                        "back_count",
                        format!("number of last checked values can only be 1, 2 or 3, got {}", count),
                    ));
                }
            }
        }
        let config: Self = serde_json::from_value(value).map_err(parse_error)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            CheckLastError::Parse(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(parse_error)
    }
}

fn parse_error(err: serde_json::Error) -> CheckLastError {
    CheckLastError::Parse(format!("configuration: {}", err))
}
