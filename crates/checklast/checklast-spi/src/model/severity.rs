//! Severity bands and error cell keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity band of a relative forecast error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Normal => write!(f, "Normal"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Critical => write!(f, "Critical"),
        }
    }
}

/// Kind of forecast error shown in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Absolute,
    Relative,
}

/// Identifies an error cell: checked period (0 = most recent) and error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellKey {
    pub period: usize,
    pub kind: ErrorKind,
}

impl CellKey {
    pub fn new(period: usize, kind: ErrorKind) -> Self {
        Self { period, kind }
    }
}
