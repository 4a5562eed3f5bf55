//! Columns and cells of the tabular projection.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::period::TsPeriod;
use super::severity::{CellKey, ErrorKind};

/// Column of the result table. Error columns carry the checked period
/// (0 = most recent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    SeriesName,
    LastPeriod,
    Status,
    AbsoluteError(usize),
    RelativeError(usize),
}

impl Column {
    /// Header label, e.g. `Rel. Error (n-2)`.
    pub fn label(&self) -> String {
        match self {
            Column::SeriesName => "Series name".to_string(),
            Column::LastPeriod => "Last period".to_string(),
            Column::Status => "Status".to_string(),
            Column::AbsoluteError(period) => format!("Abs. Error (n-{})", period + 1),
            Column::RelativeError(period) => format!("Rel. Error (n-{})", period + 1),
        }
    }

    /// Error cell key for error columns.
    pub fn cell_key(&self) -> Option<CellKey> {
        match *self {
            Column::AbsoluteError(period) => Some(CellKey::new(period, ErrorKind::Absolute)),
            Column::RelativeError(period) => Some(CellKey::new(period, ErrorKind::Relative)),
            _ => None,
        }
    }
}

/// Value of one table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Text(String),
    Period(TsPeriod),
    Number(f64),
    Empty,
}

impl Cell {
    pub fn from_number(value: Option<f64>) -> Self {
        value.map_or(Cell::Empty, Cell::Number)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Text rendering used for export; empty cells render as an empty string.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) => f.write_str(text),
            Cell::Period(period) => write!(f, "{}", period),
            Cell::Number(value) => write!(f, "{}", value),
            Cell::Empty => Ok(()),
        }
    }
}
