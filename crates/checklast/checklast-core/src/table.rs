//! Tabular projection of the tracker and its sorting.

use std::cmp::Ordering;

use checklast_spi::{AnomalyItem, BackCount, CheckLastError, Cell, Column, Result};

use crate::tracker::AnomalyTracker;

/// Sort request on one column of a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: Column,
    pub descending: bool,
}

impl SortKey {
    pub fn ascending(column: Column) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    pub fn descending(column: Column) -> Self {
        Self {
            column,
            descending: true,
        }
    }
}

/// Rectangular snapshot of the tracker: one row per series in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableProjection {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
    /// Raw series names per row; the name column shows them on one line.
    names: Vec<String>,
}

impl TableProjection {
    /// Display columns for `back_count` checked periods: series name, last
    /// period, then absolute and relative error for each period.
    pub fn columns_for(back_count: BackCount) -> Vec<Column> {
        let mut columns = vec![Column::SeriesName, Column::LastPeriod];
        for period in 0..back_count.get() {
            columns.push(Column::AbsoluteError(period));
            columns.push(Column::RelativeError(period));
        }
        columns
    }

    pub fn new(tracker: &AnomalyTracker) -> Self {
        Self::with_columns(tracker, Self::columns_for(tracker.back_count()))
    }

    pub fn with_columns(tracker: &AnomalyTracker, columns: Vec<Column>) -> Self {
        let rows = tracker
            .items()
            .map(|item| columns.iter().map(|&column| cell(item, column)).collect())
            .collect();
        let names = tracker
            .items()
            .map(|item| item.identity().as_str().to_string())
            .collect();
        Self {
            columns,
            rows,
            names,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(Column::label).collect()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// Row indices in the order requested by `key`; `None` keeps the
    /// original order. The sort is stable. Series names compare on their
    /// raw, possibly multi-line, form.
    pub fn sort_order(&self, key: Option<SortKey>) -> Result<Vec<usize>> {
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        let Some(key) = key else {
            return Ok(order);
        };
        let position = self
            .columns
            .iter()
            .position(|&column| column == key.column)
            .ok_or_else(|| {
                CheckLastError::invalid_config(
                    "sort",
                    format!("column '{}' is not displayed", key.column.label()),
                )
            })?;

        order.sort_by(|&a, &b| {
            let ordering = match key.column {
                Column::SeriesName => self.names[a].cmp(&self.names[b]),
                _ => compare_cells(&self.rows[a][position], &self.rows[b][position]),
            };
            if key.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        Ok(order)
    }

    /// Rows rearranged according to `key`.
    pub fn sorted(&self, key: Option<SortKey>) -> Result<Self> {
        let order = self.sort_order(key)?;
        Ok(Self {
            columns: self.columns.clone(),
            rows: order.iter().map(|&index| self.rows[index].clone()).collect(),
            names: order.iter().map(|&index| self.names[index].clone()).collect(),
        })
    }
}

fn cell(item: &AnomalyItem, column: Column) -> Cell {
    match column {
        Column::SeriesName => Cell::Text(item.identity().display_name()),
        Column::LastPeriod => item.last_period().map_or(Cell::Empty, Cell::Period),
        Column::Status => Cell::Text(item.status().to_string()),
        Column::AbsoluteError(period) => Cell::from_number(item.absolute_error(period)),
        Column::RelativeError(period) => Cell::from_number(item.relative_error(period)),
    }
}

/// Empty cells sort first; numbers compare by magnitude.
fn compare_cells(a: &Cell, b: &Cell) -> Ordering {
    match (a, b) {
        (Cell::Empty, Cell::Empty) => Ordering::Equal,
        (Cell::Empty, _) => Ordering::Less,
        (_, Cell::Empty) => Ordering::Greater,
        (Cell::Number(x), Cell::Number(y)) => x.abs().total_cmp(&y.abs()),
        (Cell::Text(x), Cell::Text(y)) => x.cmp(y),
        (Cell::Period(x), Cell::Period(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_count() {
        for n in 1..=3u8 {
            let columns = TableProjection::columns_for(BackCount::new(n).unwrap());
            assert_eq!(columns.len(), 2 * usize::from(n) + 2);
        }
    }

    #[test]
    fn test_compare_numbers_by_magnitude() {
        assert_eq!(
            compare_cells(&Cell::Number(-3.0), &Cell::Number(2.0)),
            Ordering::Greater
        );
        assert_eq!(compare_cells(&Cell::Empty, &Cell::Number(0.0)), Ordering::Less);
    }

    #[test]
    fn test_compare_text_is_lexicographic() {
        let a = Cell::Text("Zeta".to_string());
        let b = Cell::Text("alpha".to_string());
        assert_eq!(compare_cells(&a, &b), Ordering::Less);
    }
}
