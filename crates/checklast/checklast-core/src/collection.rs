//! In-memory series collection.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use checklast_spi::{CheckLastError, Result, SeriesIdentity, SeriesSource, TsData, TsPeriod};
use tracing::debug;

/// Ordered collection of named series; a [`SeriesSource`] owned by the caller.
#[derive(Debug, Clone, Default)]
pub struct TsCollection {
    series: Vec<(SeriesIdentity, Arc<TsData>)>,
}

impl TsCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, identity: impl Into<SeriesIdentity>, data: TsData) {
        self.series.push((identity.into(), Arc::new(data)));
    }

    /// Remove every series named `identity`; returns whether one was removed.
    pub fn remove(&mut self, identity: &SeriesIdentity) -> bool {
        let before = self.series.len();
        self.series.retain(|(id, _)| id != identity);
        self.series.len() != before
    }

    pub fn get(&self, identity: &SeriesIdentity) -> Option<&Arc<TsData>> {
        self.series
            .iter()
            .rev()
            .find(|(id, _)| id == identity)
            .map(|(_, data)| data)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(SeriesIdentity, Arc<TsData>)> {
        self.series.iter()
    }

    /// Read a period-by-series grid.
    ///
    /// The first column holds consecutive period labels (`2024-01`,
    /// `2024-Q1`, ...) and every other column one series named by its header.
    /// Empty or non-numeric cells are missing values; missing values at both
    /// ends of a series are trimmed.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let names: Vec<String> = reader
            .headers()
            .map_err(parse_error)?
            .iter()
            .skip(1)
            .map(str::to_string)
            .collect();

        let mut start: Option<TsPeriod> = None;
        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];

        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(parse_error)?;
            let label = record.get(0).unwrap_or_default();
            let period: TsPeriod = label.parse()?;
            match start {
                None => start = Some(period),
                Some(first) if first.plus(row as i64) != period => {
                    return Err(CheckLastError::Parse(format!(
                        "period '{}' at row {} does not follow {}",
                        label,
                        row + 1,
                        first.plus(row as i64 - 1)
                    )));
                }
                Some(_) => {}
            }
            for (index, values) in columns.iter_mut().enumerate() {
                let value = record
                    .get(index + 1)
                    .and_then(|cell| cell.parse::<f64>().ok())
                    .unwrap_or(f64::NAN);
                values.push(value);
            }
        }

        let start = start.ok_or_else(|| CheckLastError::Parse("no data rows".to_string()))?;
        let mut collection = Self::new();
        for (name, values) in names.into_iter().zip(columns) {
            collection.push(name, trimmed(start, values));
        }
        debug!(series = collection.len(), "series collection loaded");
        Ok(collection)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            CheckLastError::Parse(format!("cannot open {}: {}", path.display(), e))
        })?;
        Self::from_csv_reader(BufReader::new(file))
    }
}

impl SeriesSource for TsCollection {
    fn series(&self) -> Vec<(SeriesIdentity, Arc<TsData>)> {
        self.series.clone()
    }
}

/// Drop missing values at both ends, moving the start accordingly.
fn trimmed(start: TsPeriod, values: Vec<f64>) -> TsData {
    let Some(first) = values.iter().position(|v| v.is_finite()) else {
        return TsData::new(start, Vec::new());
    };
    let last = values.iter().rposition(|v| v.is_finite()).unwrap_or(first);
    TsData::new(start.plus(first as i64), values[first..=last].to_vec())
}

fn parse_error(err: csv::Error) -> CheckLastError {
    CheckLastError::Parse(err.to_string())
}
