use std::path::Path;

use thiserror::Error;

pub mod csv_table;
pub mod reader;
pub mod timestamp;

use csv_table::{read_raw_table, type_column};
use reader::{read_input_bytes, strip_bom};
use timestamp::{derive_calendar, detect_timestamp_column, parse_timestamp};

use crate::model::table::{MeasurementTable, TemporalIndex};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Loader result handed to the caller. A `None` table means "no data";
/// the message then carries the failure detail.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub table: Option<MeasurementTable>,
    pub message: String,
}

impl LoadOutcome {
    fn from_result(result: Result<MeasurementTable, InputError>) -> Self {
        match result {
            Ok(table) => {
                let message = format!(
                    "Successfully loaded {} rows with {} columns",
                    table.n_rows(),
                    table.n_columns()
                );
                crate::info!("{}", message);
                Self {
                    table: Some(table),
                    message,
                }
            }
            Err(err) => {
                let message = format!("Error loading file: {err}");
                crate::error!("{}", message);
                Self {
                    table: None,
                    message,
                }
            }
        }
    }
}

/// Loads delimited text already held in memory.
pub fn load_data(bytes: &[u8]) -> LoadOutcome {
    LoadOutcome::from_result(parse_table(&strip_bom(bytes.to_vec())))
}

/// Loads a CSV file from disk; `.gz` files are inflated first.
pub fn load_path(path: &Path) -> LoadOutcome {
    crate::info!("reading input file {}", path.display());
    match read_input_bytes(path) {
        Ok(bytes) => load_data(&bytes),
        Err(err) => LoadOutcome::from_result(Err(err)),
    }
}

pub fn parse_table(bytes: &[u8]) -> Result<MeasurementTable, InputError> {
    let raw = read_raw_table(bytes)?;
    let n_rows = raw.n_rows;
    let timestamp_col = detect_timestamp_column(&raw.headers);

    let mut index = TemporalIndex::Positional { len: n_rows };
    let mut columns = Vec::with_capacity(raw.headers.len() + 3);

    for (col, (name, cells)) in raw.headers.into_iter().zip(raw.cells).enumerate() {
        if Some(col) == timestamp_col {
            index = build_timestamp_index(name, cells)?;
        } else {
            columns.push(type_column(&name, cells)?);
        }
    }

    let mut table = MeasurementTable { index, columns };
    match table.index.name() {
        Some(name) => crate::info!("using column {} as the temporal index", name),
        None => crate::warn!(
            "no timestamp column found; using a positional index, Hour/Month/DayOfWeek unavailable"
        ),
    }

    for column in derive_calendar(&table.index) {
        let name = column.name.clone();
        if table.upsert_column(column) {
            crate::warn!("input column {} replaced by the derived calendar feature", name);
        }
    }

    Ok(table)
}

fn build_timestamp_index(
    name: String,
    cells: Vec<Option<String>>,
) -> Result<TemporalIndex, InputError> {
    let mut values = Vec::with_capacity(cells.len());
    for (row, cell) in cells.iter().enumerate() {
        match cell {
            None => values.push(None),
            Some(raw) => match parse_timestamp(raw) {
                Some(ts) => values.push(Some(ts)),
                None => {
                    return Err(InputError::Parse(format!(
                        "unrecognized datetime '{raw}' in column {name} (line {})",
                        row + 2
                    )));
                }
            },
        }
    }
    let missing = values.iter().filter(|v| v.is_none()).count();
    if missing > 0 {
        crate::warn!("{} rows have an empty {} value", missing, name);
    }
    Ok(TemporalIndex::Timestamps {
        column: name,
        values,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
