use std::collections::HashSet;

use csv::{ReaderBuilder, Trim};

use crate::input::InputError;
use crate::model::columns::is_recognized_numeric;
use crate::model::table::{Column, ColumnValues};

/// Cell spellings read as a missing value.
const NA_TOKENS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A"];

#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    /// Column-major cells; `None` marks a missing value.
    pub cells: Vec<Vec<Option<String>>>,
    pub n_rows: usize,
}

pub fn read_raw_table(bytes: &[u8]) -> Result<RawTable, InputError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            if h.is_empty() {
                format!("Unnamed: {idx}")
            } else {
                h.to_string()
            }
        })
        .collect();
    if headers.is_empty() {
        return Err(InputError::MissingInput("file has no header row".to_string()));
    }

    let mut seen = HashSet::new();
    for h in &headers {
        if !seen.insert(h.as_str()) {
            return Err(InputError::InvalidInput(format!("duplicate column name: {h}")));
        }
    }

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    let mut n_rows = 0usize;
    for record in reader.records() {
        let record = record?;
        for (col, field) in record.iter().enumerate() {
            let value = if NA_TOKENS.contains(&field) {
                None
            } else {
                Some(field.to_string())
            };
            cells[col].push(value);
        }
        n_rows += 1;
    }

    Ok(RawTable {
        headers,
        cells,
        n_rows,
    })
}

/// Numeric when every present cell parses as f64, text otherwise.
/// Recognized measurement columns are not allowed to fall back to text
/// and must hold finite numbers.
pub fn type_column(name: &str, cells: Vec<Option<String>>) -> Result<Column, InputError> {
    let recognized = is_recognized_numeric(name);
    let first_rejected = cells.iter().enumerate().find_map(|(row, cell)| {
        let s = cell.as_deref()?;
        match s.parse::<f64>() {
            Err(_) => Some((row, s.to_string(), "non-numeric")),
            Ok(v) if recognized && !v.is_finite() => Some((row, s.to_string(), "non-finite")),
            Ok(_) => None,
        }
    });

    if let Some((row, value, kind)) = first_rejected {
        if recognized {
            return Err(InputError::InvalidInput(format!(
                "column {name} holds {kind} value '{value}' (line {})",
                row + 2
            )));
        }
        return Ok(Column {
            name: name.to_string(),
            values: ColumnValues::Text(cells),
        });
    }

    let numeric = cells
        .iter()
        .map(|cell| cell.as_deref().and_then(|s| s.parse::<f64>().ok()))
        .collect();
    Ok(Column {
        name: name.to_string(),
        values: ColumnValues::Numeric(numeric),
    })
}
