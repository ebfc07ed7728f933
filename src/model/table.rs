use chrono::NaiveDateTime;

pub const HOUR_COLUMN: &str = "Hour";
pub const MONTH_COLUMN: &str = "Month";
pub const DAY_OF_WEEK_COLUMN: &str = "DayOfWeek";

/// Row ordering of a measurement table.
#[derive(Debug, Clone, PartialEq)]
pub enum TemporalIndex {
    /// Promoted timestamp column. `None` marks a row whose cell was empty.
    Timestamps {
        column: String,
        values: Vec<Option<NaiveDateTime>>,
    },
    /// Synthetic 0..len index used when no timestamp-like column exists.
    Positional { len: usize },
}

impl TemporalIndex {
    pub fn len(&self) -> usize {
        match self {
            TemporalIndex::Timestamps { values, .. } => values.len(),
            TemporalIndex::Positional { len } => *len,
        }
    }

    pub fn timestamp(&self, row: usize) -> Option<NaiveDateTime> {
        match self {
            TemporalIndex::Timestamps { values, .. } => values.get(row).copied().flatten(),
            TemporalIndex::Positional { .. } => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            TemporalIndex::Timestamps { column, .. } => Some(column.as_str()),
            TemporalIndex::Positional { .. } => None,
        }
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, TemporalIndex::Timestamps { .. })
    }

    fn select(&self, rows: &[usize]) -> Self {
        match self {
            TemporalIndex::Timestamps { column, values } => TemporalIndex::Timestamps {
                column: column.clone(),
                values: rows.iter().map(|&r| values[r]).collect(),
            },
            TemporalIndex::Positional { .. } => TemporalIndex::Positional { len: rows.len() },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
        }
    }

    pub fn null_count(&self) -> usize {
        match self {
            ColumnValues::Numeric(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnValues::Text(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    pub fn dtype(&self) -> &'static str {
        match self {
            ColumnValues::Numeric(_) => "float64",
            ColumnValues::Text(_) => "object",
        }
    }

    /// Cell rendered for export; missing cells become empty strings.
    pub fn cell_text(&self, row: usize) -> String {
        match self {
            ColumnValues::Numeric(v) => v
                .get(row)
                .copied()
                .flatten()
                .map(|x| x.to_string())
                .unwrap_or_default(),
            ColumnValues::Text(v) => v.get(row).cloned().flatten().unwrap_or_default(),
        }
    }

    fn select(&self, rows: &[usize]) -> Self {
        match self {
            ColumnValues::Numeric(v) => ColumnValues::Numeric(rows.iter().map(|&r| v[r]).collect()),
            ColumnValues::Text(v) => {
                ColumnValues::Text(rows.iter().map(|&r| v[r].clone()).collect())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

/// Measurement table: an index plus equally long named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementTable {
    pub index: TemporalIndex,
    pub columns: Vec<Column>,
}

impl MeasurementTable {
    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Values of a numeric column; `None` when absent or textual.
    pub fn numeric(&self, name: &str) -> Option<&[Option<f64>]> {
        match &self.column(name)?.values {
            ColumnValues::Numeric(v) => Some(v.as_slice()),
            ColumnValues::Text(_) => None,
        }
    }

    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| matches!(c.values, ColumnValues::Numeric(_)))
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Appends `column`, replacing an existing one with the same name in place.
    /// Returns true when a column was replaced.
    pub fn upsert_column(&mut self, column: Column) -> bool {
        if let Some(existing) = self.columns.iter_mut().find(|c| c.name == column.name) {
            *existing = column;
            true
        } else {
            self.columns.push(column);
            false
        }
    }

    pub fn hour(&self, row: usize) -> Option<u32> {
        calendar_value(self.numeric(HOUR_COLUMN), row)
    }

    pub fn month(&self, row: usize) -> Option<u32> {
        calendar_value(self.numeric(MONTH_COLUMN), row)
    }

    /// New table holding `rows` in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            index: self.index.select(rows),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: c.values.select(rows),
                })
                .collect(),
        }
    }
}

fn calendar_value(values: Option<&[Option<f64>]>, row: usize) -> Option<u32> {
    let v = values?.get(row).copied().flatten()?;
    if v >= 0.0 { Some(v as u32) } else { None }
}
