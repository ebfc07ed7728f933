use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::model::table::MeasurementTable;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub hour_min: Option<u32>,
    pub hour_max: Option<u32>,
    /// Caps the exported view only; scoring always sees every filtered row.
    pub max_rows: Option<usize>,
}

impl FilterParams {
    fn has_calendar_bounds(&self) -> bool {
        self.from.is_some() || self.to.is_some() || self.hour_min.is_some() || self.hour_max.is_some()
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(FilterError::DateRange { from, to });
            }
        }
        for hour in [self.hour_min, self.hour_max].into_iter().flatten() {
            if hour > 23 {
                return Err(FilterError::HourOutOfRange(hour));
            }
        }
        if let (Some(min), Some(max)) = (self.hour_min, self.hour_max) {
            if min > max {
                return Err(FilterError::HourRange { min, max });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("invalid date range: {from} is after {to}")]
    DateRange { from: NaiveDate, to: NaiveDate },
    #[error("invalid hour range: {min} is after {max}")]
    HourRange { min: u32, max: u32 },
    #[error("hour {0} is outside 0..=23")]
    HourOutOfRange(u32),
}

#[derive(Debug)]
pub struct Stage2Output {
    /// Rows inside the date and hour bounds.
    pub table: MeasurementTable,
    /// `table` truncated to `max_rows`.
    pub view: MeasurementTable,
    pub rows_dropped: usize,
}

pub fn run_stage2(
    table: &MeasurementTable,
    params: &FilterParams,
) -> Result<Stage2Output, FilterError> {
    params.validate()?;

    let n_rows = table.n_rows();
    let filtered = if !params.has_calendar_bounds() {
        table.clone()
    } else if !table.index.is_temporal() {
        crate::warn!("date/hour filters ignored: the table has no timestamp index");
        table.clone()
    } else {
        let rows = (0..n_rows)
            .filter(|&row| row_matches(table, row, params))
            .collect::<Vec<_>>();
        table.select_rows(&rows)
    };

    let rows_dropped = n_rows - filtered.n_rows();
    if rows_dropped > 0 {
        crate::info!(
            "filters kept {} of {} rows",
            filtered.n_rows(),
            n_rows
        );
    }

    let view = match params.max_rows {
        Some(limit) if limit < filtered.n_rows() => {
            let rows = (0..limit).collect::<Vec<_>>();
            filtered.select_rows(&rows)
        }
        _ => filtered.clone(),
    };

    Ok(Stage2Output {
        table: filtered,
        view,
        rows_dropped,
    })
}

fn row_matches(table: &MeasurementTable, row: usize, params: &FilterParams) -> bool {
    let Some(ts) = table.index.timestamp(row) else {
        return false;
    };
    let date = ts.date();
    if params.from.is_some_and(|from| date < from) || params.to.is_some_and(|to| date > to) {
        return false;
    }
    if params.hour_min.is_some() || params.hour_max.is_some() {
        let Some(hour) = table.hour(row) else {
            return false;
        };
        if params.hour_min.is_some_and(|min| hour < min)
            || params.hour_max.is_some_and(|max| hour > max)
        {
            return false;
        }
    }
    true
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_filter.rs"]
mod tests;
