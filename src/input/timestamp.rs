use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::model::columns::TIMESTAMP_CANDIDATES;
use crate::model::table::{
    Column, ColumnValues, DAY_OF_WEEK_COLUMN, HOUR_COLUMN, MONTH_COLUMN, TemporalIndex,
};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Date attached to time-only cells; Month and DayOfWeek carry no meaning then.
const TIME_ONLY_DATE: (i32, u32, u32) = (1970, 1, 1);

/// First header among the timestamp candidates, in candidate priority order.
pub fn detect_timestamp_column(headers: &[String]) -> Option<usize> {
    TIMESTAMP_CANDIDATES
        .iter()
        .find_map(|candidate| headers.iter().position(|h| h == candidate))
}

/// Parses a timestamp cell. Offsets are dropped and the wall-clock time kept.
/// Time-only cells land on a fixed date.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    let (y, m, d) = TIME_ONLY_DATE;
    let date = NaiveDate::from_ymd_opt(y, m, d)?;
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .map(|t| date.and_time(t))
}

/// `Hour`, `Month` and `DayOfWeek` (Monday = 0) columns for the index.
/// A positional index yields the same columns with every value missing.
pub fn derive_calendar(index: &TemporalIndex) -> [Column; 3] {
    let n = index.len();
    let (hour, month, dow) = match index {
        TemporalIndex::Timestamps { values, .. } => (
            values.iter().map(|t| t.map(|t| t.hour() as f64)).collect(),
            values.iter().map(|t| t.map(|t| t.month() as f64)).collect(),
            values
                .iter()
                .map(|t| t.map(|t| t.weekday().num_days_from_monday() as f64))
                .collect(),
        ),
        TemporalIndex::Positional { .. } => (vec![None; n], vec![None; n], vec![None; n]),
    };
    [
        Column {
            name: HOUR_COLUMN.to_string(),
            values: ColumnValues::Numeric(hour),
        },
        Column {
            name: MONTH_COLUMN.to_string(),
            values: ColumnValues::Numeric(month),
        },
        Column {
            name: DAY_OF_WEEK_COLUMN.to_string(),
            values: ColumnValues::Numeric(dow),
        },
    ]
}
