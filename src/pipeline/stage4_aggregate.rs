use chrono::NaiveDateTime;
use serde::Serialize;

use crate::model::columns::{GHI, QUICK_STAT_COLUMNS, WEATHER_VARIABLES, units_for};
use crate::model::table::{MeasurementTable, TemporalIndex};
use crate::report::{mean, pearson, present, sample_std};

pub const DEFAULT_BINS: usize = 20;

#[derive(Debug, Clone)]
pub struct Stage4Params {
    /// Column used for hourly/monthly profiles and the histogram.
    pub metric: String,
    /// Correlation matrix columns; every numeric column when `None`.
    pub columns: Option<Vec<String>>,
    pub bins: usize,
}

impl Default for Stage4Params {
    fn default() -> Self {
        Self {
            metric: GHI.to_string(),
            columns: None,
            bins: DEFAULT_BINS,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnMean {
    pub column: String,
    pub mean: f64,
    pub units: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnInfo {
    pub column: String,
    pub dtype: &'static str,
    pub non_null: usize,
    pub null: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataOverview {
    pub total_records: usize,
    pub columns: usize,
    pub date_range: Option<(NaiveDateTime, NaiveDateTime)>,
    pub missing_values: usize,
    pub column_info: Vec<ColumnInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyStat {
    pub hour: u32,
    pub mean: f64,
    /// Sample std; `None` with a single observation.
    pub std: Option<f64>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStat {
    pub month: u32,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeatherCorrelation {
    pub variable: String,
    pub units: &'static str,
    pub correlation: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Stage4Output {
    pub quick_stats: Vec<ColumnMean>,
    pub overview: DataOverview,
    pub histogram: Vec<HistogramBin>,
    pub hourly: Vec<HourlyStat>,
    pub monthly: Vec<MonthlyStat>,
    pub peak_hour: Option<u32>,
    pub correlation: CorrelationMatrix,
    pub weather_impact: Vec<WeatherCorrelation>,
}

pub fn run_stage4(table: &MeasurementTable, params: &Stage4Params) -> Stage4Output {
    let metric_values = table.numeric(&params.metric);
    if metric_values.is_none() {
        crate::warn!(
            "metric {} is not a numeric column; histogram and profiles skipped",
            params.metric
        );
    }

    let hourly = hourly_profile(table, &params.metric);
    let peak_hour = peak_hour(&hourly);

    Stage4Output {
        quick_stats: quick_stats(table),
        overview: data_overview(table),
        histogram: metric_values
            .map(|v| histogram(&present(v), params.bins))
            .unwrap_or_default(),
        hourly,
        monthly: monthly_profile(table, &params.metric),
        peak_hour,
        correlation: correlation_matrix(table, params.columns.as_deref()),
        weather_impact: weather_impact(table),
    }
}

pub fn quick_stats(table: &MeasurementTable) -> Vec<ColumnMean> {
    QUICK_STAT_COLUMNS
        .iter()
        .filter_map(|&name| {
            let values = present(table.numeric(name)?);
            Some(ColumnMean {
                column: name.to_string(),
                mean: mean(&values)?,
                units: units_for(name),
            })
        })
        .collect()
}

pub fn data_overview(table: &MeasurementTable) -> DataOverview {
    let column_info = table
        .columns
        .iter()
        .map(|c| {
            let null = c.values.null_count();
            ColumnInfo {
                column: c.name.clone(),
                dtype: c.values.dtype(),
                non_null: c.values.len() - null,
                null,
            }
        })
        .collect::<Vec<_>>();

    let date_range = match &table.index {
        TemporalIndex::Timestamps { values, .. } => {
            let mut stamps = values.iter().flatten();
            stamps.next().map(|&first| {
                stamps.fold((first, first), |(lo, hi), &t| (lo.min(t), hi.max(t)))
            })
        }
        TemporalIndex::Positional { .. } => None,
    };

    DataOverview {
        total_records: table.n_rows(),
        columns: table.n_columns(),
        date_range,
        missing_values: column_info.iter().map(|c| c.null).sum(),
        column_info,
    }
}

/// Equal-width bins spanning the observed range.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}

/// Mean and spread of `metric` per hour of day, hours without data omitted.
pub fn hourly_profile(table: &MeasurementTable, metric: &str) -> Vec<HourlyStat> {
    let Some(values) = table.numeric(metric) else {
        return Vec::new();
    };
    let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); 24];
    for (row, v) in values.iter().enumerate() {
        if let (Some(hour), Some(v)) = (table.hour(row), v) {
            if hour < 24 && !v.is_nan() {
                buckets[hour as usize].push(*v);
            }
        }
    }
    buckets
        .iter()
        .enumerate()
        .filter_map(|(hour, b)| {
            Some(HourlyStat {
                hour: hour as u32,
                mean: mean(b)?,
                std: sample_std(b),
                count: b.len(),
            })
        })
        .collect()
}

pub fn monthly_profile(table: &MeasurementTable, metric: &str) -> Vec<MonthlyStat> {
    let Some(values) = table.numeric(metric) else {
        return Vec::new();
    };
    let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); 12];
    for (row, v) in values.iter().enumerate() {
        if let (Some(month), Some(v)) = (table.month(row), v) {
            if (1..=12).contains(&month) && !v.is_nan() {
                buckets[month as usize - 1].push(*v);
            }
        }
    }
    buckets
        .iter()
        .enumerate()
        .filter_map(|(idx, b)| {
            Some(MonthlyStat {
                month: idx as u32 + 1,
                mean: mean(b)?,
                count: b.len(),
            })
        })
        .collect()
}

pub fn peak_hour(hourly: &[HourlyStat]) -> Option<u32> {
    hourly
        .iter()
        .max_by(|a, b| a.mean.total_cmp(&b.mean))
        .map(|h| h.hour)
}

/// Pairwise Pearson matrix. Unknown or textual names in `columns` are skipped.
pub fn correlation_matrix(table: &MeasurementTable, columns: Option<&[String]>) -> CorrelationMatrix {
    let names: Vec<String> = match columns {
        Some(requested) => requested
            .iter()
            .filter(|name| {
                let numeric = table.numeric(name).is_some();
                if !numeric {
                    crate::warn!("correlation column {} skipped: not a numeric column", name);
                }
                numeric
            })
            .cloned()
            .collect(),
        None => table
            .numeric_column_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    };

    let series: Vec<&[Option<f64>]> = names
        .iter()
        .filter_map(|name| table.numeric(name))
        .collect();
    let values: Vec<Vec<Option<f64>>> = series
        .iter()
        .map(|x| series.iter().map(|y| pearson(x, y)).collect::<Vec<_>>())
        .collect();

    CorrelationMatrix {
        columns: names,
        values,
    }
}

/// Correlation of GHI with each weather variable present in the table.
pub fn weather_impact(table: &MeasurementTable) -> Vec<WeatherCorrelation> {
    let Some(ghi) = table.numeric(GHI) else {
        return Vec::new();
    };
    WEATHER_VARIABLES
        .iter()
        .filter_map(|&name| {
            let values = table.numeric(name)?;
            Some(WeatherCorrelation {
                variable: name.to_string(),
                units: units_for(name),
                correlation: pearson(ghi, values),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_aggregate.rs"]
mod tests;
