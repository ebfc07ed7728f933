pub mod json;
pub mod text;

use serde::Serialize;

use crate::model::potential::PotentialTier;
use crate::model::profile::ScoringProfile;
use crate::model::score::ScoreRecord;
use crate::pipeline::stage2_filter::FilterParams;
use crate::pipeline::stage4_aggregate::{ColumnMean, DataOverview, WeatherCorrelation};

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMeta {
    pub path: String,
    pub index_column: Option<String>,
    pub rows_loaded: usize,
    pub rows_analyzed: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PotentialSummary {
    pub tier: PotentialTier,
    pub label: &'static str,
    pub delta: &'static str,
    pub recommendations: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub input: InputMeta,
    pub load_message: String,
    pub filters: FilterParams,
    pub scoring_profile: ScoringProfile,
    pub score: Option<ScoreRecord>,
    pub potential: Option<PotentialSummary>,
    pub metric: String,
    pub peak_hour: Option<u32>,
    pub quick_stats: Vec<ColumnMean>,
    pub overview: DataOverview,
    pub weather_impact: Vec<WeatherCorrelation>,
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn format_opt_6(v: Option<f64>) -> String {
    v.map(format_f64_6).unwrap_or_else(|| "NA".to_string())
}

/// Present, non-NaN values in row order.
pub fn present(values: &[Option<f64>]) -> Vec<f64> {
    values
        .iter()
        .filter_map(|v| *v)
        .filter(|v| !v.is_nan())
        .collect()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1). `None` below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    if values.iter().all(|&v| v == values[0]) {
        return Some(0.0);
    }
    let m = mean(values)?;
    let ss = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Quantile with linear interpolation between the bracketing order statistics.
pub fn quantile_linear(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let pos = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Percentage of all rows (missing ones included) whose value satisfies `pred`.
pub fn percent_of_rows(values: &[Option<f64>], pred: impl Fn(f64) -> bool) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let hits = values.iter().filter(|v| v.is_some_and(&pred)).count();
    hits as f64 / values.len() as f64 * 100.0
}

/// Pearson correlation over rows where both sides are present.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) if !x.is_nan() && !y.is_nan() => Some((*x, *y)),
            _ => None,
        })
        .collect();
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in &pairs {
        sxy += (x - mx) * (y - my);
        sxx += (x - mx) * (x - mx);
        syy += (y - my) * (y - my);
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}

pub fn potential_summary(score: &ScoreRecord) -> PotentialSummary {
    let tier = PotentialTier::from_total(score.total_score);
    PotentialSummary {
        tier,
        label: tier.label(),
        delta: crate::model::potential::scorecard_delta(score.total_score),
        recommendations: tier.recommendations(),
    }
}
