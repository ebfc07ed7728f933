use crate::model::columns::{GHI, RH};
use crate::model::profile::ScoringProfile;
use crate::model::score::{ComponentScores, ScoreRecord};
use crate::model::table::MeasurementTable;
use crate::report::{mean, percent_of_rows, present, quantile_linear, sample_std};

/// Solar potential score of `table`, or `None` when there is no GHI signal
/// to score (column absent or without a single value).
pub fn create_solar_score(table: &MeasurementTable, profile: &ScoringProfile) -> Option<ScoreRecord> {
    let Some(ghi) = table.numeric(GHI) else {
        crate::warn!("no {} column; solar score unavailable", GHI);
        return None;
    };
    let values = present(ghi);
    let Some(energy_raw) = mean(&values) else {
        crate::warn!("{} column has no values; solar score unavailable", GHI);
        return None;
    };

    let consistency_raw = consistency_raw(&values, energy_raw);
    let reliability_raw = reliability_raw(ghi, &values, profile.reliability_quantile);
    let weather_raw = weather_raw(table.numeric(RH), profile);

    let raw_scores = ComponentScores {
        energy: energy_raw,
        consistency: consistency_raw,
        reliability: reliability_raw,
        weather: weather_raw,
    };

    // The ceiling follows the sample once its mean exceeds the floor.
    let energy_max = energy_raw.max(profile.energy_floor);
    let components = ComponentScores {
        energy: energy_raw / energy_max * profile.energy_weight,
        consistency: consistency_raw / 100.0 * profile.consistency_weight,
        reliability: reliability_raw / 100.0 * profile.reliability_weight,
        weather: weather_raw / 100.0 * profile.weather_weight,
    };
    let total_score = components.sum();

    crate::info!(
        "solar score {:.2} (energy {:.2}, consistency {:.2}, reliability {:.2}, weather {:.2})",
        total_score,
        components.energy,
        components.consistency,
        components.reliability,
        components.weather
    );

    Some(ScoreRecord {
        total_score,
        components,
        raw_scores,
    })
}

/// `(1 - cv) * 100` in [0, 100]; a flat or single-sample series counts as 100.
fn consistency_raw(values: &[f64], mean: f64) -> f64 {
    match sample_std(values) {
        Some(std) if std > 0.0 => ((1.0 - std / mean) * 100.0).clamp(0.0, 100.0),
        _ => 100.0,
    }
}

/// Share of all rows strictly above the GHI quantile threshold.
fn reliability_raw(ghi: &[Option<f64>], values: &[f64], quantile: f64) -> f64 {
    match quantile_linear(values, quantile) {
        Some(threshold) => percent_of_rows(ghi, |v| v > threshold),
        None => 0.0,
    }
}

fn weather_raw(rh: Option<&[Option<f64>]>, profile: &ScoringProfile) -> f64 {
    let mut score = 100.0;
    if let Some(rh) = rh {
        let humid = percent_of_rows(rh, |v| v > profile.humidity_threshold);
        score -= humid * profile.humidity_penalty;
    }
    score.max(0.0)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_score.rs"]
mod tests;
