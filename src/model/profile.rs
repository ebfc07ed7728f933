use serde::Serialize;

/// Constants of the solar potential formula.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringProfile {
    pub energy_weight: f64,
    pub consistency_weight: f64,
    pub reliability_weight: f64,
    pub weather_weight: f64,
    /// Lower bound of the adaptive energy ceiling, W/m².
    pub energy_floor: f64,
    pub reliability_quantile: f64,
    /// Relative humidity (%) above which an interval counts as humid.
    pub humidity_threshold: f64,
    /// Weather points lost per percent of humid intervals.
    pub humidity_penalty: f64,
}

impl ScoringProfile {
    pub fn default_v1() -> Self {
        Self {
            energy_weight: 40.0,
            consistency_weight: 30.0,
            reliability_weight: 20.0,
            weather_weight: 10.0,
            energy_floor: 500.0,
            reliability_quantile: 0.70,
            humidity_threshold: 85.0,
            humidity_penalty: 0.5,
        }
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::default_v1()
    }
}
