use serde::Serialize;

/// One value per scoring component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScores {
    pub energy: f64,
    pub consistency: f64,
    pub reliability: f64,
    pub weather: f64,
}

impl ComponentScores {
    pub fn sum(&self) -> f64 {
        self.energy + self.consistency + self.reliability + self.weather
    }

    pub fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("energy", self.energy),
            ("consistency", self.consistency),
            ("reliability", self.reliability),
            ("weather", self.weather),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub total_score: f64,
    /// Weighted contributions; they sum to `total_score`.
    pub components: ComponentScores,
    /// Unweighted statistics the components were derived from.
    pub raw_scores: ComponentScores,
}
