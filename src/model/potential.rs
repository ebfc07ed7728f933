use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PotentialTier {
    Excellent,
    Good,
    Moderate,
}

impl PotentialTier {
    pub fn from_total(total_score: f64) -> Self {
        if total_score >= 80.0 {
            PotentialTier::Excellent
        } else if total_score >= 60.0 {
            PotentialTier::Good
        } else {
            PotentialTier::Moderate
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PotentialTier::Excellent => "EXCELLENT POTENTIAL",
            PotentialTier::Good => "GOOD POTENTIAL",
            PotentialTier::Moderate => "MODERATE POTENTIAL",
        }
    }

    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            PotentialTier::Excellent => &[
                "This location shows outstanding solar characteristics",
                "High recommendation for solar farm development",
                "Expected high return on investment",
            ],
            PotentialTier::Good => &[
                "Viable location for solar investment",
                "Moderate to good energy yield expected",
                "Consider detailed feasibility study",
            ],
            PotentialTier::Moderate => &[
                "Lower than optimal solar conditions",
                "Consider alternative locations or technologies",
                "Further analysis recommended",
            ],
        }
    }
}

/// Short scorecard badge shown next to the overall score.
pub fn scorecard_delta(total_score: f64) -> &'static str {
    if total_score > 70.0 {
        "High Potential"
    } else {
        "Moderate"
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/potential.rs"]
mod tests;
