use crate::model::potential::{PotentialTier, scorecard_delta};

#[test]
fn test_tier_boundaries() {
    assert_eq!(PotentialTier::from_total(80.0), PotentialTier::Excellent);
    assert_eq!(PotentialTier::from_total(79.99), PotentialTier::Good);
    assert_eq!(PotentialTier::from_total(60.0), PotentialTier::Good);
    assert_eq!(PotentialTier::from_total(59.9), PotentialTier::Moderate);
    assert_eq!(PotentialTier::from_total(-3.0), PotentialTier::Moderate);
}

#[test]
fn test_scorecard_delta_threshold_is_strict() {
    assert_eq!(scorecard_delta(70.0), "Moderate");
    assert_eq!(scorecard_delta(70.5), "High Potential");
}

#[test]
fn test_tier_labels_and_recommendations() {
    assert_eq!(PotentialTier::Good.label(), "GOOD POTENTIAL");
    assert_eq!(PotentialTier::Excellent.recommendations().len(), 3);
    assert_eq!(
        serde_json::to_string(&PotentialTier::Moderate).unwrap(),
        "\"MODERATE\""
    );
}
