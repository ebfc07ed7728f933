use super::*;
use crate::input::load_data;
use crate::model::table::{Column, ColumnValues, TemporalIndex};

fn table_with(columns: &[(&str, Vec<Option<f64>>)]) -> MeasurementTable {
    let len = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
    MeasurementTable {
        index: TemporalIndex::Positional { len },
        columns: columns
            .iter()
            .map(|(name, values)| Column {
                name: name.to_string(),
                values: ColumnValues::Numeric(values.clone()),
            })
            .collect(),
    }
}

fn ghi_table(values: &[f64]) -> MeasurementTable {
    table_with(&[("GHI", values.iter().map(|&v| Some(v)).collect())])
}

fn assert_sum_invariant(record: &ScoreRecord) {
    let c = record.components;
    let sum = c.energy + c.consistency + c.reliability + c.weather;
    assert!((sum - record.total_score).abs() < 1e-9);
}

#[test]
fn test_end_to_end_example() {
    let csv = "Timestamp,GHI\n\
2024-01-01 06:00:00,45.2\n\
2024-01-01 12:00:00,250.0\n\
2024-01-01 18:00:00,30.0\n";
    let table = load_data(csv.as_bytes()).table.unwrap();
    let record = create_solar_score(&table, &ScoringProfile::default_v1()).unwrap();

    assert!((record.raw_scores.energy - 108.4).abs() < 1e-9);
    assert!((record.components.energy - 108.4 / 500.0 * 40.0).abs() < 1e-9);
    assert!((record.components.energy - 8.67).abs() < 0.01);
    // Only 250 lies above the 70th percentile (127.12).
    assert!((record.raw_scores.reliability - 100.0 / 3.0).abs() < 1e-9);
    assert_eq!(record.raw_scores.weather, 100.0);
    assert_sum_invariant(&record);
}

#[test]
fn test_consistency_uses_sample_std() {
    let record = create_solar_score(&ghi_table(&[100.0, 200.0, 300.0]), &ScoringProfile::default_v1())
        .unwrap();
    // sample std = 100, mean = 200
    assert!((record.raw_scores.consistency - 50.0).abs() < 1e-9);
    assert!((record.components.consistency - 15.0).abs() < 1e-9);
    assert_sum_invariant(&record);
}

#[test]
fn test_consistency_floored_at_zero() {
    let record = create_solar_score(&ghi_table(&[0.0, 0.0, 0.0, 1000.0]), &ScoringProfile::default_v1())
        .unwrap();
    assert_eq!(record.raw_scores.consistency, 0.0);
    assert_eq!(record.components.consistency, 0.0);
}

#[test]
fn test_constant_ghi_below_floor() {
    let record = create_solar_score(&ghi_table(&[200.0; 10]), &ScoringProfile::default_v1()).unwrap();
    assert_eq!(record.raw_scores.consistency, 100.0);
    assert_eq!(record.components.consistency, 30.0);
    assert_eq!(record.raw_scores.reliability, 0.0);
    assert!((record.components.energy - 200.0 / 500.0 * 40.0).abs() < 1e-9);
    assert_sum_invariant(&record);
}

#[test]
fn test_constant_ghi_above_floor_hits_energy_ceiling() {
    let record = create_solar_score(&ghi_table(&[750.0; 4]), &ScoringProfile::default_v1()).unwrap();
    assert_eq!(record.components.energy, 40.0);
    assert_eq!(record.raw_scores.reliability, 0.0);
    assert!((record.total_score - 80.0).abs() < 1e-9);
}

#[test]
fn test_single_row_counts_as_fully_consistent() {
    let record = create_solar_score(&ghi_table(&[320.0]), &ScoringProfile::default_v1()).unwrap();
    assert_eq!(record.raw_scores.consistency, 100.0);
    assert_eq!(record.raw_scores.reliability, 0.0);
}

#[test]
fn test_outlier_raises_energy_ceiling() {
    let profile = ScoringProfile::default_v1();
    let record = create_solar_score(&ghi_table(&[100.0, 1300.0]), &profile).unwrap();
    assert_eq!(record.raw_scores.energy, 700.0);
    assert_eq!(record.components.energy, 40.0);
}

#[test]
fn test_reliability_near_thirty_for_spread_distribution() {
    let values: Vec<f64> = (0..1000).map(|i| i as f64).collect();
    let record = create_solar_score(&ghi_table(&values), &ScoringProfile::default_v1()).unwrap();
    assert!(record.raw_scores.reliability >= 0.0 && record.raw_scores.reliability <= 100.0);
    assert!((record.raw_scores.reliability - 30.0).abs() < 0.5);
}

#[test]
fn test_missing_ghi_rows_count_as_not_reliable() {
    let table = table_with(&[("GHI", vec![Some(1.0), Some(2.0), Some(3.0), None])]);
    let record = create_solar_score(&table, &ScoringProfile::default_v1()).unwrap();
    assert_eq!(record.raw_scores.energy, 2.0);
    // threshold 2.4 over present values; one row above out of four rows.
    assert_eq!(record.raw_scores.reliability, 25.0);
}

#[test]
fn test_weather_penalty_from_humidity() {
    let table = table_with(&[
        ("GHI", vec![Some(100.0), Some(200.0), Some(300.0), Some(400.0)]),
        ("RH", vec![Some(90.0), Some(86.0), Some(85.0), Some(40.0)]),
    ]);
    let record = create_solar_score(&table, &ScoringProfile::default_v1()).unwrap();
    // 50% of rows above 85% RH -> 100 - 25
    assert_eq!(record.raw_scores.weather, 75.0);
    assert_eq!(record.components.weather, 7.5);
    assert_sum_invariant(&record);
}

#[test]
fn test_weather_full_when_humidity_low_or_absent() {
    let humid_free = table_with(&[
        ("GHI", vec![Some(100.0), Some(200.0)]),
        ("RH", vec![Some(85.0), Some(10.0)]),
    ]);
    let profile = ScoringProfile::default_v1();
    assert_eq!(create_solar_score(&humid_free, &profile).unwrap().raw_scores.weather, 100.0);
    assert_eq!(
        create_solar_score(&ghi_table(&[1.0, 2.0]), &profile).unwrap().raw_scores.weather,
        100.0
    );
}

#[test]
fn test_weather_never_negative() {
    let mut profile = ScoringProfile::default_v1();
    profile.humidity_penalty = 5.0;
    let table = table_with(&[("GHI", vec![Some(1.0), Some(2.0)]), ("RH", vec![Some(99.0), Some(99.0)])]);
    let record = create_solar_score(&table, &profile).unwrap();
    assert_eq!(record.raw_scores.weather, 0.0);
}

#[test]
fn test_missing_ghi_yields_no_score() {
    let table = table_with(&[("DNI", vec![Some(1.0), Some(2.0)])]);
    assert!(create_solar_score(&table, &ScoringProfile::default_v1()).is_none());

    let empty = table_with(&[("GHI", vec![None, None])]);
    assert!(create_solar_score(&empty, &ScoringProfile::default_v1()).is_none());
}

#[test]
fn test_components_within_weight_ceilings() {
    let table = table_with(&[
        ("GHI", vec![Some(-5.0), Some(0.0), Some(640.0), Some(980.0), Some(15.0)]),
        ("RH", vec![Some(95.0), Some(20.0), None, Some(88.0), Some(50.0)]),
    ]);
    let record = create_solar_score(&table, &ScoringProfile::default_v1()).unwrap();
    let c = record.components;
    assert!(c.energy <= 40.0);
    assert!((0.0..=30.0).contains(&c.consistency));
    assert!((0.0..=20.0).contains(&c.reliability));
    assert!((0.0..=10.0).contains(&c.weather));
    assert_sum_invariant(&record);
}
