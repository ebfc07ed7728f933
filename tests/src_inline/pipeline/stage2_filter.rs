use super::*;
use crate::input::load_data;

const HOURLY: &str = "Timestamp,GHI\n\
2024-01-01 06:00:00,10\n\
2024-01-01 12:00:00,400\n\
2024-01-02 09:00:00,300\n\
2024-01-03 18:00:00,20\n\
,50\n";

fn table(csv: &str) -> MeasurementTable {
    load_data(csv.as_bytes()).table.unwrap()
}

fn ghi(table: &MeasurementTable) -> Vec<Option<f64>> {
    table.numeric("GHI").unwrap().to_vec()
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[test]
fn test_no_bounds_keeps_every_row() {
    let t = table(HOURLY);
    let out = run_stage2(&t, &FilterParams::default()).unwrap();
    assert_eq!(out.table, t);
    assert_eq!(out.view, t);
    assert_eq!(out.rows_dropped, 0);
}

#[test]
fn test_date_bounds_are_inclusive() {
    let t = table(HOURLY);
    let params = FilterParams {
        from: date(2024, 1, 1),
        to: date(2024, 1, 2),
        ..FilterParams::default()
    };
    let out = run_stage2(&t, &params).unwrap();
    assert_eq!(ghi(&out.table), vec![Some(10.0), Some(400.0), Some(300.0)]);
    // The row without a timestamp cannot satisfy a bound.
    assert_eq!(out.rows_dropped, 2);
}

#[test]
fn test_hour_bounds_are_inclusive() {
    let t = table(HOURLY);
    let params = FilterParams {
        hour_min: Some(9),
        hour_max: Some(12),
        ..FilterParams::default()
    };
    let out = run_stage2(&t, &params).unwrap();
    assert_eq!(ghi(&out.table), vec![Some(400.0), Some(300.0)]);
    assert_eq!(out.table.hour(0), Some(12));
    assert_eq!(out.table.hour(1), Some(9));
}

#[test]
fn test_single_sided_bounds() {
    let t = table(HOURLY);
    let after = FilterParams {
        from: date(2024, 1, 2),
        ..FilterParams::default()
    };
    assert_eq!(ghi(&run_stage2(&t, &after).unwrap().table), vec![Some(300.0), Some(20.0)]);

    let morning = FilterParams {
        hour_max: Some(9),
        ..FilterParams::default()
    };
    assert_eq!(ghi(&run_stage2(&t, &morning).unwrap().table), vec![Some(10.0), Some(300.0)]);
}

#[test]
fn test_filter_can_empty_the_table() {
    let t = table(HOURLY);
    let params = FilterParams {
        from: date(2030, 1, 1),
        ..FilterParams::default()
    };
    let out = run_stage2(&t, &params).unwrap();
    assert_eq!(out.table.n_rows(), 0);
    assert_eq!(out.table.n_columns(), t.n_columns());
    assert_eq!(out.rows_dropped, 5);
}

#[test]
fn test_invalid_ranges_rejected() {
    let t = table(HOURLY);
    let dates = FilterParams {
        from: date(2024, 2, 1),
        to: date(2024, 1, 1),
        ..FilterParams::default()
    };
    assert!(matches!(run_stage2(&t, &dates), Err(FilterError::DateRange { .. })));

    let hours = FilterParams {
        hour_min: Some(15),
        hour_max: Some(10),
        ..FilterParams::default()
    };
    assert_eq!(hours.validate(), Err(FilterError::HourRange { min: 15, max: 10 }));

    let late = FilterParams {
        hour_max: Some(24),
        ..FilterParams::default()
    };
    assert_eq!(late.validate(), Err(FilterError::HourOutOfRange(24)));
}

#[test]
fn test_positional_index_ignores_calendar_bounds() {
    let t = table("GHI\n1\n2\n3\n");
    let params = FilterParams {
        from: date(2024, 1, 1),
        hour_min: Some(6),
        ..FilterParams::default()
    };
    let out = run_stage2(&t, &params).unwrap();
    assert_eq!(out.table.n_rows(), 3);
    assert_eq!(out.rows_dropped, 0);
}

#[test]
fn test_max_rows_caps_view_only() {
    let t = table(HOURLY);
    let params = FilterParams {
        max_rows: Some(2),
        ..FilterParams::default()
    };
    let out = run_stage2(&t, &params).unwrap();
    assert_eq!(out.table.n_rows(), 5);
    assert_eq!(ghi(&out.view), vec![Some(10.0), Some(400.0)]);
    assert_eq!(out.view.index.name(), Some("Timestamp"));

    let loose = FilterParams {
        max_rows: Some(100),
        ..FilterParams::default()
    };
    assert_eq!(run_stage2(&t, &loose).unwrap().view.n_rows(), 5);
}
