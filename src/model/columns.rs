pub const GHI: &str = "GHI";
pub const RH: &str = "RH";

/// Timestamp-like header names, highest priority first.
pub const TIMESTAMP_CANDIDATES: &[&str] = &["Timestamp", "timestamp", "Date", "date", "Time", "time"];

/// Weather variables checked against GHI in the impact analysis.
pub const WEATHER_VARIABLES: &[&str] = &["Tamb", "RH", "WS", "BP", "Precipitation"];

/// Columns averaged on the overview scorecard.
pub const QUICK_STAT_COLUMNS: &[&str] = &["GHI", "Tamb", "RH", "WS"];

const RECOGNIZED: &[(&str, &str)] = &[
    ("GHI", "W/m²"),
    ("DNI", "W/m²"),
    ("DHI", "W/m²"),
    ("ModA", "W/m²"),
    ("ModB", "W/m²"),
    ("Tamb", "°C"),
    ("TModA", "°C"),
    ("TModB", "°C"),
    ("RH", "%"),
    ("WS", "m/s"),
    ("WSgust", "m/s"),
    ("BP", "hPa"),
    ("WD", "°N"),
    ("Precipitation", "mm/min"),
];

/// Unit label for a column, empty when the column is not recognized.
pub fn units_for(column: &str) -> &'static str {
    RECOGNIZED
        .iter()
        .find(|(name, _)| *name == column)
        .map(|(_, unit)| *unit)
        .unwrap_or("")
}

/// Recognized measurement columns must hold numbers only.
pub fn is_recognized_numeric(column: &str) -> bool {
    RECOGNIZED.iter().any(|(name, _)| *name == column)
}
