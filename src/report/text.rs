use crate::report::{SummaryData, format_f64_6, format_opt_6};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Solar Site Potential Report\n");
    out.push_str("===========================\n\n");

    out.push_str("1. Input\n");
    out.push_str(&format!("File: {}\n", data.input.path));
    out.push_str(&format!("{}\n", data.load_message));
    out.push_str(&format!(
        "Temporal index: {}\n",
        data.input.index_column.as_deref().unwrap_or("positional (no timestamp column)")
    ));
    out.push_str(&format!(
        "Rows analyzed: {} of {}\n",
        data.input.rows_analyzed, data.input.rows_loaded
    ));
    if let Some((start, end)) = data.overview.date_range {
        out.push_str(&format!(
            "Date range: {} to {}\n",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        ));
    }
    out.push_str(&format!("Missing values: {}\n\n", data.overview.missing_values));

    out.push_str("2. Solar potential score\n");
    match &data.score {
        Some(score) => {
            out.push_str(&format!(
                "Overall score: {:.1}/100",
                score.total_score
            ));
            if let Some(p) = &data.potential {
                out.push_str(&format!(" ({})", p.delta));
            }
            out.push('\n');
            let ceilings = [
                data.scoring_profile.energy_weight,
                data.scoring_profile.consistency_weight,
                data.scoring_profile.reliability_weight,
                data.scoring_profile.weather_weight,
            ];
            for (((name, weighted), (_, raw)), ceiling) in score
                .components
                .named()
                .into_iter()
                .zip(score.raw_scores.named())
                .zip(ceilings)
            {
                out.push_str(&format!(
                    "  {:<12} {:>5.1}/{:<3} raw={}\n",
                    name,
                    weighted,
                    ceiling,
                    format_f64_6(raw)
                ));
            }
        }
        None => out.push_str("No score: the data has no GHI values.\n"),
    }
    out.push('\n');

    out.push_str("3. Quick statistics\n");
    if data.quick_stats.is_empty() {
        out.push_str("No recognized measurement columns.\n");
    }
    for stat in &data.quick_stats {
        out.push_str(&format!(
            "Average {}: {:.1} {}\n",
            stat.column, stat.mean, stat.units
        ));
    }
    if let Some(hour) = data.peak_hour {
        out.push_str(&format!("Peak {} hour: {:02}:00\n", data.metric, hour));
    }
    out.push('\n');

    out.push_str("4. Weather impact\n");
    if data.weather_impact.is_empty() {
        out.push_str("No weather variables available.\n");
    }
    for w in &data.weather_impact {
        out.push_str(&format!(
            "Correlation between GHI and {}: {}\n",
            w.variable,
            format_opt_6(w.correlation)
        ));
    }
    out.push('\n');

    if let Some(p) = &data.potential {
        out.push_str("5. Assessment\n");
        out.push_str(&format!("{}\n", p.label));
        for line in p.recommendations {
            out.push_str(&format!("- {}\n", line));
        }
    }

    out
}
