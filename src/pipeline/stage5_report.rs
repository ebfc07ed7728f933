use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::table::{MeasurementTable, TemporalIndex};
use crate::pipeline::stage4_aggregate::{
    CorrelationMatrix, HistogramBin, HourlyStat, MonthlyStat, WeatherCorrelation,
};
use crate::pipeline::{Analysis, AnalysisRequest};
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{
    InputMeta, SummaryData, ToolMeta, format_f64_6, format_opt_6, potential_summary,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct Stage5Input<'a> {
    pub input_path: &'a Path,
    pub load_message: &'a str,
    pub rows_loaded: usize,
    pub analysis: &'a Analysis,
    pub request: &'a AnalysisRequest,
    pub tool_name: String,
    pub tool_version: String,
}

pub fn build_summary(input: &Stage5Input<'_>) -> SummaryData {
    let analysis = input.analysis;
    let table = &analysis.filtered.table;
    SummaryData {
        tool: ToolMeta {
            name: input.tool_name.clone(),
            version: input.tool_version.clone(),
        },
        input: InputMeta {
            path: input.input_path.display().to_string(),
            index_column: table.index.name().map(str::to_string),
            rows_loaded: input.rows_loaded,
            rows_analyzed: table.n_rows(),
            columns: table.n_columns(),
        },
        load_message: input.load_message.to_string(),
        filters: input.request.filters.clone(),
        scoring_profile: input.request.profile.clone(),
        score: analysis.score.clone(),
        potential: analysis.score.as_ref().map(potential_summary),
        metric: input.request.aggregate.metric.clone(),
        peak_hour: analysis.aggregates.peak_hour,
        quick_stats: analysis.aggregates.quick_stats.clone(),
        overview: analysis.aggregates.overview.clone(),
        weather_impact: analysis.aggregates.weather_impact.clone(),
    }
}

pub fn write_reports(input: &Stage5Input<'_>, out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    let summary = build_summary(input);
    let json = render_summary_json(&summary)?;
    write_text(&out_dir.join("summary.json"), &json)?;
    write_text(&out_dir.join("report.txt"), &render_report_text(&summary))?;

    let aggregates = &input.analysis.aggregates;
    write_hourly_tsv(&aggregates.hourly, &out_dir.join("hourly_profile.tsv"))?;
    write_monthly_tsv(&aggregates.monthly, &out_dir.join("monthly_profile.tsv"))?;
    write_histogram_tsv(&aggregates.histogram, &out_dir.join("histogram.tsv"))?;
    write_correlation_tsv(&aggregates.correlation, &out_dir.join("correlation.tsv"))?;
    write_weather_tsv(&aggregates.weather_impact, &out_dir.join("weather_impact.tsv"))?;

    crate::info!("reports written to {}", out_dir.display());
    Ok(())
}

/// Writes `table` as CSV with the index as the first column.
pub fn export_csv(table: &MeasurementTable, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut w = csv::Writer::from_path(path)?;

    let index_name = table.index.name().unwrap_or("index");
    let mut header = Vec::with_capacity(table.n_columns() + 1);
    header.push(index_name);
    header.extend(table.columns.iter().map(|c| c.name.as_str()));
    w.write_record(&header)?;

    for row in 0..table.n_rows() {
        let mut record = Vec::with_capacity(header.len());
        record.push(match &table.index {
            TemporalIndex::Timestamps { .. } => table
                .index
                .timestamp(row)
                .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_default(),
            TemporalIndex::Positional { .. } => row.to_string(),
        });
        record.extend(table.columns.iter().map(|c| c.values.cell_text(row)));
        w.write_record(&record)?;
    }
    w.flush()?;

    crate::info!("exported {} rows to {}", table.n_rows(), path.display());
    Ok(())
}

fn write_hourly_tsv(rows: &[HourlyStat], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "hour\tmean\tstd\tlower_1std\tupper_1std\tcount")?;
    for r in rows {
        let (lower, upper) = match r.std {
            Some(std) => (Some(r.mean - std), Some(r.mean + std)),
            None => (None, None),
        };
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}",
            r.hour,
            format_f64_6(r.mean),
            format_opt_6(r.std),
            format_opt_6(lower),
            format_opt_6(upper),
            r.count
        )?;
    }
    w.flush()
}

fn write_monthly_tsv(rows: &[MonthlyStat], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "month\tmean\tcount")?;
    for r in rows {
        writeln!(w, "{}\t{}\t{}", r.month, format_f64_6(r.mean), r.count)?;
    }
    w.flush()
}

fn write_histogram_tsv(bins: &[HistogramBin], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "lower\tupper\tcount")?;
    for b in bins {
        writeln!(
            w,
            "{}\t{}\t{}",
            format_f64_6(b.lower),
            format_f64_6(b.upper),
            b.count
        )?;
    }
    w.flush()
}

fn write_correlation_tsv(matrix: &CorrelationMatrix, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let mut header = vec!["column".to_string()];
    header.extend(matrix.columns.iter().cloned());
    writeln!(w, "{}", header.join("\t"))?;
    for (name, row) in matrix.columns.iter().zip(&matrix.values) {
        let mut cells = vec![name.clone()];
        cells.extend(row.iter().map(|v| format_opt_6(*v)));
        writeln!(w, "{}", cells.join("\t"))?;
    }
    w.flush()
}

fn write_weather_tsv(rows: &[WeatherCorrelation], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "variable\tunits\tcorrelation_with_ghi")?;
    for r in rows {
        writeln!(
            w,
            "{}\t{}\t{}",
            r.variable,
            r.units,
            format_opt_6(r.correlation)
        )?;
    }
    w.flush()
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
