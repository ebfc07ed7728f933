mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::input::load_path;
use crate::model::profile::ScoringProfile;
use crate::model::table::MeasurementTable;
use crate::pipeline::stage2_filter::{FilterParams, run_stage2};
use crate::pipeline::stage3_score::create_solar_score;
use crate::pipeline::stage4_aggregate::{DEFAULT_BINS, Stage4Params};
use crate::pipeline::stage5_report::{Stage5Input, export_csv, write_reports};
use crate::pipeline::{AnalysisRequest, RunError, analyze};
use crate::report::json::render_score_json;

#[derive(Debug, Parser)]
#[command(
    name = "solar-siteqc",
    version,
    about = "Solar potential scoring and summaries for irradiance/weather CSV data"
)]
struct Cli {
    /// Default log filter when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a file and write summary.json, report.txt and chart data
    Run(RunArgs),
    /// Print the score record as JSON on stdout
    Score(ScoreArgs),
}

#[derive(Debug, Clone, Args)]
struct FilterArgs {
    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
    #[arg(long)]
    hour_min: Option<u32>,
    #[arg(long)]
    hour_max: Option<u32>,
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    /// CSV input, optionally gzip-compressed (.gz)
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    out: PathBuf,
    #[command(flatten)]
    filters: FilterArgs,
    /// Column for the histogram and hourly/monthly profiles
    #[arg(long, default_value = "GHI")]
    metric: String,
    /// Comma-separated columns for the correlation matrix
    #[arg(long, value_delimiter = ',')]
    columns: Option<Vec<String>>,
    #[arg(long, default_value_t = DEFAULT_BINS)]
    bins: usize,
    /// Row cap for the exported view
    #[arg(long)]
    max_rows: Option<usize>,
    /// Write the filtered rows to this CSV file
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct ScoreArgs {
    #[arg(long)]
    input: PathBuf,
    #[command(flatten)]
    filters: FilterArgs,
}

impl FilterArgs {
    fn to_params(&self, max_rows: Option<usize>) -> FilterParams {
        FilterParams {
            from: self.from,
            to: self.to,
            hour_min: self.hour_min,
            hour_max: self.hour_max,
            max_rows,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);
    if let Err(err) = run(cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), RunError> {
    match command {
        Command::Run(args) => run_analysis(&args),
        Command::Score(args) => run_score(&args),
    }
}

fn load_table(path: &std::path::Path) -> Result<(MeasurementTable, String), RunError> {
    let outcome = load_path(path);
    match outcome.table {
        Some(table) => Ok((table, outcome.message)),
        None => Err(RunError::Load(outcome.message)),
    }
}

fn build_request(args: &RunArgs) -> AnalysisRequest {
    AnalysisRequest {
        filters: args.filters.to_params(args.max_rows),
        aggregate: Stage4Params {
            metric: args.metric.clone(),
            columns: args.columns.clone(),
            bins: args.bins,
        },
        profile: ScoringProfile::default_v1(),
    }
}

fn run_analysis(args: &RunArgs) -> Result<(), RunError> {
    let (table, message) = load_table(&args.input)?;
    let request = build_request(args);
    let analysis = analyze(&table, &request)?;

    let input = Stage5Input {
        input_path: &args.input,
        load_message: &message,
        rows_loaded: table.n_rows(),
        analysis: &analysis,
        request: &request,
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    write_reports(&input, &args.out)?;

    if let Some(path) = &args.export {
        export_csv(&analysis.filtered.view, path)?;
    }
    Ok(())
}

fn run_score(args: &ScoreArgs) -> Result<(), RunError> {
    let (table, _) = load_table(&args.input)?;
    let filtered = run_stage2(&table, &args.filters.to_params(None))?;
    let score = create_solar_score(&filtered.table, &ScoringProfile::default_v1());
    println!("{}", render_score_json(score.as_ref())?);
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
