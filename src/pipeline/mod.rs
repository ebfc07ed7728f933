pub mod stage2_filter;
pub mod stage3_score;
pub mod stage4_aggregate;
pub mod stage5_report;

use thiserror::Error;

use crate::model::profile::ScoringProfile;
use crate::model::score::ScoreRecord;
use crate::model::table::MeasurementTable;
use stage2_filter::{FilterError, FilterParams, Stage2Output, run_stage2};
use stage3_score::create_solar_score;
use stage4_aggregate::{Stage4Output, Stage4Params, run_stage4};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("{0}")]
    Load(String),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything one analysis pass needs besides the table itself.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub filters: FilterParams,
    pub aggregate: Stage4Params,
    pub profile: ScoringProfile,
}

#[derive(Debug)]
pub struct Analysis {
    pub filtered: Stage2Output,
    pub score: Option<ScoreRecord>,
    pub aggregates: Stage4Output,
}

/// Filters, scores and aggregates a loaded table. Holds no state between calls.
pub fn analyze(table: &MeasurementTable, request: &AnalysisRequest) -> Result<Analysis, FilterError> {
    let filtered = run_stage2(table, &request.filters)?;
    let score = create_solar_score(&filtered.table, &request.profile);
    let aggregates = run_stage4(&filtered.table, &request.aggregate);
    Ok(Analysis {
        filtered,
        score,
        aggregates,
    })
}
