use crate::model::score::ScoreRecord;
use crate::report::SummaryData;

pub fn render_summary_json(data: &SummaryData) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(data)?;
    out.push('\n');
    Ok(out)
}

/// Score record as a single JSON document; `null` when no score exists.
pub fn render_score_json(score: Option<&ScoreRecord>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&score)
}
