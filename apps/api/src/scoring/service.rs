use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::score::ScoreRow;
use crate::models::text::ParsedTextRow;
use crate::scoring::calculation::{score_from_document, ScoreBreakdown};
use crate::scoring::repo;
use crate::state::AppState;
use crate::texts::repo as text_repo;

#[derive(Debug, Serialize)]
pub struct ScoredMatch {
    #[serde(flatten)]
    pub score: ScoreRow,
    pub breakdown: ScoreBreakdown,
}

/// Scores a stored match document against the parsed job description it was built from.
pub async fn score_parsed_text(
    state: &AppState,
    parsed_text: &ParsedTextRow,
) -> Result<ScoredMatch, AppError> {
    let job_id = parsed_text.job_description_id;
    let breakdown = score_from_document(&parsed_text.parsed_skills)?;
    let score = repo::insert_score(
        &state.db,
        parsed_text.pdf_id,
        job_id,
        parsed_text.parsed_job_description_id,
        breakdown.score,
    )
    .await?;

    info!(
        "Scored PDF {} against job description {}: {:.3}",
        parsed_text.pdf_id, job_id, breakdown.score
    );
    Ok(ScoredMatch { score, breakdown })
}

/// Scores the latest match document of a PDF for one job description.
pub async fn score_pdf(
    state: &AppState,
    pdf_id: i32,
    job_description_id: i32,
) -> Result<ScoredMatch, AppError> {
    let parsed_text =
        text_repo::latest_parsed_text(&state.db, pdf_id, Some(job_description_id))
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No match document for PDF {pdf_id} and job description {job_description_id}"
                ))
            })?;
    score_parsed_text(state, &parsed_text).await
}
