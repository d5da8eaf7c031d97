use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::models::score::ScoreRow;
use crate::scoring::repo;
use crate::scoring::service::{score_pdf, ScoredMatch};
use crate::state::AppState;

/// POST /api/v1/scores/process/:pdf_id/:job_description_id
pub async fn handle_process_score(
    State(state): State<AppState>,
    Path((pdf_id, job_description_id)): Path<(i32, i32)>,
) -> Result<Json<ScoredMatch>, AppError> {
    Ok(Json(score_pdf(&state, pdf_id, job_description_id).await?))
}

/// GET /api/v1/scores/:pdf_id/:job_description_id
pub async fn handle_get_score(
    State(state): State<AppState>,
    Path((pdf_id, job_description_id)): Path<(i32, i32)>,
) -> Result<Json<ScoreRow>, AppError> {
    let score = repo::latest_score(&state.db, pdf_id, job_description_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No score for PDF {pdf_id} and job description {job_description_id}"
            ))
        })?;
    Ok(Json(score))
}
