use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::models::require_text;
use crate::models::text::{ParsedTextQuery, ParsedTextRow, TextInput, TextRow};
use crate::pdfs::repo as pdf_repo;
use crate::state::AppState;
use crate::texts::{evaluation, repo};

fn no_text(pdf_id: i32) -> AppError {
    AppError::NotFound(format!("No text for PDF {pdf_id}"))
}

/// GET /api/v1/texts/:pdf_id/text
pub async fn handle_get_text(
    State(state): State<AppState>,
    Path(pdf_id): Path<i32>,
) -> Result<Json<TextRow>, AppError> {
    let text = repo::latest_text(&state.db, pdf_id)
        .await?
        .ok_or_else(|| no_text(pdf_id))?;
    Ok(Json(text))
}

/// POST /api/v1/texts/:pdf_id/text
pub async fn handle_create_text(
    State(state): State<AppState>,
    Path(pdf_id): Path<i32>,
    Json(req): Json<TextInput>,
) -> Result<(StatusCode, Json<TextRow>), AppError> {
    require_text("text", &req.text, None)?;
    pdf_repo::require_pdf(&state.db, pdf_id).await?;
    let text = repo::insert_text(&state.db, pdf_id, &req.text).await?;
    Ok((StatusCode::CREATED, Json(text)))
}

/// PUT /api/v1/texts/:pdf_id/text
pub async fn handle_update_text(
    State(state): State<AppState>,
    Path(pdf_id): Path<i32>,
    Json(req): Json<TextInput>,
) -> Result<Json<TextRow>, AppError> {
    require_text("text", &req.text, None)?;
    let text = repo::update_latest_text(&state.db, pdf_id, &req.text)
        .await?
        .ok_or_else(|| no_text(pdf_id))?;
    Ok(Json(text))
}

/// GET /api/v1/parsed-texts/:pdf_id
pub async fn handle_get_parsed_text(
    State(state): State<AppState>,
    Path(pdf_id): Path<i32>,
    Query(params): Query<ParsedTextQuery>,
) -> Result<Json<ParsedTextRow>, AppError> {
    let parsed = repo::latest_parsed_text(&state.db, pdf_id, params.job_description_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No parsed text for PDF {pdf_id}")))?;
    Ok(Json(parsed))
}

/// POST /api/v1/parsed-texts/:pdf_id/evaluate
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Path(pdf_id): Path<i32>,
) -> Result<Json<ParsedTextRow>, AppError> {
    let pdf = pdf_repo::require_pdf(&state.db, pdf_id).await?;
    let text = repo::latest_text(&state.db, pdf_id)
        .await?
        .ok_or_else(|| no_text(pdf_id))?;
    Ok(Json(evaluation::evaluate_cv(&state, &pdf, &text).await?))
}
