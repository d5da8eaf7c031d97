use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::jobs::{extraction, repo};
use crate::models::job_description::{
    JobDescriptionInput, JobDescriptionRow, ParsedJobDescriptionRow,
};
use crate::models::Pagination;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateQuery {
    #[serde(default)]
    pub run_process_workflow: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/job-descriptions
pub async fn handle_create(
    State(state): State<AppState>,
    Query(params): Query<CreateQuery>,
    Json(req): Json<JobDescriptionInput>,
) -> Result<(StatusCode, Json<JobDescriptionRow>), AppError> {
    req.validate()?;
    let job = repo::insert_job_description(&state.db, &req).await?;
    info!("Created job description {}", job.id);

    if params.run_process_workflow {
        spawn_parse_job_description(state, job.clone());
    }

    Ok((StatusCode::CREATED, Json(job)))
}

/// Runs skill extraction detached from the request. The outcome is only logged.
fn spawn_parse_job_description(state: AppState, job: JobDescriptionRow) {
    tokio::spawn(async move {
        match extraction::parse_job_description(&state, &job).await {
            Ok(parsed) => info!(
                "Background parsing of job description {} finished: parsed id {}",
                job.id, parsed.id
            ),
            Err(e) => error!("Background parsing of job description {} failed: {e}", job.id),
        }
    });
}

/// GET /api/v1/job-descriptions
pub async fn handle_list(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<JobDescriptionRow>>, AppError> {
    let (limit, offset) = page.resolve()?;
    Ok(Json(
        repo::list_job_descriptions(&state.db, limit, offset).await?,
    ))
}

/// GET /api/v1/job-descriptions/recent
pub async fn handle_recent(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<JobDescriptionRow>>, AppError> {
    let (limit, _) = page.resolve()?;
    Ok(Json(
        repo::list_recent_job_descriptions(&state.db, limit).await?,
    ))
}

/// GET /api/v1/job-descriptions/search?q=
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<JobDescriptionRow>>, AppError> {
    if params.q.trim().is_empty() {
        return Err(AppError::Validation("q must not be empty".to_string()));
    }
    let (limit, offset) = Pagination {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve()?;

    Ok(Json(
        repo::search_job_descriptions(&state.db, &params.q, limit, offset).await?,
    ))
}

/// GET /api/v1/job-descriptions/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<JobDescriptionRow>, AppError> {
    Ok(Json(repo::require_job_description(&state.db, id).await?))
}

/// PUT /api/v1/job-descriptions/:id
pub async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<JobDescriptionInput>,
) -> Result<Json<JobDescriptionRow>, AppError> {
    req.validate()?;
    let job = repo::update_job_description(&state.db, id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job description {id} not found")))?;
    Ok(Json(job))
}

/// DELETE /api/v1/job-descriptions/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    if !repo::delete_job_description(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Job description {id} not found")));
    }
    info!("Deleted job description {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/job-descriptions/:id/process
pub async fn handle_process(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ParsedJobDescriptionRow>, AppError> {
    let job = repo::require_job_description(&state.db, id).await?;
    Ok(Json(extraction::parse_job_description(&state, &job).await?))
}

/// GET /api/v1/parsed-job-descriptions/:job_id
pub async fn handle_get_parsed(
    State(state): State<AppState>,
    Path(job_id): Path<i32>,
) -> Result<Json<ParsedJobDescriptionRow>, AppError> {
    let parsed = repo::latest_parsed_job_description(&state.db, job_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No parsed job description for job description {job_id}"
            ))
        })?;
    Ok(Json(parsed))
}
