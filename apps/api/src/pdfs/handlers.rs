use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::pdf::{ImageRow, NewPdf, PdfFilter, PdfRow, RenamePdf, MAX_NAME_CHARS};
use crate::models::{require_text, Pagination};
use crate::pdfs::pipeline::{process_pdf, spawn_process_pdf};
use crate::pdfs::storage::{object_key, PdfArchive};
use crate::pdfs::{images, repo};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ProcessQuery {
    #[serde(default)]
    pub background: bool,
}

/// Collects the `file`, `name`, `job_id` and optional `created_date` fields.
async fn read_upload(mut multipart: Multipart) -> Result<NewPdf, AppError> {
    let mut file: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut name: Option<String> = None;
    let mut job_id: Option<i32> = None;
    let mut created_date: Option<DateTime<Utc>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "file" => {
                file_name = field.file_name().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                file = Some(data.to_vec());
            }
            "name" | "job_id" | "created_date" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                let value = value.trim().to_string();
                match field_name.as_str() {
                    "name" => name = Some(value),
                    "job_id" => {
                        job_id = Some(value.parse().map_err(|_| {
                            AppError::Validation(format!("job_id must be an integer, got '{value}'"))
                        })?)
                    }
                    _ => {
                        let parsed = DateTime::parse_from_rfc3339(&value).map_err(|_| {
                            AppError::Validation(format!(
                                "created_date must be an RFC 3339 timestamp, got '{value}'"
                            ))
                        })?;
                        created_date = Some(parsed.with_timezone(&Utc));
                    }
                }
            }
            _ => {}
        }
    }

    Ok(NewPdf {
        name: name
            .or(file_name)
            .ok_or_else(|| AppError::Validation("name is required".to_string()))?,
        job_id: job_id.ok_or_else(|| AppError::Validation("job_id is required".to_string()))?,
        file: file.ok_or_else(|| AppError::Validation("file is required".to_string()))?,
        created_date,
    })
}

/// POST /api/v1/pdfs
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PdfRow>), AppError> {
    let upload = read_upload(multipart).await?;
    upload.validate()?;

    let mut pdf = repo::insert_pdf(&state.db, &upload).await?;

    if let Some(archive) = &state.archive {
        match archive_pdf(&state, archive, &pdf, upload.file).await {
            Ok(archived) => pdf = archived,
            Err(e) => {
                // The row is only kept once its archive copy exists.
                repo::delete_pdf(&state.db, pdf.id).await?;
                return Err(e);
            }
        }
    }

    info!("Stored PDF {} for job description {}", pdf.id, pdf.job_id);
    Ok((StatusCode::CREATED, Json(pdf)))
}

/// Uploads the file and records its URL. A URL that cannot be recorded removes the object again.
async fn archive_pdf(
    state: &AppState,
    archive: &PdfArchive,
    pdf: &PdfRow,
    file: Vec<u8>,
) -> Result<PdfRow, AppError> {
    let key = object_key(pdf.job_id, pdf.id, &pdf.name);
    let url = archive.upload(&key, file).await?;

    match repo::set_s3_url(&state.db, pdf.id, &url).await {
        Ok(archived) => Ok(archived),
        Err(e) => {
            if let Err(cleanup) = archive.remove(&key).await {
                warn!("Could not remove orphaned object {key}: {cleanup}");
            }
            Err(e)
        }
    }
}

/// GET /api/v1/pdfs
pub async fn handle_list(
    State(state): State<AppState>,
    Query(filter): Query<PdfFilter>,
) -> Result<Json<Vec<PdfRow>>, AppError> {
    let (limit, offset) = Pagination {
        limit: filter.limit,
        offset: filter.offset,
    }
    .resolve()?;
    let name = filter.name.as_deref().filter(|n| !n.trim().is_empty());

    Ok(Json(
        repo::list_pdfs(&state.db, filter.job_id, name, limit, offset).await?,
    ))
}

/// GET /api/v1/pdfs/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PdfRow>, AppError> {
    Ok(Json(repo::require_pdf(&state.db, id).await?))
}

/// GET /api/v1/pdfs/:id/file
pub async fn handle_download(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let pdf = repo::get_pdf_file(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("PDF {id} not found")))?;
    let bytes = pdf
        .file
        .ok_or_else(|| AppError::NotFound(format!("PDF {id} has no stored file")))?;

    let disposition = format!("inline; filename=\"{}\"", header_safe_name(&pdf.name));
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// Header values must be visible ASCII; anything else becomes `_`.
fn header_safe_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if (c.is_ascii_graphic() || c == ' ') && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// PUT /api/v1/pdfs/:id
pub async fn handle_rename(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<RenamePdf>,
) -> Result<Json<PdfRow>, AppError> {
    require_text("name", &req.name, Some(MAX_NAME_CHARS))?;
    let pdf = repo::rename_pdf(&state.db, id, req.name.trim())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("PDF {id} not found")))?;
    Ok(Json(pdf))
}

/// DELETE /api/v1/pdfs/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    if !repo::delete_pdf(&state.db, id).await? {
        return Err(AppError::NotFound(format!("PDF {id} not found")));
    }
    info!("Deleted PDF {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/pdfs/:id/process
pub async fn handle_process(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<ProcessQuery>,
) -> Result<Response, AppError> {
    if params.background {
        repo::require_pdf(&state.db, id).await?;
        spawn_process_pdf(state, id);
        let body = Json(json!({ "pdf_id": id, "status": "accepted" }));
        return Ok((StatusCode::ACCEPTED, body).into_response());
    }

    let report = process_pdf(&state, id).await?;
    Ok(Json(report).into_response())
}

/// GET /api/v1/pdfs/:id/images
pub async fn handle_list_images(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ImageRow>>, AppError> {
    repo::require_pdf(&state.db, id).await?;
    Ok(Json(images::list_images(&state.db, id).await?))
}

/// GET /api/v1/images/:id
pub async fn handle_get_image(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ImageRow>, AppError> {
    let image = images::get_image(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Image {id} not found")))?;
    Ok(Json(image))
}

/// DELETE /api/v1/images/:id
pub async fn handle_delete_image(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    if !images::delete_image(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Image {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
