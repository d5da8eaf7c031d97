use serde_json::Value;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::job_description::ParsedJobDescriptionRow;
use crate::models::text::{ParsedTextRow, TextRow};

pub async fn insert_text(pool: &PgPool, pdf_id: i32, text: &str) -> Result<TextRow, AppError> {
    Ok(sqlx::query_as::<_, TextRow>(
        "INSERT INTO texts (pdf_id, text) VALUES ($1, $2) RETURNING *",
    )
    .bind(pdf_id)
    .bind(text)
    .fetch_one(pool)
    .await?)
}

pub async fn latest_text(pool: &PgPool, pdf_id: i32) -> Result<Option<TextRow>, AppError> {
    Ok(sqlx::query_as::<_, TextRow>(
        "SELECT * FROM texts WHERE pdf_id = $1 ORDER BY id DESC LIMIT 1",
    )
    .bind(pdf_id)
    .fetch_optional(pool)
    .await?)
}

/// Overwrites the newest text of a PDF. Returns `None` when the PDF has no text yet.
pub async fn update_latest_text(
    pool: &PgPool,
    pdf_id: i32,
    text: &str,
) -> Result<Option<TextRow>, AppError> {
    Ok(sqlx::query_as::<_, TextRow>(
        r#"
        UPDATE texts SET text = $1
        WHERE id = (SELECT id FROM texts WHERE pdf_id = $2 ORDER BY id DESC LIMIT 1)
        RETURNING *
        "#,
    )
    .bind(text)
    .bind(pdf_id)
    .fetch_optional(pool)
    .await?)
}

pub async fn insert_parsed_text(
    pool: &PgPool,
    parsed_job: &ParsedJobDescriptionRow,
    text_id: i32,
    pdf_id: i32,
    parsed_skills: &Value,
) -> Result<ParsedTextRow, AppError> {
    Ok(sqlx::query_as::<_, ParsedTextRow>(
        r#"
        INSERT INTO parsed_texts
            (job_description_id, parsed_job_description_id, text_id, pdf_id, parsed_skills)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(parsed_job.job_description_id)
    .bind(parsed_job.id)
    .bind(text_id)
    .bind(pdf_id)
    .bind(parsed_skills)
    .fetch_one(pool)
    .await?)
}

/// Newest match document for a PDF, optionally restricted to one job description.
pub async fn latest_parsed_text(
    pool: &PgPool,
    pdf_id: i32,
    job_description_id: Option<i32>,
) -> Result<Option<ParsedTextRow>, AppError> {
    Ok(sqlx::query_as::<_, ParsedTextRow>(
        r#"
        SELECT * FROM parsed_texts
        WHERE pdf_id = $1
          AND ($2::INTEGER IS NULL OR job_description_id = $2)
        ORDER BY id DESC
        LIMIT 1
        "#,
    )
    .bind(pdf_id)
    .bind(job_description_id)
    .fetch_optional(pool)
    .await?)
}
