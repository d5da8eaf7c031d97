use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::contains_pattern;
use crate::models::job_description::{
    JobDescriptionInput, JobDescriptionRow, ParsedJobDescriptionRow,
};

pub async fn insert_job_description(
    pool: &PgPool,
    input: &JobDescriptionInput,
) -> Result<JobDescriptionRow, AppError> {
    Ok(sqlx::query_as::<_, JobDescriptionRow>(
        r#"
        INSERT INTO job_descriptions (title, description)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .fetch_one(pool)
    .await?)
}

pub async fn get_job_description(
    pool: &PgPool,
    id: i32,
) -> Result<Option<JobDescriptionRow>, AppError> {
    Ok(
        sqlx::query_as::<_, JobDescriptionRow>("SELECT * FROM job_descriptions WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

/// Like `get_job_description`, but a missing row is a `NotFound` error.
pub async fn require_job_description(
    pool: &PgPool,
    id: i32,
) -> Result<JobDescriptionRow, AppError> {
    get_job_description(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job description {id} not found")))
}

pub async fn list_job_descriptions(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<JobDescriptionRow>, AppError> {
    Ok(sqlx::query_as::<_, JobDescriptionRow>(
        "SELECT * FROM job_descriptions ORDER BY id ASC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?)
}

pub async fn list_recent_job_descriptions(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<JobDescriptionRow>, AppError> {
    Ok(sqlx::query_as::<_, JobDescriptionRow>(
        "SELECT * FROM job_descriptions ORDER BY created_date DESC, id DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?)
}

/// Case-insensitive substring search over title and description.
pub async fn search_job_descriptions(
    pool: &PgPool,
    query: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<JobDescriptionRow>, AppError> {
    let pattern = contains_pattern(query);
    Ok(sqlx::query_as::<_, JobDescriptionRow>(
        r#"
        SELECT * FROM job_descriptions
        WHERE title ILIKE $1 OR description ILIKE $1
        ORDER BY id ASC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?)
}

pub async fn update_job_description(
    pool: &PgPool,
    id: i32,
    input: &JobDescriptionInput,
) -> Result<Option<JobDescriptionRow>, AppError> {
    Ok(sqlx::query_as::<_, JobDescriptionRow>(
        r#"
        UPDATE job_descriptions
        SET title = $1, description = $2, updated_date = NOW()
        WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(id)
    .fetch_optional(pool)
    .await?)
}

/// Deletes the job description and, through `ON DELETE CASCADE`, everything hanging off it.
/// Returns false when no row matched.
pub async fn delete_job_description(pool: &PgPool, id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM job_descriptions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn insert_parsed_job_description(
    pool: &PgPool,
    job_description_id: i32,
    parsed_skills: &serde_json::Value,
) -> Result<ParsedJobDescriptionRow, AppError> {
    Ok(sqlx::query_as::<_, ParsedJobDescriptionRow>(
        r#"
        INSERT INTO parsed_job_descriptions (job_description_id, parsed_skills)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(job_description_id)
    .bind(parsed_skills)
    .fetch_one(pool)
    .await?)
}

pub async fn latest_parsed_job_description(
    pool: &PgPool,
    job_description_id: i32,
) -> Result<Option<ParsedJobDescriptionRow>, AppError> {
    Ok(sqlx::query_as::<_, ParsedJobDescriptionRow>(
        r#"
        SELECT * FROM parsed_job_descriptions
        WHERE job_description_id = $1
        ORDER BY id DESC
        LIMIT 1
        "#,
    )
    .bind(job_description_id)
    .fetch_optional(pool)
    .await?)
}
