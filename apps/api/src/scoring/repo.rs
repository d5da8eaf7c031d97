use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::score::ScoreRow;

pub async fn insert_score(
    pool: &PgPool,
    pdf_id: i32,
    job_description_id: i32,
    parsed_job_description_id: i32,
    score: f64,
) -> Result<ScoreRow, AppError> {
    Ok(sqlx::query_as::<_, ScoreRow>(
        r#"
        INSERT INTO scores (pdf_id, job_description_id, parsed_job_description_id, score)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(pdf_id)
    .bind(job_description_id)
    .bind(parsed_job_description_id)
    .bind(score)
    .fetch_one(pool)
    .await?)
}

pub async fn latest_score(
    pool: &PgPool,
    pdf_id: i32,
    job_description_id: i32,
) -> Result<Option<ScoreRow>, AppError> {
    Ok(sqlx::query_as::<_, ScoreRow>(
        r#"
        SELECT * FROM scores
        WHERE pdf_id = $1 AND job_description_id = $2
        ORDER BY id DESC
        LIMIT 1
        "#,
    )
    .bind(pdf_id)
    .bind(job_description_id)
    .fetch_optional(pool)
    .await?)
}
