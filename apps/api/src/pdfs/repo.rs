use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::contains_pattern;
use crate::models::pdf::{NewPdf, PdfFileRow, PdfRow};

/// Metadata columns; the `file` column is only read by `get_pdf_file`.
const PDF_COLUMNS: &str = "id, name, job_id, s3_url, created_date";

pub async fn insert_pdf(pool: &PgPool, pdf: &NewPdf) -> Result<PdfRow, AppError> {
    let query = format!(
        "INSERT INTO pdfs (name, job_id, file, created_date) \
         VALUES ($1, $2, $3, COALESCE($4, NOW())) RETURNING {PDF_COLUMNS}"
    );
    Ok(sqlx::query_as::<_, PdfRow>(&query)
        .bind(&pdf.name)
        .bind(pdf.job_id)
        .bind(&pdf.file)
        .bind(pdf.created_date)
        .fetch_one(pool)
        .await?)
}

pub async fn set_s3_url(
    pool: &PgPool,
    id: i32,
    s3_url: &str,
) -> Result<PdfRow, AppError> {
    let query = format!("UPDATE pdfs SET s3_url = $1 WHERE id = $2 RETURNING {PDF_COLUMNS}");
    Ok(sqlx::query_as::<_, PdfRow>(&query)
        .bind(s3_url)
        .bind(id)
        .fetch_one(pool)
        .await?)
}

pub async fn get_pdf(pool: &PgPool, id: i32) -> Result<Option<PdfRow>, AppError> {
    let query = format!("SELECT {PDF_COLUMNS} FROM pdfs WHERE id = $1");
    Ok(sqlx::query_as::<_, PdfRow>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

pub async fn require_pdf(pool: &PgPool, id: i32) -> Result<PdfRow, AppError> {
    get_pdf(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("PDF {id} not found")))
}

pub async fn get_pdf_file(pool: &PgPool, id: i32) -> Result<Option<PdfFileRow>, AppError> {
    Ok(sqlx::query_as::<_, PdfFileRow>(
        "SELECT id, name, job_id, file FROM pdfs WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?)
}

/// Lists PDF metadata, optionally filtered by job and by a name substring.
pub async fn list_pdfs(
    pool: &PgPool,
    job_id: Option<i32>,
    name: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<PdfRow>, AppError> {
    let query = format!(
        r#"
        SELECT {PDF_COLUMNS} FROM pdfs
        WHERE ($1::INTEGER IS NULL OR job_id = $1)
          AND ($2::TEXT IS NULL OR name ILIKE $2)
        ORDER BY id ASC
        LIMIT $3 OFFSET $4
        "#
    );
    Ok(sqlx::query_as::<_, PdfRow>(&query)
        .bind(job_id)
        .bind(name.map(contains_pattern))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?)
}

pub async fn rename_pdf(pool: &PgPool, id: i32, name: &str) -> Result<Option<PdfRow>, AppError> {
    let query = format!("UPDATE pdfs SET name = $1 WHERE id = $2 RETURNING {PDF_COLUMNS}");
    Ok(sqlx::query_as::<_, PdfRow>(&query)
        .bind(name)
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

/// Deletes the PDF with its images, texts, parsed texts and scores.
pub async fn delete_pdf(pool: &PgPool, id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM pdfs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
