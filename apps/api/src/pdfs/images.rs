use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::pdf::ImageRow;

/// Replaces every stored page of a PDF, numbering the new pages from 1.
pub async fn replace_images(
    pool: &PgPool,
    pdf_id: i32,
    job_id: i32,
    encoded_pages: &[String],
) -> Result<Vec<ImageRow>, AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM images WHERE pdf_id = $1")
        .bind(pdf_id)
        .execute(&mut *tx)
        .await?;

    let mut rows = Vec::with_capacity(encoded_pages.len());
    for (index, encoded) in encoded_pages.iter().enumerate() {
        let row = sqlx::query_as::<_, ImageRow>(
            r#"
            INSERT INTO images (pdf_id, job_id, page_number, encoded_image)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(pdf_id)
        .bind(job_id)
        .bind(index as i32 + 1)
        .bind(encoded)
        .fetch_one(&mut *tx)
        .await?;
        rows.push(row);
    }

    tx.commit().await?;
    Ok(rows)
}

pub async fn list_images(pool: &PgPool, pdf_id: i32) -> Result<Vec<ImageRow>, AppError> {
    Ok(sqlx::query_as::<_, ImageRow>(
        "SELECT * FROM images WHERE pdf_id = $1 ORDER BY page_number ASC",
    )
    .bind(pdf_id)
    .fetch_all(pool)
    .await?)
}

pub async fn get_image(pool: &PgPool, id: i32) -> Result<Option<ImageRow>, AppError> {
    Ok(
        sqlx::query_as::<_, ImageRow>("SELECT * FROM images WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn delete_image(pool: &PgPool, id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM images WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
