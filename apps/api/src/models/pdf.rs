use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;
use crate::models::require_text;

pub const MAX_NAME_CHARS: usize = 200;

/// PDF metadata. The file bytes are only loaded through `PdfFileRow`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PdfRow {
    pub id: i32,
    pub name: String,
    pub job_id: i32,
    pub s3_url: Option<String>,
    pub created_date: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct PdfFileRow {
    pub id: i32,
    pub name: String,
    pub job_id: i32,
    pub file: Option<Vec<u8>>,
}

/// A rendered page, base64 encoded JPEG.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ImageRow {
    pub id: i32,
    pub pdf_id: i32,
    pub job_id: i32,
    pub page_number: i32,
    pub encoded_image: String,
    pub created_date: DateTime<Utc>,
}

/// A validated upload, ready to insert.
#[derive(Debug, Clone)]
pub struct NewPdf {
    pub name: String,
    pub job_id: i32,
    pub file: Vec<u8>,
    pub created_date: Option<DateTime<Utc>>,
}

impl NewPdf {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("name", &self.name, Some(MAX_NAME_CHARS))?;
        if !self.file.starts_with(b"%PDF-") {
            return Err(AppError::Validation(
                "file does not look like a PDF document".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct PdfFilter {
    pub job_id: Option<i32>,
    pub name: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Body of `PUT /pdfs/:id`.
#[derive(Debug, Deserialize)]
pub struct RenamePdf {
    pub name: String,
}
