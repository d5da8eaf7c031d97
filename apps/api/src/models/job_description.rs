use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::errors::AppError;
use crate::models::require_text;

pub const MAX_TITLE_CHARS: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobDescriptionRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub created_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
}

/// Skills document extracted from a job description by the LLM.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ParsedJobDescriptionRow {
    pub id: i32,
    pub job_description_id: i32,
    pub parsed_skills: Value,
    pub created_date: DateTime<Utc>,
}

/// Body of `POST` and `PUT /job-descriptions`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobDescriptionInput {
    pub title: String,
    pub description: String,
}

impl JobDescriptionInput {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("title", &self.title, Some(MAX_TITLE_CHARS))?;
        require_text("description", &self.description, None)
    }
}
