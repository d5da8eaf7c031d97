use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Text transcribed from a PDF. A PDF may have several versions; the latest wins.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TextRow {
    pub id: i32,
    pub pdf_id: i32,
    pub text: Option<String>,
    pub created_date: DateTime<Utc>,
}

/// Skill match document for one CV text against one job description.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ParsedTextRow {
    pub id: i32,
    pub job_description_id: i32,
    /// The parsed job description the matches were made against.
    pub parsed_job_description_id: i32,
    pub text_id: i32,
    pub pdf_id: i32,
    pub parsed_skills: Value,
    pub created_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct TextInput {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ParsedTextQuery {
    pub job_description_id: Option<i32>,
}
