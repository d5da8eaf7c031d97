use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScoreRow {
    pub id: i32,
    pub pdf_id: i32,
    pub job_description_id: i32,
    pub parsed_job_description_id: i32,
    pub score: f64,
    pub created_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
}
