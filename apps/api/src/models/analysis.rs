use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisResultRow {
    pub result_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub job_id: i64,
    pub match_score: f64,
    pub missing_skills: String,
    pub created_at: DateTime<Utc>,
}
