use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored job posting. `skills_required` is kept exactly as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub job_id: i64,
    pub title: String,
    pub company: String,
    pub skills_required: String,
    pub description: String,
}

impl Job {
    /// Comma-separated skills, trimmed and lower-cased. Empty tokens are dropped.
    pub fn skill_tokens(&self) -> Vec<String> {
        split_skill_list(&self.skills_required)
    }
}

pub fn split_skill_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
