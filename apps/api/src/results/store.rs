use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::AppError;
use crate::models::analysis::AnalysisResultRow;

/// Number of analyses shown in the recent-analyses table.
pub const RECENT_ANALYSES_LIMIT: i64 = 5;

pub struct NewAnalysisResult<'a> {
    pub user_name: &'a str,
    pub user_email: &'a str,
    pub job_id: i64,
    pub match_score: f64,
    pub missing_skills: &'a str,
}

/// Records one analysis. Rows are never updated or deleted.
/// `job_id` must reference an existing job; the schema enforces it.
pub async fn record_result(
    pool: &SqlitePool,
    result: NewAnalysisResult<'_>,
) -> Result<AnalysisResultRow, AppError> {
    let NewAnalysisResult {
        user_name,
        user_email,
        job_id,
        match_score,
        missing_skills,
    } = result;

    let row = sqlx::query_as::<_, AnalysisResultRow>(
        r#"
        INSERT INTO analysis_results
            (user_name, user_email, job_id, match_score, missing_skills, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING result_id, user_name, user_email, job_id, match_score, missing_skills, created_at
        "#,
    )
    .bind(user_name)
    .bind(user_email)
    .bind(job_id)
    .bind(match_score)
    .bind(missing_skills)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    info!(
        "Recorded analysis {} (job {}, score {:.2})",
        row.result_id, row.job_id, row.match_score
    );
    Ok(row)
}

/// The newest analyses first.
pub async fn recent_results(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<AnalysisResultRow>, AppError> {
    Ok(sqlx::query_as::<_, AnalysisResultRow>(
        r#"
        SELECT result_id, user_name, user_email, job_id, match_score, missing_skills, created_at
        FROM analysis_results
        ORDER BY created_at DESC, result_id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?)
}
