use std::collections::BTreeSet;

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::analysis::matcher::{
    format_missing, missing_skills, score_jobs, select_best_match, JobScore, SimilarityScorer,
};
use crate::analysis::skills::extract_skills;
use crate::errors::AppError;
use crate::jobs::store::list_jobs;
use crate::models::job::Job;
use crate::results::store::{record_result, NewAnalysisResult};

/// One resume submission. Name and email are free text and not validated.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub resume_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub result_id: i64,
    pub best_match: Job,
    /// 0–100, two decimals.
    pub match_score: f64,
    pub missing_skills: Vec<String>,
    pub missing_skills_display: String,
    pub extracted_skills: BTreeSet<String>,
    pub scores: Vec<JobScore>,
    pub scorer_backend: String,
}

/// Full pipeline: extract → score every job → pick the best → diff skills → record.
/// Blank resume text is rejected before anything is written.
pub async fn analyze_resume(
    pool: &SqlitePool,
    scorer: &dyn SimilarityScorer,
    submission: &Submission,
) -> Result<AnalysisReport, AppError> {
    if submission.resume_text.trim().is_empty() {
        warn!("Rejected analysis with empty resume text");
        return Err(AppError::Validation(
            crate::analysis::document::EMPTY_RESUME_MESSAGE.to_string(),
        ));
    }

    let extracted_skills = extract_skills(&submission.resume_text);
    let jobs = list_jobs(pool).await?;
    let scores = score_jobs(scorer, &extracted_skills, &jobs);

    let similarities: Vec<f64> = scores.iter().map(|s| s.similarity).collect();
    let (best_match, best_score) = select_best_match(&similarities)
        .and_then(|i| Some((jobs.get(i)?.clone(), scores.get(i)?.match_score)))
        .ok_or_else(|| {
            AppError::UnprocessableEntity(
                "There are no job postings to match against yet.".to_string(),
            )
        })?;

    let missing = missing_skills(&best_match, &extracted_skills);
    let missing_skills_display = format_missing(&missing);

    let row = record_result(
        pool,
        NewAnalysisResult {
            user_name: &submission.name,
            user_email: &submission.email,
            job_id: best_match.job_id,
            match_score: best_score,
            missing_skills: &missing_skills_display,
        },
    )
    .await?;

    info!(
        "Analysis {}: {} skills extracted, best match job {} ({}) at {:.2}%",
        row.result_id,
        extracted_skills.len(),
        best_match.job_id,
        best_match.title,
        best_score
    );

    Ok(AnalysisReport {
        result_id: row.result_id,
        best_match,
        match_score: best_score,
        missing_skills: missing,
        missing_skills_display,
        extracted_skills,
        scores,
        scorer_backend: scorer.backend().to_string(),
    })
}
