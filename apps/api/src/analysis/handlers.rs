//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::analysis::service::{analyze_resume, AnalysisReport, Submission};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub resume_text: String,
}

/// POST /api/v1/analyses
///
/// Scores the pasted resume against every stored job and records the best match.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    let submission = Submission {
        name: request.name,
        email: request.email,
        resume_text: request.resume_text,
    };
    let report = analyze_resume(&state.db, state.scorer.as_ref(), &submission).await?;
    Ok(Json(report))
}
