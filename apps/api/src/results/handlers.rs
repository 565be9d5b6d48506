use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::analysis::AnalysisResultRow;
use crate::results::store::{recent_results, RECENT_ANALYSES_LIMIT};
use crate::state::AppState;

/// GET /api/v1/analyses/recent
pub async fn handle_recent_analyses(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnalysisResultRow>>, AppError> {
    Ok(Json(recent_results(&state.db, RECENT_ANALYSES_LIMIT).await?))
}
