//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::jobs::store::{get_job, insert_job, list_jobs, NewJob};
use crate::models::job::Job;
use crate::state::AppState;

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Result<Json<Vec<Job>>, AppError> {
    Ok(Json(list_jobs(&state.db).await?))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<Json<Job>, AppError> {
    Ok(Json(get_job(&state.db, job_id).await?))
}

/// POST /api/v1/jobs
///
/// All four fields are required; a blank field is a 400 and nothing is inserted.
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<NewJob>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let job = insert_job(&state.db, &request).await?;
    Ok((StatusCode::CREATED, Json(job)))
}
