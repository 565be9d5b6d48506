use std::sync::Arc;

use sqlx::SqlitePool;

use crate::analysis::matcher::SimilarityScorer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// The pool is the only storage handle; every store call receives it explicitly.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
    /// Pluggable similarity backend. Default: TfIdfScorer.
    pub scorer: Arc<dyn SimilarityScorer>,
}
