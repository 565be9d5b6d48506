mod analysis;
mod config;
mod db;
mod errors;
mod jobs;
mod models;
mod results;
mod routes;
mod state;
mod web;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::matcher::{SimilarityScorer, TfIdfScorer};
use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::jobs::store::seed_sample_jobs;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Open the store and bring its schema up to date
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    if config.seed_sample_jobs {
        let seeded = seed_sample_jobs(&db).await?;
        if seeded > 0 {
            info!("Job store was empty; inserted {seeded} sample postings");
        }
    }

    let scorer = Arc::new(TfIdfScorer);
    info!("Similarity backend: {}", scorer.backend());

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        scorer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
