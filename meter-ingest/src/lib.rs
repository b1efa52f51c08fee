//! meter-ingest library interface
//!
//! Exposes the router and state so integration tests can drive the service
//! without a network listener.

pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod types;
pub mod utils;
pub mod validators;

pub use crate::error::{BuildError, UploadError, UploadResponseResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::db::{SqliteAccountRegistry, SqliteReadingRepository};
use crate::services::{CsvFileParser, ReadingBuilder, TempFileStore, UploadPipeline};
use crate::validators::RowValidator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Upload pipeline wired to its collaborators
    pub pipeline: Arc<UploadPipeline>,
    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// State with the production collaborators: uploads are staged in
    /// `upload_folder`, accounts and readings live in `db`
    pub fn new(db: SqlitePool, upload_folder: PathBuf, max_upload_bytes: usize) -> Self {
        let validator = RowValidator::new(Arc::new(SqliteAccountRegistry::new(db.clone())));
        let pipeline = UploadPipeline::new(
            Arc::new(TempFileStore::new(upload_folder)),
            Arc::new(CsvFileParser),
            ReadingBuilder::new(validator),
            Arc::new(SqliteReadingRepository::new(db.clone())),
        );

        Self::with_pipeline(db, pipeline, max_upload_bytes)
    }

    pub fn with_pipeline(db: SqlitePool, pipeline: UploadPipeline, max_upload_bytes: usize) -> Self {
        Self {
            db,
            pipeline: Arc::new(pipeline),
            max_upload_bytes,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .merge(api::upload_routes())
        .merge(api::health_routes())
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
