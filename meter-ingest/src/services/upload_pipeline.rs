//! Upload orchestration
//!
//! One upload runs: store -> parse -> build -> persist -> aggregate.
//!
//! The stored temporary file is owned by a [`TempFileGuard`] from the moment
//! it exists, so it is deleted exactly once whether processing succeeds,
//! fails, panics or is cancelled. Failures after storing are logged here with
//! their full cause chain and surface to the caller as
//! [`UploadError::Pipeline`] only.

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::UploadError;
use crate::models::{RawRow, Reading, UploadResult};
use crate::services::file_store::TempFileGuard;
use crate::services::reading_builder::ReadingBuilder;
use crate::services::result_aggregator::build_upload_result;
use crate::types::{CsvParser, FileStore, ReadingRepository};

/// File received from the client
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Only names ending in `.csv` (case-sensitive) are accepted
    pub fn is_csv(&self) -> bool {
        self.file_name.ends_with(".csv")
    }
}

/// Runs a single CSV upload end to end
pub struct UploadPipeline {
    file_store: Arc<dyn FileStore>,
    parser: Arc<dyn CsvParser>,
    builder: ReadingBuilder,
    repository: Arc<dyn ReadingRepository>,
}

impl UploadPipeline {
    pub fn new(
        file_store: Arc<dyn FileStore>,
        parser: Arc<dyn CsvParser>,
        builder: ReadingBuilder,
        repository: Arc<dyn ReadingRepository>,
    ) -> Self {
        Self {
            file_store,
            parser,
            builder,
            repository,
        }
    }

    /// Process an uploaded file and report how many rows were accepted
    ///
    /// A missing file or a name not ending in `.csv` is rejected before
    /// anything is stored.
    pub async fn upload(&self, file: Option<UploadedFile>) -> Result<UploadResult, UploadError> {
        let file = match file {
            Some(file) if file.is_csv() => file,
            _ => return Err(UploadError::CsvFileRequired),
        };

        let stored_path = self
            .file_store
            .store(&file.bytes, &file.file_name)
            .await
            .map_err(|e| {
                error!(file_name = %file.file_name, error = %e, "Failed to store upload");
                UploadError::Storage(e)
            })?;

        let guard = TempFileGuard::new(Arc::clone(&self.file_store), stored_path);
        let outcome = self.process(guard.path()).await;
        drop(guard);

        match outcome {
            Ok((readings, rows)) => {
                let result = build_upload_result(&readings, &rows);
                info!(
                    file_name = %file.file_name,
                    success_count = result.success_count,
                    failure_count = result.failure_count,
                    "Upload processed"
                );
                Ok(result)
            }
            Err(e) => {
                error!(file_name = %file.file_name, "Upload failed: {:#}", e);
                Err(UploadError::Pipeline)
            }
        }
    }

    async fn process(&self, path: &Path) -> anyhow::Result<(Vec<Reading>, Vec<RawRow>)> {
        let rows = self
            .parser
            .parse(path)
            .await
            .context("Failed to parse upload")?;

        let readings = self
            .builder
            .build(Some(&rows))
            .await
            .context("Failed to build readings")?;

        self.repository
            .add_range(&readings)
            .await
            .context("Failed to persist readings")?;

        Ok((readings, rows))
    }
}
