//! Collaborator traits for the upload pipeline
//!
//! The pipeline only talks to storage, parsing and persistence through these
//! traits. Production implementations live in `services` and `db`; tests
//! substitute small recording doubles.

use async_trait::async_trait;
use meter_common::Result;
use std::path::{Path, PathBuf};

use crate::models::{RawRow, Reading};

/// Temporary storage for uploaded files
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Persist `bytes` and return the path they were written to
    async fn store(&self, bytes: &[u8], file_name: &str) -> Result<PathBuf>;

    /// Remove a stored file
    ///
    /// Deleting a path that no longer exists is a no-op. Synchronous so it
    /// can run from a drop guard.
    fn delete(&self, path: &Path) -> Result<()>;
}

/// Turns a stored CSV file into untyped rows
#[async_trait]
pub trait CsvParser: Send + Sync {
    async fn parse(&self, path: &Path) -> Result<Vec<RawRow>>;
}

/// Source of truth for which account identifiers exist
#[async_trait]
pub trait AccountRegistry: Send + Sync {
    async fn exists(&self, account_id: i32) -> Result<bool>;
}

/// Destination for accepted readings
#[async_trait]
pub trait ReadingRepository: Send + Sync {
    async fn add_range(&self, readings: &[Reading]) -> Result<()>;
}
