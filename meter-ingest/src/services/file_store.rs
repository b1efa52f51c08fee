//! Temporary storage for uploaded files
//!
//! Uploads are written to a dedicated folder under a fresh UUID name (keeping
//! the original extension) so concurrent uploads of the same file never
//! collide. [`TempFileGuard`] ties the lifetime of a stored file to a scope.

use async_trait::async_trait;
use meter_common::{uuid_utils, Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::types::FileStore;

/// [`FileStore`] writing into a local folder
#[derive(Debug, Clone)]
pub struct TempFileStore {
    folder: PathBuf,
}

impl TempFileStore {
    pub fn new(folder: PathBuf) -> Self {
        Self { folder }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }
}

#[async_trait]
impl FileStore for TempFileStore {
    async fn store(&self, bytes: &[u8], file_name: &str) -> Result<PathBuf> {
        if file_name.trim().is_empty() {
            return Err(Error::InvalidInput("file name must not be empty".to_string()));
        }

        let extension = Path::new(file_name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        tokio::fs::create_dir_all(&self.folder).await?;
        let path = self.folder.join(uuid_utils::unique_file_name(&extension));
        tokio::fs::write(&path, bytes).await?;

        debug!(
            file_name = %file_name,
            path = %path.display(),
            bytes = bytes.len(),
            "Stored upload"
        );
        Ok(path)
    }

    fn delete(&self, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidInput("file path must not be empty".to_string()));
        }

        match std::fs::remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "Deleted stored upload");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Deletes a stored file when dropped
///
/// Drop runs exactly once on every way out of the owning scope: normal
/// return, early `?` return, panic unwinding, or the owning future being
/// dropped before completion.
pub struct TempFileGuard {
    store: Arc<dyn FileStore>,
    path: PathBuf,
}

impl TempFileGuard {
    pub fn new(store: Arc<dyn FileStore>, path: PathBuf) -> Self {
        Self { store, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Err(e) = self.store.delete(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Failed to delete stored upload");
        }
    }
}
