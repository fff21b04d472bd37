//! Filesystem artifact store for rendered story images.
//!
//! Names are freshly generated per save, so the store is append-only from
//! the pipeline's perspective: nothing ever overwrites an existing
//! artifact. Orphans left behind by re-renders persist until explicitly
//! deleted.

use std::path::{Path, PathBuf};

use serde::Serialize;
use uuid::Uuid;

use crate::error::CoreError;

/// File extension for all stored artifacts.
const EXTENSION: &str = "png";

/// URL prefix under which the file-serving route exposes artifacts.
const URL_PREFIX: &str = "/files";

/// Reference to a stored artifact.
#[derive(Debug, Clone, Serialize)]
pub struct StoredArtifact {
    /// Unique file name, e.g. `3f2b….png`.
    pub name: String,
    /// Stable path reference, e.g. `/files/3f2b….png`.
    pub url: String,
}

/// Byte-blob storage rooted at a base directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    base_dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at `base_dir`. The directory is created lazily
    /// on first save.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Root directory of the store.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Persist a buffer under a fresh unique name.
    pub async fn save(&self, bytes: &[u8]) -> Result<StoredArtifact, CoreError> {
        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to create artifact dir: {e}")))?;

        let name = format!("{}.{EXTENSION}", Uuid::new_v4());
        let path = self.base_dir.join(&name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to write artifact {name}: {e}")))?;

        Ok(StoredArtifact {
            url: format!("{URL_PREFIX}/{name}"),
            name,
        })
    }

    /// Read a stored artifact back by name.
    ///
    /// Rejects names that would escape the base directory and maps a
    /// missing file to [`CoreError::NotFound`].
    pub async fn read(&self, name: &str) -> Result<Vec<u8>, CoreError> {
        validate_name(name)?;
        let path = self.base_dir.join(name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CoreError::not_found("Artifact", name))
            }
            Err(e) => Err(CoreError::Internal(format!(
                "Failed to read artifact {name}: {e}"
            ))),
        }
    }
}

/// Reject empty names and anything resembling path traversal.
fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
    {
        return Err(CoreError::Validation(format!(
            "Invalid artifact name '{name}'"
        )));
    }
    Ok(())
}
