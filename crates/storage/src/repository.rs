//! Artifact Repository

use crate::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// JSON file store for a single trained artifact
#[derive(Debug, Clone)]
pub struct ArtifactRepository {
    path: PathBuf,
}

impl ArtifactRepository {
    /// Create a repository backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether an artifact has been saved
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Save an artifact, replacing any previous one
    ///
    /// Writes to a sibling temporary file first and renames it into place,
    /// so readers never observe a half-written artifact.
    pub fn save<T: Serialize>(&self, artifact: &T) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(parent, e))?;
        }

        let json = serde_json::to_vec_pretty(artifact)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.io_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(&self.path, e))?;

        info!("Saved artifact to {}", self.path.display());
        Ok(())
    }

    /// Load the saved artifact
    pub fn load<T: DeserializeOwned>(&self) -> Result<T, StorageError> {
        let bytes = fs::read(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::ArtifactNotFound(self.path.clone()),
            _ => self.io_error(&self.path, e),
        })?;

        debug!("Read {} bytes from {}", bytes.len(), self.path.display());

        serde_json::from_slice(&bytes).map_err(|e| StorageError::SerializationError(e.to_string()))
    }

    fn io_error(&self, path: &Path, err: std::io::Error) -> StorageError {
        StorageError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}
