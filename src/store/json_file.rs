//! JSON file backend
//!
//! Each collection lives in `<dir>/<collection>.json` as a pretty-printed JSON
//! array. Writes go to a temporary file in the same directory which is then
//! renamed over the target, so a crash mid-write leaves the previous file intact.

use super::backend::{Collection, StorageBackend};
use crate::types::CampusError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// File-per-collection storage rooted at a data directory
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    /// Open a backend rooted at `dir`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns `Io` if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, CampusError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| CampusError::Io {
            message: format!("Failed to create data directory '{}': {}", dir.display(), e),
        })?;
        Ok(JsonFileBackend { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.dir.join(collection.file_name())
    }
}

impl StorageBackend for JsonFileBackend {
    fn read(&self, collection: Collection) -> Result<Option<Vec<u8>>, CampusError> {
        let path = self.path_for(collection);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CampusError::Io {
                message: format!("Failed to read '{}': {}", path.display(), e),
            }),
        }
    }

    fn write(&self, collection: Collection, contents: &[u8]) -> Result<(), CampusError> {
        let path = self.path_for(collection);

        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(contents)?;
        temp.as_file().sync_all()?;
        temp.persist(&path).map_err(|e| CampusError::Io {
            message: format!("Failed to replace '{}': {}", path.display(), e.error),
        })?;

        debug!(collection = %collection, bytes = contents.len(), "collection file replaced");
        Ok(())
    }
}
