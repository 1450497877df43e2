//! Store configuration
//!
//! Resolved from the command line (or the `CAMPUS_CARD_DATA_DIR` environment
//! variable) and used to open the file-backed store.

use crate::core::AccountOperations;
use crate::store::{JsonFileBackend, RecordStore};
use crate::types::CampusError;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Data directory used when none is configured
pub const DEFAULT_DATA_DIR: &str = "data";

/// Where the record collections live
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding `cards.json`, `transactions.json`, ...
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Open the record store, creating the directory and any missing
    /// collection files
    ///
    /// # Errors
    ///
    /// Returns `Io` if the directory or a collection file cannot be created.
    pub fn open_store(&self) -> Result<Arc<RecordStore>, CampusError> {
        let backend = JsonFileBackend::new(&self.data_dir)?;
        let store = RecordStore::new(backend);
        store.initialize()?;
        debug!(data_dir = %self.data_dir.display(), "store opened");
        Ok(Arc::new(store))
    }

    /// Open the store and wrap it in [`AccountOperations`]
    pub fn open(&self) -> Result<AccountOperations, CampusError> {
        Ok(AccountOperations::new(self.open_store()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Collection;
    use tempfile::TempDir;

    #[test]
    fn test_default_data_dir() {
        assert_eq!(StoreConfig::default().data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_open_creates_directory_and_empty_collections() {
        let root = TempDir::new().unwrap();
        let data_dir = root.path().join("nested").join("data");

        let operations = StoreConfig::new(&data_dir).open().unwrap();

        for collection in Collection::ALL {
            let contents = std::fs::read_to_string(data_dir.join(collection.file_name())).unwrap();
            assert_eq!(contents, "[]");
        }
        assert!(operations.ledger().all().unwrap().is_empty());
    }

    #[test]
    fn test_open_keeps_existing_data() {
        let root = TempDir::new().unwrap();
        std::fs::write(
            root.path().join("students.json"),
            r#"[{"userId":"S01","name":"Ali","registeredCourses":["CPE100"]}]"#,
        )
        .unwrap();

        let operations = StoreConfig::new(root.path()).open().unwrap();

        assert_eq!(operations.profiles().students().unwrap().len(), 1);
    }
}
