//! In-memory backend
//!
//! Keeps serialized collections in a `DashMap`. Used by tests and benches in
//! place of the file backend; it goes through the same serialization path so
//! corrupt-data handling can be exercised without touching disk.

use super::backend::{Collection, StorageBackend};
use crate::types::CampusError;
use dashmap::DashMap;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    collections: DashMap<Collection, Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with raw bytes, bypassing serialization
    pub fn with_raw(self, collection: Collection, contents: &[u8]) -> Self {
        self.collections.insert(collection, contents.to_vec());
        self
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, collection: Collection) -> Result<Option<Vec<u8>>, CampusError> {
        Ok(self
            .collections
            .get(&collection)
            .map(|entry| entry.value().clone()))
    }

    fn write(&self, collection: Collection, contents: &[u8]) -> Result<(), CampusError> {
        self.collections.insert(collection, contents.to_vec());
        Ok(())
    }
}
