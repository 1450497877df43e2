//! Record store
//!
//! Typed load/upsert/append over whole collections. Every mutating call is a
//! full read-all, mutate, write-all cycle performed under the collection's
//! mutex, so concurrent callers in one process never lose updates.
//!
//! # Components
//!
//! - `backend` - `StorageBackend` trait and the `Collection` names
//! - `json_file` - Production backend (one JSON file per collection, atomic replace)
//! - `memory` - In-memory backend for tests
//! - `record` - `Record` trait binding each type to its collection and key
//!
//! # Missing and corrupt data
//!
//! A collection that was never written, or whose file is empty, loads as an
//! empty list. Anything else that fails to decode is reported as
//! `CorruptStore`; it is never silently replaced by an empty collection.

pub mod backend;
pub mod json_file;
pub mod memory;
pub mod record;

pub use backend::{Collection, StorageBackend, COLLECTION_COUNT};
pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;
pub use record::Record;

use crate::types::CampusError;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Typed access to the record collections
pub struct RecordStore {
    backend: Box<dyn StorageBackend>,
    locks: [Mutex<()>; COLLECTION_COUNT],
}

impl RecordStore {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        RecordStore {
            backend: Box::new(backend),
            locks: Default::default(),
        }
    }

    /// Store backed by a fresh [`MemoryBackend`]
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Write an empty array for every collection that does not exist yet
    pub fn initialize(&self) -> Result<(), CampusError> {
        for collection in Collection::ALL {
            let _guard = self.lock(collection);
            if !self.backend.exists(collection)? {
                self.backend.write(collection, b"[]")?;
                debug!(collection = %collection, "initialized empty collection");
            }
        }
        Ok(())
    }

    /// Load every record of a collection, in persisted order
    pub fn load<R: Record>(&self) -> Result<Vec<R>, CampusError> {
        let _guard = self.lock(R::COLLECTION);
        self.read_all()
    }

    /// Load the first record matching `predicate`
    pub fn find<R, P>(&self, predicate: P) -> Result<Option<R>, CampusError>
    where
        R: Record,
        P: Fn(&R) -> bool,
    {
        Ok(self.load::<R>()?.into_iter().find(|record| predicate(record)))
    }

    /// Run `f` on a collection while holding its lock, without writing back
    ///
    /// Mutations of the same collection wait until `f` returns, so a check
    /// made inside `f` holds for its whole duration.
    pub fn inspect<R, T, F>(&self, f: F) -> Result<T, CampusError>
    where
        R: Record,
        F: FnOnce(&[R]) -> Result<T, CampusError>,
    {
        let _guard = self.lock(R::COLLECTION);
        let records = self.read_all::<R>()?;
        f(&records)
    }

    /// Read-modify-write a whole collection as one unit
    ///
    /// The collection lock is held from the read until the write completes.
    /// The collection is written back only when `f` returns `Ok`; on `Err`
    /// nothing is persisted and the error is returned unchanged.
    pub fn modify<R, T, F>(&self, f: F) -> Result<T, CampusError>
    where
        R: Record,
        F: FnOnce(&mut Vec<R>) -> Result<T, CampusError>,
    {
        let _guard = self.lock(R::COLLECTION);
        let mut records = self.read_all::<R>()?;
        let outcome = f(&mut records)?;
        self.write_all(&records)?;
        Ok(outcome)
    }

    /// Replace the first record with the same key, or append it
    pub fn upsert<R: Record>(&self, record: R) -> Result<(), CampusError> {
        self.modify(|records: &mut Vec<R>| {
            let key = record.key();
            match records.iter().position(|existing| existing.key() == key) {
                Some(index) => records[index] = record,
                None => records.push(record),
            }
            Ok(())
        })
    }

    /// Append a record without any key check
    pub fn append<R: Record>(&self, record: R) -> Result<(), CampusError> {
        self.modify(|records: &mut Vec<R>| {
            records.push(record);
            Ok(())
        })
    }

    fn lock(&self, collection: Collection) -> MutexGuard<'_, ()> {
        // The guarded value is (), so a poisoned lock carries no broken state
        self.locks[collection.index()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn read_all<R: Record>(&self) -> Result<Vec<R>, CampusError> {
        let collection = R::COLLECTION;
        let bytes = match self.backend.read(collection)? {
            Some(bytes) => bytes,
            None => return Ok(Vec::new()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let records: Vec<R> = serde_json::from_slice(&bytes)
            .map_err(|e| CampusError::corrupt_store(collection.name(), e))?;
        debug!(collection = %collection, count = records.len(), "collection loaded");
        Ok(records)
    }

    fn write_all<R: Record>(&self, records: &[R]) -> Result<(), CampusError> {
        let bytes = serde_json::to_vec_pretty(records).map_err(|e| CampusError::Io {
            message: format!("Failed to serialize {}: {}", R::COLLECTION, e),
        })?;
        self.backend.write(R::COLLECTION, &bytes)
    }
}
