//! Storage backend abstraction
//!
//! A backend moves whole serialized collections in and out of persistence.
//! It knows nothing about records or keys; `RecordStore` layers typed
//! upsert/append semantics and per-collection locking on top.

use crate::types::CampusError;
use std::fmt;

/// Named record collections, one per entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Cards,
    Transactions,
    Attendance,
    Students,
    Faculty,
}

/// Number of distinct collections
pub const COLLECTION_COUNT: usize = 5;

impl Collection {
    /// Every collection, in a fixed order
    pub const ALL: [Collection; COLLECTION_COUNT] = [
        Collection::Cards,
        Collection::Transactions,
        Collection::Attendance,
        Collection::Students,
        Collection::Faculty,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Cards => "cards",
            Collection::Transactions => "transactions",
            Collection::Attendance => "attendance",
            Collection::Students => "students",
            Collection::Faculty => "faculty",
        }
    }

    /// File name used by file-backed storage
    pub fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Collection::Cards => 0,
            Collection::Transactions => 1,
            Collection::Attendance => 2,
            Collection::Students => 3,
            Collection::Faculty => 4,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whole-collection persistence
///
/// Implementations must make `write` atomic with respect to `read`: a reader
/// sees either the previous contents or the new contents, never a mix.
pub trait StorageBackend: Send + Sync {
    /// Read the serialized collection, or `None` if it was never written
    fn read(&self, collection: Collection) -> Result<Option<Vec<u8>>, CampusError>;

    /// Replace the serialized collection
    fn write(&self, collection: Collection, contents: &[u8]) -> Result<(), CampusError>;

    /// Whether the collection has ever been written
    fn exists(&self, collection: Collection) -> Result<bool, CampusError> {
        Ok(self.read(collection)?.is_some())
    }
}
