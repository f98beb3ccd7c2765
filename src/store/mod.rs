//! Lead persistence
//!
//! The store is an append-only list of [`LeadRecord`]s. Reads never fail: a
//! missing, unreadable or corrupt backing file reads as "no leads". Appends
//! are fatal to the caller when they cannot be made durable.

use crate::Result;
use crate::types::LeadRecord;
use async_trait::async_trait;

mod json_file;

pub use json_file::JsonFileStore;

/// Append-only lead storage
///
/// Implementations must make an appended record visible to every later
/// [`load_all`](LeadStore::load_all) call before `append` returns, and must
/// never expose a partially-written store to readers.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Load every record in insertion order
    ///
    /// Returns an empty list when the backing resource is missing, unreadable
    /// or not a valid list of records.
    async fn load_all(&self) -> Vec<LeadRecord>;

    /// Append a record and persist the whole list
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`](crate::Error::Store) if the existing list
    /// cannot be read (other than being absent) or the new list cannot be
    /// written. Existing records are left untouched and the new record must
    /// be considered not recorded in that case.
    async fn append(&self, record: LeadRecord) -> Result<()>;
}
