//! The persistent key-value seam.
//!
//! [`crate::saved::SavedProfileStore`] only ever sees this trait, so the
//! SQLite file used by the app can be swapped for anything that stores
//! strings under keys.

use std::collections::HashMap;

use crate::error::StoreError;

/// Durable string storage keyed by string.
///
/// `set` must be durable when it returns `Ok`; callers rely on that to keep
/// their in-memory view and the stored snapshot identical.
pub trait PersistentKeyValueStore: Send {
    /// Returns the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the write did not happen.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Process-local store. Used when the database cannot be opened, and in tests.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: HashMap<String, String>,
    read_only: bool,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-seeded with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.to_owned(), value.to_owned());
        store
    }

    /// Makes every subsequent `set` fail, simulating an unavailable backend.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }
}

impl PersistentKeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Unavailable("store is read-only".to_owned()));
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
