//! Preference storage seam
//!
//! Preferences persist across sessions through whatever durable store the
//! host provides. The trait is deliberately tiny: string keys to string
//! values, last write wins, no transactions.

use rustc_hash::FxHashMap;
use std::sync::RwLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store is denied in this context (sandboxing, policy).
    #[error("preference storage is unavailable in this context")]
    Unavailable,
}

pub trait PreferenceStorage: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<FxHashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.read().unwrap().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Backend for contexts where persistence is denied entirely. Reads see
/// nothing and writes fail; callers degrade to session-only state.
#[derive(Debug, Default)]
pub struct DisabledStorage;

impl PreferenceStorage for DisabledStorage {
    fn read(&self, _key: &str) -> Option<String> {
        None
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}
