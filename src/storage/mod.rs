//! Local persistence layer.
//!
//! History is kept in a string-keyed store holding one serialized JSON value
//! per key. `JsonFileStore` is the on-disk implementation; `MemoryStore` keeps
//! everything in process for tests and embedding.

use std::collections::BTreeMap;

pub mod history;
pub mod json_file;

pub use json_file::JsonFileStore;

/// String-keyed persistence collaborator.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> crate::error::Result<Option<String>>;

    /// Overwrite the value under `key`. Each call is one whole write.
    fn set(&mut self, key: &str, value: String) -> crate::error::Result<()>;

    fn remove(&mut self, key: &str) -> crate::error::Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: impl Into<String>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(key.to_string(), value.into());
        Self { entries }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> crate::error::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> crate::error::Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> crate::error::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
