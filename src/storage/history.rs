use std::sync::Arc;

use tokio::sync::Mutex;

use super::KeyValueStore;
use crate::error::AppError;
use crate::models::history::EnhancementRecord;

/// Key the serialized history array lives under.
pub const HISTORY_KEY: &str = "pixup-enhanced-images";

/// Handle shared by the pipeline and the presentation layer.
pub type SharedHistory<S> = Arc<Mutex<HistoryStore<S>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// In-memory history collection (newest first) backed by a key/value store.
///
/// Every mutation rewrites the whole persisted array.
#[derive(Debug)]
pub struct HistoryStore<S: KeyValueStore> {
    store: S,
    records: Vec<EnhancementRecord>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Wrap `store` and load whatever history it already holds.
    pub fn open(store: S) -> Self {
        let mut history = Self {
            store,
            records: Vec::new(),
        };
        history.records = history.load();
        history
    }

    pub fn into_shared(self) -> SharedHistory<S> {
        Arc::new(Mutex::new(self))
    }

    /// Read the persisted collection. Missing or corrupt data yields an empty
    /// history; the failure is only logged.
    pub fn load(&self) -> Vec<EnhancementRecord> {
        let raw = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::error!("Failed to read history: {}", e);
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("Error parsing saved history: {}", e);
            Vec::new()
        })
    }

    /// Overwrite the persisted collection with the in-memory one.
    pub fn save(&mut self) -> crate::error::Result<()> {
        let body = serde_json::to_string(&self.records)?;
        self.store.set(HISTORY_KEY, body)
    }

    /// Prepend `record` and persist.
    pub fn append(&mut self, record: EnhancementRecord) -> crate::error::Result<()> {
        if self.records.iter().any(|r| r.id == record.id) {
            return Err(AppError::InvalidInput(format!(
                "Duplicate history id: {}",
                record.id
            )));
        }
        self.records.insert(0, record); // newest first
        self.save()
    }

    /// Delete a record by id and persist. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> crate::error::Result<bool> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() != before;
        self.save()?;
        Ok(removed)
    }

    pub fn clear(&mut self) -> crate::error::Result<()> {
        self.records.clear();
        self.save()
    }

    pub fn records(&self) -> &[EnhancementRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&EnhancementRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Gallery stepping with wrap-around.
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        let len = self.records.len();
        if len == 0 {
            return None;
        }
        let index = index % len;
        Some(match direction {
            Direction::Next => (index + 1) % len,
            Direction::Prev => (index + len - 1) % len,
        })
    }
}
