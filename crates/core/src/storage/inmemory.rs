//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::calendar::Entry;

use super::{EntryRepository, RepositoryError, Result, StoredEntry};

/// In-memory storage backend for tests and demos.
///
/// Data is not persisted and is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<RwLock<HashMap<Uuid, StoredEntry>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository pre-filled with `entries` owned by `user_id`.
    pub fn with_entries(user_id: Uuid, entries: impl IntoIterator<Item = Entry>) -> Self {
        let map = entries
            .into_iter()
            .map(|entry| (entry.id, StoredEntry::new(user_id, entry)))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl EntryRepository for InMemoryRepository {
    async fn get_entry(&self, id: Uuid) -> Result<Option<Entry>> {
        let entries = self.entries.read().await;
        Ok(entries.get(&id).map(|stored| stored.entry.clone()))
    }

    async fn list_entries(&self, user_id: Uuid) -> Result<Vec<Entry>> {
        let entries = self.entries.read().await;
        let mut owned: Vec<Entry> = entries
            .values()
            .filter(|stored| stored.user_id == user_id)
            .map(|stored| stored.entry.clone())
            .collect();
        owned.sort_by_key(|entry| entry.start);
        Ok(owned)
    }

    async fn create_entry(&self, user_id: Uuid, entry: &Entry) -> Result<()> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&entry.id) {
            return Err(RepositoryError::entry_exists(entry.id));
        }
        entries.insert(entry.id, StoredEntry::new(user_id, entry.clone()));
        Ok(())
    }

    async fn update_entry(&self, user_id: Uuid, entry: &Entry) -> Result<()> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(&entry.id) {
            Some(stored) if stored.user_id == user_id => {
                stored.entry = entry.clone();
                Ok(())
            }
            _ => Err(RepositoryError::entry_not_found(entry.id)),
        }
    }

    async fn delete_entry(&self, id: Uuid) -> Result<()> {
        let mut entries = self.entries.write().await;
        if entries.remove(&id).is_none() {
            return Err(RepositoryError::entry_not_found(id));
        }
        Ok(())
    }
}
