//! JSON-file repository implementation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use homefront_core::calendar::Entry;
use homefront_core::storage::{EntryRepository, RepositoryError, Result, StoredEntry};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Stores entries as a JSON array of `{ "user_id", "entry" }` rows.
///
/// The whole file is read for every call and rewritten on every change.
/// A missing file reads as an empty repository.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<StoredEntry>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    path = %self.path.display(),
                    "entries file missing, starting empty"
                );
                return Ok(Vec::new());
            }
            Err(err) => return Err(io_error(&self.path, err)),
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<StoredEntry> = serde_json::from_str(&contents)?;
        tracing::debug!(path = %self.path.display(), rows = rows.len(), "loaded entries file");
        Ok(rows)
    }

    async fn save(&self, rows: &[StoredEntry]) -> Result<()> {
        let contents = serde_json::to_string_pretty(rows)?;
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|err| io_error(&self.path, err))
    }
}

fn io_error(path: &Path, err: std::io::Error) -> RepositoryError {
    RepositoryError::QueryFailed(format!("{}: {}", path.display(), err))
}

#[async_trait]
impl EntryRepository for JsonFileRepository {
    async fn get_entry(&self, id: Uuid) -> Result<Option<Entry>> {
        let rows = self.load().await?;
        Ok(rows
            .into_iter()
            .find(|row| row.entry.id == id)
            .map(|row| row.entry))
    }

    async fn list_entries(&self, user_id: Uuid) -> Result<Vec<Entry>> {
        let mut entries: Vec<Entry> = self
            .load()
            .await?
            .into_iter()
            .filter(|row| row.user_id == user_id)
            .map(|row| row.entry)
            .collect();
        entries.sort_by_key(|entry| entry.start);
        Ok(entries)
    }

    async fn create_entry(&self, user_id: Uuid, entry: &Entry) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut rows = self.load().await?;
        if rows.iter().any(|row| row.entry.id == entry.id) {
            return Err(RepositoryError::entry_exists(entry.id));
        }
        rows.push(StoredEntry::new(user_id, entry.clone()));
        self.save(&rows).await
    }

    async fn update_entry(&self, user_id: Uuid, entry: &Entry) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut rows = self.load().await?;
        let row = rows
            .iter_mut()
            .find(|row| row.entry.id == entry.id && row.user_id == user_id)
            .ok_or_else(|| RepositoryError::entry_not_found(entry.id))?;
        row.entry = entry.clone();
        self.save(&rows).await
    }

    async fn delete_entry(&self, id: Uuid) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut rows = self.load().await?;
        let before = rows.len();
        rows.retain(|row| row.entry.id != id);
        if rows.len() == before {
            return Err(RepositoryError::entry_not_found(id));
        }
        self.save(&rows).await
    }
}
