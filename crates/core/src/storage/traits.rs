use async_trait::async_trait;
use uuid::Uuid;

use crate::calendar::Entry;

use super::Result;

/// Repository for entry definitions.
///
/// Entries are stored as definitions; expansion into occurrences happens
/// after loading.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Gets an entry by its ID.
    async fn get_entry(&self, id: Uuid) -> Result<Option<Entry>>;

    /// Gets all entries belonging to a user, ordered by start.
    async fn list_entries(&self, user_id: Uuid) -> Result<Vec<Entry>>;

    /// Creates a new entry for a user.
    async fn create_entry(&self, user_id: Uuid, entry: &Entry) -> Result<()>;

    /// Updates an existing entry.
    async fn update_entry(&self, user_id: Uuid, entry: &Entry) -> Result<()>;

    /// Deletes an entry by its ID.
    async fn delete_entry(&self, id: Uuid) -> Result<()>;
}
