use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::Entry;

/// A stored entry together with the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub user_id: Uuid,
    pub entry: Entry,
}

impl StoredEntry {
    pub fn new(user_id: Uuid, entry: Entry) -> Self {
        Self { user_id, entry }
    }
}
