mod error;
mod inmemory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use inmemory::InMemoryRepository;
pub use traits::EntryRepository;
pub use types::StoredEntry;
