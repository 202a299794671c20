use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    pub fn entry_not_found(id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity_type: "Entry",
            id: id.to_string(),
        }
    }

    pub fn entry_exists(id: impl ToString) -> Self {
        RepositoryError::AlreadyExists {
            entity_type: "Entry",
            id: id.to_string(),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::entry_not_found("abc-123");
        assert_eq!(error.to_string(), "Entry not found: abc-123");
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::entry_exists("abc-123");
        assert_eq!(error.to_string(), "Entry already exists: abc-123");
    }

    #[test]
    fn test_repository_error_from_serde_json() {
        let err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let error = RepositoryError::from(err);
        assert!(matches!(error, RepositoryError::Serialization(_)));
        assert!(error.to_string().starts_with("Serialization error: "));
    }

    #[test]
    fn test_repository_error_invalid_data_display() {
        let error = RepositoryError::InvalidData("end before start".to_string());
        assert_eq!(error.to_string(), "Invalid data: end before start");
    }
}
