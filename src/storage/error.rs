//! Storage error types
//!
//! Defines all errors that can occur in the feedback store.

use thiserror::Error;

/// Errors that can occur in the feedback store
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// User id is empty, too long, or contains path characters
    #[error("Invalid user id: {0}")]
    InvalidUserId(String),

    /// Image id is not a plain identifier
    #[error("Invalid image id: {0}")]
    InvalidImageId(String),

    /// Requested record does not exist
    #[error("Feedback not found: {user_id}/{image_id}")]
    NotFound { user_id: String, image_id: String },
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::InvalidUserId("../etc".to_string());
        assert_eq!(err.to_string(), "Invalid user id: ../etc");

        let err = StorageError::NotFound {
            user_id: "alice".to_string(),
            image_id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Feedback not found: alice/abc");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let storage_err: StorageError = io_err.into();
        assert!(matches!(storage_err, StorageError::Io(_)));
    }
}
