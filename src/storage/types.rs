//! Core data types for the feedback store
//!
//! - `FeedbackRecord`: Everything kept for one analyzed meal
//! - `HistoryItem`: The projection returned to the history page

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::error::{StorageError, StorageResult};

/// User id used when a client does not send one
pub const DEFAULT_USER_ID: &str = "anonymous";

const MAX_USER_ID_LEN: usize = 128;

/// One analyzed meal, as written to disk
///
/// Field names are camelCase on disk and on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub user_id: String,
    pub image_id: String,
    /// The submitted `data:image/...` URL, kept verbatim
    pub image_base64: String,
    /// RFC 3339, UTC, microsecond precision
    pub timestamp: String,
    pub feedback: String,
}

impl FeedbackRecord {
    /// Create a record with a fresh image id and the current time
    pub fn new(
        user_id: impl Into<String>,
        image_base64: impl Into<String>,
        feedback: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            image_id: uuid::Uuid::new_v4().to_string(),
            image_base64: image_base64.into(),
            timestamp: now_timestamp(),
            feedback: feedback.into(),
        }
    }

    /// Builder method: set timestamp
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }
}

/// A history entry as listed for a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub timestamp: String,
    pub feedback: String,
    pub image_base64: String,
}

impl From<FeedbackRecord> for HistoryItem {
    fn from(record: FeedbackRecord) -> Self {
        Self {
            id: record.image_id,
            timestamp: record.timestamp,
            feedback: record.feedback,
            image_base64: record.image_base64,
        }
    }
}

/// Current time in the store's timestamp format
///
/// Fixed width and always `Z`, so lexical order is chronological order.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Check that a user id is safe to use as a directory name
pub fn validate_user_id(user_id: &str) -> StorageResult<()> {
    let valid = !user_id.is_empty()
        && user_id.len() <= MAX_USER_ID_LEN
        && user_id != "."
        && user_id != ".."
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidUserId(user_id.to_string()))
    }
}

pub(crate) fn validate_image_id(image_id: &str) -> StorageResult<()> {
    let valid = !image_id.is_empty()
        && image_id.len() <= MAX_USER_ID_LEN
        && image_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidImageId(image_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_camel_case() {
        let record = FeedbackRecord::new("alice", "data:image/png;base64,AA==", "Good")
            .timestamp("2024-05-01T12:00:00.000000Z");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["userId"], "alice");
        assert_eq!(json["imageBase64"], "data:image/png;base64,AA==");
        assert_eq!(json["timestamp"], "2024-05-01T12:00:00.000000Z");
        assert!(json["imageId"].as_str().unwrap().len() == 36);
    }

    #[test]
    fn test_history_item_from_record() {
        let record = FeedbackRecord::new("bob", "data:image/jpeg;base64,/9j/", "Add fiber");
        let image_id = record.image_id.clone();
        let item = HistoryItem::from(record);

        assert_eq!(item.id, image_id);
        assert_eq!(item.feedback, "Add fiber");
        assert_eq!(item.image_base64, "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn test_timestamps_order_lexically() {
        let a = now_timestamp();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = now_timestamp();
        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }

    #[test]
    fn test_validate_user_id() {
        assert!(validate_user_id("anonymous").is_ok());
        assert!(validate_user_id("user-42_a.b").is_ok());

        assert!(validate_user_id("").is_err());
        assert!(validate_user_id(".").is_err());
        assert!(validate_user_id("..").is_err());
        assert!(validate_user_id("a/b").is_err());
        assert!(validate_user_id("a\\b").is_err());
        assert!(validate_user_id(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_image_id() {
        assert!(validate_image_id("0b5e2c1a-1111-4a4a-8b8b-123456789abc").is_ok());
        assert!(validate_image_id("../x").is_err());
        assert!(validate_image_id("").is_err());
    }
}
