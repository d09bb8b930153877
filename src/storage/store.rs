//! Directory-backed feedback store
//!
//! One directory per user, one `<image_id>_feedback.json` file per
//! analyzed meal. Writes go to a temp file first and are renamed into
//! place so readers never see a half-written record.

use std::path::{Path, PathBuf};
use tokio::fs;

use super::error::{StorageError, StorageResult};
use super::types::{validate_image_id, validate_user_id, FeedbackRecord, HistoryItem};

/// File name suffix of a stored record
pub const FEEDBACK_SUFFIX: &str = "_feedback.json";

/// Feedback store rooted at a data directory
#[derive(Debug, Clone)]
pub struct FeedbackStore {
    root: PathBuf,
}

impl FeedbackStore {
    /// Open (and create if needed) a store at `root`
    pub async fn open(root: impl AsRef<Path>) -> StorageResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        tracing::debug!(root = ?root, "Feedback store opened");
        Ok(Self { root })
    }

    /// Root data directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn user_dir(&self, user_id: &str) -> PathBuf {
        self.root.join(user_id)
    }

    fn record_path(&self, user_id: &str, image_id: &str) -> PathBuf {
        self.user_dir(user_id)
            .join(format!("{}{}", image_id, FEEDBACK_SUFFIX))
    }

    /// Persist a record
    pub async fn save(&self, record: &FeedbackRecord) -> StorageResult<PathBuf> {
        validate_user_id(&record.user_id)?;
        validate_image_id(&record.image_id)?;

        let dir = self.user_dir(&record.user_id);
        fs::create_dir_all(&dir).await?;

        let path = self.record_path(&record.user_id, &record.image_id);
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec(record)?;

        fs::write(&tmp, &body).await?;
        fs::rename(&tmp, &path).await?;

        tracing::info!(
            user_id = %record.user_id,
            image_id = %record.image_id,
            bytes = body.len(),
            "Saved meal feedback"
        );
        Ok(path)
    }

    /// Load a single record
    pub async fn get(&self, user_id: &str, image_id: &str) -> StorageResult<FeedbackRecord> {
        validate_user_id(user_id)?;
        validate_image_id(image_id)?;

        let path = self.record_path(user_id, image_id);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound {
                    user_id: user_id.to_string(),
                    image_id: image_id.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// All history items for a user, newest first
    ///
    /// Equal timestamps are ordered by image id. A user without any
    /// records gets an empty list. Files that cannot be
    /// read or parsed are skipped.
    pub async fn history(&self, user_id: &str) -> StorageResult<Vec<HistoryItem>> {
        validate_user_id(user_id)?;

        let dir = self.user_dir(user_id);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut items = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_record = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.ends_with(FEEDBACK_SUFFIX))
                .unwrap_or(false);
            if !is_record {
                continue;
            }

            match read_record(&path).await {
                Ok(record) => items.push(HistoryItem::from(record)),
                Err(e) => {
                    tracing::warn!(path = ?path, error = %e, "Skipping unreadable feedback file");
                }
            }
        }

        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));

        tracing::debug!(user_id = %user_id, count = items.len(), "Loaded meal history");
        Ok(items)
    }

    /// Check that the data directory exists and accepts writes
    pub async fn is_writable(&self) -> bool {
        let probe = self.root.join(".health_probe");
        match fs::write(&probe, b"ok").await {
            Ok(()) => {
                let _ = fs::remove_file(&probe).await;
                true
            }
            Err(e) => {
                tracing::warn!(root = ?self.root, error = %e, "Feedback store not writable");
                false
            }
        }
    }
}

async fn read_record(path: &Path) -> StorageResult<FeedbackRecord> {
    let bytes = fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(user: &str, ts: &str, feedback: &str) -> FeedbackRecord {
        FeedbackRecord::new(user, "data:image/png;base64,AA==", feedback).timestamp(ts)
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let dir = tempdir().unwrap();
        let store = FeedbackStore::open(dir.path()).await.unwrap();

        let rec = record("alice", "2024-01-01T00:00:00.000000Z", "Nice salad");
        let path = store.save(&rec).await.unwrap();

        assert!(path.starts_with(store.root()));
        assert!(path.ends_with(format!("alice/{}_feedback.json", rec.image_id)));

        let loaded = store.get("alice", &rec.image_id).await.unwrap();
        assert_eq!(loaded, rec);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let dir = tempdir().unwrap();
        let store = FeedbackStore::open(dir.path()).await.unwrap();

        let err = store
            .get("alice", "00000000-0000-0000-0000-000000000000")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_history_newest_first() {
        let dir = tempdir().unwrap();
        let store = FeedbackStore::open(dir.path()).await.unwrap();

        store
            .save(&record("alice", "2024-01-01T08:00:00.000000Z", "breakfast"))
            .await
            .unwrap();
        store
            .save(&record("alice", "2024-01-01T19:00:00.000000Z", "dinner"))
            .await
            .unwrap();
        store
            .save(&record("alice", "2024-01-01T12:30:00.000000Z", "lunch"))
            .await
            .unwrap();

        let items = store.history("alice").await.unwrap();
        let order: Vec<_> = items.iter().map(|i| i.feedback.as_str()).collect();
        assert_eq!(order, vec!["dinner", "lunch", "breakfast"]);
    }

    #[tokio::test]
    async fn test_history_equal_timestamps_ordered_by_id() {
        let dir = tempdir().unwrap();
        let store = FeedbackStore::open(dir.path()).await.unwrap();

        for id in ["cccc", "aaaa", "bbbb"] {
            let mut rec = record("alice", "2024-01-01T08:00:00.000000Z", id);
            rec.image_id = id.to_string();
            store.save(&rec).await.unwrap();
        }
        let mut later = record("alice", "2024-01-02T08:00:00.000000Z", "later");
        later.image_id = "zzzz".to_string();
        store.save(&later).await.unwrap();

        for _ in 0..3 {
            let ids: Vec<_> = store
                .history("alice")
                .await
                .unwrap()
                .into_iter()
                .map(|i| i.id)
                .collect();
            assert_eq!(ids, vec!["zzzz", "aaaa", "bbbb", "cccc"]);
        }
    }

    #[tokio::test]
    async fn test_history_is_per_user() {
        let dir = tempdir().unwrap();
        let store = FeedbackStore::open(dir.path()).await.unwrap();

        store
            .save(&record("alice", "2024-01-01T08:00:00.000000Z", "a"))
            .await
            .unwrap();
        store
            .save(&record("bob", "2024-01-01T09:00:00.000000Z", "b"))
            .await
            .unwrap();

        let items = store.history("bob").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].feedback, "b");
    }

    #[tokio::test]
    async fn test_history_unknown_user_is_empty() {
        let dir = tempdir().unwrap();
        let store = FeedbackStore::open(dir.path()).await.unwrap();

        assert!(store.history("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_skips_foreign_and_corrupt_files() {
        let dir = tempdir().unwrap();
        let store = FeedbackStore::open(dir.path()).await.unwrap();

        store
            .save(&record("alice", "2024-01-01T08:00:00.000000Z", "kept"))
            .await
            .unwrap();

        let user_dir = dir.path().join("alice");
        std::fs::write(user_dir.join("notes.txt"), "ignored").unwrap();
        std::fs::write(user_dir.join("photo.jpg"), [0xFF, 0xD8]).unwrap();
        std::fs::write(user_dir.join("broken_feedback.json"), "{not json").unwrap();

        let items = store.history("alice").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].feedback, "kept");
    }

    #[tokio::test]
    async fn test_rejects_traversal_user_id() {
        let dir = tempdir().unwrap();
        let store = FeedbackStore::open(dir.path()).await.unwrap();

        let err = store.history("..").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidUserId(_)));

        let rec = record("../escape", "2024-01-01T00:00:00.000000Z", "x");
        assert!(store.save(&rec).await.is_err());
    }

    #[tokio::test]
    async fn test_is_writable() {
        let dir = tempdir().unwrap();
        let store = FeedbackStore::open(dir.path()).await.unwrap();
        assert!(store.is_writable().await);
    }
}
