//! Feedback Storage
//!
//! Keeps every meal assessment on disk, one JSON document per image:
//!
//! - **types**: `FeedbackRecord`, `HistoryItem`, user id rules
//! - **store**: `FeedbackStore`, the directory-backed store
//! - **error**: Error types
//!
//! # Layout
//!
//! ```text
//! <data_dir>/
//!   <user_id>/
//!     <image_id>_feedback.json
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use meal_analyzer::storage::{FeedbackRecord, FeedbackStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FeedbackStore::open("./meal_data").await?;
//!     store
//!         .save(&FeedbackRecord::new("anonymous", "data:image/png;base64,AA==", "Looks balanced."))
//!         .await?;
//!
//!     let items = store.history("anonymous").await?;
//!     assert_eq!(items.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod store;
pub mod types;

pub use error::{StorageError, StorageResult};
pub use store::{FeedbackStore, FEEDBACK_SUFFIX};
pub use types::{validate_user_id, FeedbackRecord, HistoryItem, DEFAULT_USER_ID};
