//! # Healthy Meal Analyzer
//!
//! Backend for the Healthy Meal Analyzer web client. Accepts a photo of a
//! meal, asks a vision model for a nutritional assessment, and keeps every
//! assessment in a per-user history.
//!
//! ## Modules
//!
//! - [`meal`]: Image payload parsing (`data:image/...;base64,...` URLs)
//! - [`analysis`]: The [`MealAnalyzer`] trait and its HTTP vision client
//! - [`storage`]: On-disk feedback store keyed by user and image id
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML + environment configuration
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use meal_analyzer::storage::{FeedbackRecord, FeedbackStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FeedbackStore::open("./meal_data").await?;
//!
//!     let record = FeedbackRecord::new(
//!         "alice",
//!         "data:image/png;base64,iVBORw0KGgo=",
//!         "Balanced plate, add more greens.",
//!     );
//!     store.save(&record).await?;
//!
//!     for item in store.history("alice").await? {
//!         println!("{} {}", item.timestamp, item.feedback);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod config;
pub mod logging;
pub mod meal;
pub mod storage;

pub use analysis::{AnalysisError, AnalysisResult, MealAnalyzer, VisionClient, VisionConfig};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use meal::{ImageError, ImagePayload};

pub use storage::{FeedbackRecord, FeedbackStore, HistoryItem, StorageError, StorageResult};

pub use config::{
    AnalyzerConfig, ApiConfig as ConfigApiConfig, Config, ConfigError, LoggingConfig,
    StorageConfig,
};
