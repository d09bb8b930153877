//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::analysis::MealAnalyzer;
use crate::storage::FeedbackStore;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Per-user feedback history
    pub store: Arc<FeedbackStore>,
    /// Meal analyzer (absent when no API key is configured)
    pub analyzer: Option<Arc<dyn MealAnalyzer>>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState without an analyzer
    pub fn new(store: Arc<FeedbackStore>, config: ApiConfig) -> Self {
        Self {
            store,
            analyzer: None,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Create AppState with an analyzer
    pub fn with_analyzer(
        store: Arc<FeedbackStore>,
        config: ApiConfig,
        analyzer: Arc<dyn MealAnalyzer>,
    ) -> Self {
        Self {
            analyzer: Some(analyzer),
            ..Self::new(store, config)
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Check if meal analysis is available
    pub fn has_analyzer(&self) -> bool {
        self.analyzer.is_some()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8082,
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl From<&crate::config::ApiConfig> for ApiConfig {
    fn from(config: &crate::config::ApiConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            max_body_size: config.max_body_size,
        }
    }
}
