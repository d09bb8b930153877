//! Meal Analysis
//!
//! Turns a meal photo into a written nutritional assessment.
//!
//! ## Architecture
//!
//! - **MealAnalyzer**: The seam the API depends on
//! - **VisionClient**: Implementation over a vision-capable Messages API
//!
//! ## Data Flow
//!
//! 1. The API validates the submitted data URL into an `ImagePayload`
//! 2. The analyzer sends the image plus the analysis prompt upstream
//! 3. The first text block of the reply becomes the stored feedback

mod client;
mod prompt;

pub use client::{VisionClient, VisionConfig};
pub use prompt::ANALYSIS_PROMPT;

use async_trait::async_trait;
use thiserror::Error;

use crate::meal::ImagePayload;

/// Something that can assess a meal photo
#[async_trait]
pub trait MealAnalyzer: Send + Sync {
    /// Produce feedback text for one image
    async fn analyze(&self, image: &ImagePayload) -> AnalysisResult<String>;

    /// Identifier shown in health output and logs
    fn name(&self) -> &str;
}

/// Errors that can occur while analyzing a meal
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Analyzer unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Rate limited")]
    RateLimited,

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Invalid analyzer configuration: {0}")]
    Config(String),
}

/// Result type alias for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
