//! Analyze Routes
//!
//! - POST /analyze-meal - Analyze a meal photo and record the feedback

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{AnalyzeRequest, AnalyzeResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::meal::ImagePayload;
use crate::storage::{validate_user_id, FeedbackRecord, DEFAULT_USER_ID};

/// POST /analyze-meal
///
/// Validates the image, asks the analyzer for feedback, then stores the
/// image together with the feedback under the user's history.
pub async fn analyze_meal(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let Json(req) = payload?;

    let user_id = req
        .user_id
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string());
    validate_user_id(&user_id)?;

    let data_url = req
        .image
        .ok_or_else(|| ApiError::Validation("image is required".to_string()))?;

    tracing::info!(user_id = %user_id, data_len = data_url.len(), "Processing meal analysis request");

    let image = ImagePayload::parse(&data_url)?;

    let analyzer = state.analyzer.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable("meal analyzer not configured".to_string())
    })?;

    let feedback = analyzer.analyze(&image).await?;

    let record = FeedbackRecord::new(user_id, data_url, feedback);
    state.store.save(&record).await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        image_id: record.image_id,
        feedback: record.feedback,
    }))
}
