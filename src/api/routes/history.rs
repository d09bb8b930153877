//! History Routes
//!
//! - GET /meal-history - History of the anonymous user
//! - GET /meal-history/:user_id - History of one user, newest first
//! - GET /meal-history/:user_id/:image_id - A single entry

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{HistoryItemResponse, HistoryResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::storage::{HistoryItem, DEFAULT_USER_ID};

/// GET /meal-history/:user_id
pub async fn get_user_history(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<HistoryResponse>> {
    load_history(&state, user_id).await
}

/// GET /meal-history
pub async fn get_default_history(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<HistoryResponse>> {
    load_history(&state, DEFAULT_USER_ID.to_string()).await
}

/// GET /meal-history/:user_id/:image_id
pub async fn get_history_item(
    State(state): State<Arc<AppState>>,
    Path((user_id, image_id)): Path<(String, String)>,
) -> ApiResult<Json<HistoryItemResponse>> {
    let record = state.store.get(&user_id, &image_id).await?;

    Ok(Json(HistoryItemResponse {
        success: true,
        item: HistoryItem::from(record),
    }))
}

async fn load_history(state: &AppState, user_id: String) -> ApiResult<Json<HistoryResponse>> {
    tracing::info!(user_id = %user_id, "Fetching meal history");

    let history_items = state.store.history(&user_id).await?;

    Ok(Json(HistoryResponse {
        success: true,
        user_id,
        history_items,
    }))
}
