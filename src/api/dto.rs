//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! Field names are camelCase on the wire to match the web client.

use serde::{Deserialize, Serialize};

use crate::storage::HistoryItem;

// ============================================
// ANALYZE DTOs
// ============================================

/// Meal analysis request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// `data:image/...;base64,...` URL
    #[serde(default)]
    pub image: Option<String>,
    /// Owner of the history entry, defaults to "anonymous"
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Meal analysis response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub image_id: String,
    pub feedback: String,
}

// ============================================
// HISTORY DTOs
// ============================================

/// A user's history, newest first
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub success: bool,
    pub user_id: String,
    pub history_items: Vec<HistoryItem>,
}

/// A single history entry
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItemResponse {
    pub success: bool,
    pub item: HistoryItem,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded, unhealthy
    pub status: String,
    /// Feedback store status
    pub storage: String,
    /// Analyzer status: the model name, or "disabled"
    pub analyzer: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_request_camel_case() {
        let req: AnalyzeRequest =
            serde_json::from_str(r#"{"image": "data:image/png;base64,AA==", "userId": "alice"}"#)
                .unwrap();
        assert_eq!(req.user_id.as_deref(), Some("alice"));
        assert!(req.image.is_some());

        let req: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert!(req.image.is_none());
        assert!(req.user_id.is_none());
    }

    #[test]
    fn test_history_response_shape() {
        let resp = HistoryResponse {
            success: true,
            user_id: "alice".to_string(),
            history_items: vec![HistoryItem {
                id: "1".to_string(),
                timestamp: "2024-01-01T00:00:00.000000Z".to_string(),
                feedback: "ok".to_string(),
                image_base64: "data:image/png;base64,AA==".to_string(),
            }],
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["userId"], "alice");
        assert_eq!(json["historyItems"][0]["imageBase64"], "data:image/png;base64,AA==");
    }
}
