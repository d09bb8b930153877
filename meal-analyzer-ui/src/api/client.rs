//! HTTP API Client
//!
//! Functions for communicating with the meal analyzer REST API.

use gloo_net::http::Request;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8082";

/// User id used until one is chosen
pub const DEFAULT_USER_ID: &str = "anonymous";

const API_URL_KEY: &str = "meal_analyzer_api_url";
const USER_ID_KEY: &str = "meal_analyzer_user_id";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn stored(key: &str) -> Option<String> {
    local_storage()?
        .get_item(key)
        .ok()?
        .filter(|v| !v.trim().is_empty())
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    normalize_base(&stored(API_URL_KEY).unwrap_or_else(|| DEFAULT_API_BASE.to_string()))
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(API_URL_KEY, url);
    }
}

/// Get the user id from local storage or use default
pub fn get_user_id() -> String {
    stored(USER_ID_KEY).unwrap_or_else(|| DEFAULT_USER_ID.to_string())
}

/// Check a user id against the server's rule: 1 to 128 characters from
/// `A-Z a-z 0-9 - _ .`, and not `.` or `..`
pub fn validate_user_id(user_id: &str) -> Result<(), String> {
    if user_id.is_empty() || user_id.len() > 128 {
        return Err("User ID must be 1 to 128 characters long.".to_string());
    }
    if user_id == "." || user_id == ".." {
        return Err("User ID cannot be \".\" or \"..\".".to_string());
    }
    if !user_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err("User ID may only contain letters, digits, '-', '_' and '.'.".to_string());
    }
    Ok(())
}

/// Remember the user id in local storage
pub fn set_user_id(user_id: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(USER_ID_KEY, user_id);
    }
}

/// Strip trailing slashes
pub fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// URL of a user's history
pub fn history_url(api_base: &str, user_id: &str) -> String {
    format!("{}/meal-history/{}", api_base, encode_path_segment(user_id))
}

fn encode_path_segment(segment: &str) -> String {
    segment
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}

// ============ Response Types ============

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest<'a> {
    image: &'a str,
    user_id: &'a str,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub image_id: String,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub timestamp: String,
    pub feedback: String,
    #[serde(default)]
    pub image_base64: String,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryResponse {
    #[serde(default)]
    history_items: Vec<HistoryItem>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    pub error: String,
    #[serde(default)]
    pub code: Option<String>,
}

async fn error_message(response: gloo_net::http::Response) -> String {
    let status = response.status();
    response
        .json::<ApiError>()
        .await
        .map(|e| e.error)
        .unwrap_or_else(|_| format!("Request failed with status {}", status))
}

// ============ API Functions ============

/// Submit a meal photo (as a data URL) for analysis
pub async fn analyze_meal(image_data_url: &str, user_id: &str) -> Result<AnalyzeResponse, String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/analyze-meal", api_base))
        .json(&AnalyzeRequest {
            image: image_data_url,
            user_id,
        })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch a user's meal history, newest first
pub async fn fetch_history(user_id: &str) -> Result<Vec<HistoryItem>, String> {
    let url = history_url(&get_api_base(), user_id);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    let result: HistoryResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.history_items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://localhost:8082/"), "http://localhost:8082");
        assert_eq!(normalize_base(" https://api.example.com// "), "https://api.example.com");
    }

    #[test]
    fn test_validate_user_id() {
        assert!(validate_user_id("alice").is_ok());
        assert!(validate_user_id("user.name-1_x").is_ok());
        assert!(validate_user_id(DEFAULT_USER_ID).is_ok());
        assert!(validate_user_id(&"a".repeat(128)).is_ok());

        assert!(validate_user_id("").is_err());
        assert!(validate_user_id(&"a".repeat(129)).is_err());
        assert!(validate_user_id("..").is_err());
        assert!(validate_user_id("a b").is_err());
        assert!(validate_user_id("a/b").is_err());
        assert!(validate_user_id("émile").is_err());
    }

    #[test]
    fn test_history_url_encodes_user() {
        assert_eq!(
            history_url("http://localhost:8082", "alice"),
            "http://localhost:8082/meal-history/alice"
        );
        assert_eq!(
            history_url("http://h", "a b/c"),
            "http://h/meal-history/a%20b%2Fc"
        );
    }

    #[test]
    fn test_history_response_parses() {
        let json = r#"{
            "success": true,
            "userId": "alice",
            "historyItems": [
                {"id": "1", "timestamp": "2024-01-01T00:00:00.000000Z", "feedback": "ok", "imageBase64": "data:image/png;base64,AA=="}
            ]
        }"#;
        let parsed: HistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.history_items.len(), 1);
        assert_eq!(parsed.history_items[0].image_base64, "data:image/png;base64,AA==");
    }

    #[test]
    fn test_analyze_request_shape() {
        let body = serde_json::to_value(AnalyzeRequest {
            image: "data:image/png;base64,AA==",
            user_id: "anonymous",
        })
        .unwrap();
        assert_eq!(body["userId"], "anonymous");
        assert_eq!(body["image"], "data:image/png;base64,AA==");
    }
}
