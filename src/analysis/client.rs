//! Vision Messages API Client
//!
//! HTTP client that sends a meal photo and the analysis prompt to a
//! vision-capable Messages API and returns the reply text.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{AnalysisError, AnalysisResult, MealAnalyzer, ANALYSIS_PROMPT};
use crate::meal::ImagePayload;

const API_VERSION: &str = "2023-06-01";

/// Configuration for the vision client
#[derive(Debug, Clone)]
pub struct VisionConfig {
    /// Base URL, e.g. "https://api.anthropic.com/v1"
    pub base_url: String,
    /// API key sent as `x-api-key`
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// Upper bound on reply length
    pub max_tokens: u32,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Maximum attempts for retryable failures
    pub max_retries: u32,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com/v1".to_string(),
            api_key: String::new(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            max_tokens: 1500,
            connect_timeout_secs: 5,
            request_timeout_secs: 50,
            max_retries: 2,
        }
    }
}

/// Meal analyzer backed by a Messages API
pub struct VisionClient {
    client: Client,
    config: VisionConfig,
}

impl VisionClient {
    /// Create a new client with the given configuration
    pub fn new(config: VisionConfig) -> AnalysisResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AnalysisError::Config("api key is empty".to_string()));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AnalysisError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn messages_url(&self) -> String {
        format!("{}/messages", self.config.base_url.trim_end_matches('/'))
    }

    fn build_request<'a>(&'a self, image: &'a ImagePayload) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: vec![RequestMessage {
                role: "user",
                content: vec![
                    ContentBlock::Image {
                        source: ImageSource {
                            source_type: "base64",
                            media_type: image.media_type(),
                            data: image.base64_body(),
                        },
                    },
                    ContentBlock::Text {
                        text: ANALYSIS_PROMPT,
                    },
                ],
            }],
        }
    }

    /// Send the request with retry logic
    async fn send(&self, body: &MessagesRequest<'_>) -> AnalysisResult<MessagesResponse> {
        let url = self.messages_url();
        let attempts = self.config.max_retries.max(1);
        let mut last_error = AnalysisError::Unavailable;
        let mut next_delay: Option<Duration> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                // Backoff: 1s, 4s, 9s... unless the server asked for a wait
                let delay = next_delay
                    .take()
                    .unwrap_or_else(|| Duration::from_secs((attempt as u64).pow(2)));
                tokio::time::sleep(delay).await;
            }

            let result = self
                .client
                .post(&url)
                .header("x-api-key", &self.config.api_key)
                .header("anthropic-version", API_VERSION)
                .json(body)
                .send()
                .await;

            match result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.json().await.map_err(AnalysisError::Request);
                    } else if status.as_u16() == 429 {
                        next_delay = retry_after(response.headers()).map(|wait| {
                            wait.min(Duration::from_secs(self.config.request_timeout_secs))
                        });
                        tracing::warn!(attempt, ?next_delay, "Vision API rate limited");
                        last_error = AnalysisError::RateLimited;
                        continue;
                    } else {
                        let text = response.text().await.unwrap_or_default();
                        return Err(AnalysisError::Api {
                            status: status.as_u16(),
                            message: text,
                        });
                    }
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Vision API request failed");
                    last_error = if e.is_timeout() {
                        AnalysisError::Timeout
                    } else if e.is_connect() {
                        AnalysisError::Unavailable
                    } else {
                        AnalysisError::Request(e)
                    };
                    continue;
                }
            }
        }

        Err(last_error)
    }
}

/// `Retry-After` in delta-seconds form
///
/// The HTTP-date form is not parsed; those replies use the normal backoff.
fn retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[async_trait]
impl MealAnalyzer for VisionClient {
    async fn analyze(&self, image: &ImagePayload) -> AnalysisResult<String> {
        tracing::info!(
            model = %self.config.model,
            media_type = %image.media_type(),
            image_bytes = image.decoded_len(),
            "Sending meal image for analysis"
        );

        let request = self.build_request(image);
        let response = self.send(&request).await?;
        response.into_text()
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock<'a> {
    Image { source: ImageSource<'a> },
    Text { text: &'a str },
}

#[derive(Debug, Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    source_type: &'a str,
    media_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
    /// Older text-completion style replies
    #[serde(default)]
    completion: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseBlock {
    #[serde(rename = "type", default)]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

impl MessagesResponse {
    fn into_text(self) -> AnalysisResult<String> {
        let from_blocks = self
            .content
            .into_iter()
            .filter(|b| b.block_type == "text" || b.block_type.is_empty())
            .find_map(|b| b.text);

        from_blocks
            .or(self.completion)
            .filter(|t| !t.trim().is_empty())
            .ok_or(AnalysisError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn payload() -> ImagePayload {
        ImagePayload::from_bytes("image/png", &[0x89, 0x50, 0x4E, 0x47]).unwrap()
    }

    fn config_for(base_url: String) -> VisionConfig {
        VisionConfig {
            base_url,
            api_key: "test-key".to_string(),
            max_retries: 2,
            request_timeout_secs: 5,
            ..Default::default()
        }
    }

    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_default_config() {
        let config = VisionConfig::default();
        assert_eq!(config.max_tokens, 1500);
        assert_eq!(config.connect_timeout_secs, 5);
        assert_eq!(config.request_timeout_secs, 50);
    }

    #[test]
    fn test_new_requires_api_key() {
        let result = VisionClient::new(VisionConfig::default());
        assert!(matches!(result, Err(AnalysisError::Config(_))));
    }

    #[test]
    fn test_request_shape() {
        let client = VisionClient::new(config_for("http://localhost:1/".to_string())).unwrap();
        let image = payload();
        let json = serde_json::to_value(client.build_request(&image)).unwrap();

        assert_eq!(client.messages_url(), "http://localhost:1/messages");
        assert_eq!(json["max_tokens"], 1500);
        let content = &json["messages"][0]["content"];
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(content[0]["type"], "image");
        assert_eq!(content[0]["source"]["type"], "base64");
        assert_eq!(content[0]["source"]["media_type"], "image/png");
        assert_eq!(content[0]["source"]["data"], image.base64_body());
        assert_eq!(content[1]["type"], "text");
        assert!(content[1]["text"].as_str().unwrap().contains("NUTRITIONAL EVALUATION"));
    }

    #[test]
    fn test_response_text_extraction() {
        let reply: MessagesResponse = serde_json::from_value(serde_json::json!({
            "content": [{"type": "text", "text": "Great meal"}]
        }))
        .unwrap();
        assert_eq!(reply.into_text().unwrap(), "Great meal");

        let legacy: MessagesResponse =
            serde_json::from_value(serde_json::json!({"completion": "Old style"})).unwrap();
        assert_eq!(legacy.into_text().unwrap(), "Old style");

        let empty: MessagesResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(matches!(empty.into_text(), Err(AnalysisError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_analyze_against_upstream() {
        let app = Router::new().route(
            "/messages",
            post(|headers: axum::http::HeaderMap, Json(body): Json<serde_json::Value>| async move {
                assert_eq!(headers["x-api-key"], "test-key");
                assert_eq!(body["messages"][0]["content"][0]["type"], "image");
                Json(serde_json::json!({
                    "content": [{"type": "text", "text": "Nutrition score: 8/10"}]
                }))
            }),
        );
        let base = spawn_upstream(app).await;

        let client = VisionClient::new(config_for(base)).unwrap();
        let feedback = client.analyze(&payload()).await.unwrap();
        assert_eq!(feedback, "Nutrition score: 8/10");
    }

    #[tokio::test]
    async fn test_api_error_is_not_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let app = Router::new().route(
            "/messages",
            post(move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::BAD_REQUEST, "bad image")
                }
            }),
        );
        let base = spawn_upstream(app).await;

        let client = VisionClient::new(config_for(base)).unwrap();
        let err = client.analyze(&payload()).await.unwrap_err();

        assert!(matches!(err, AnalysisError::Api { status: 400, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let app = Router::new().route(
            "/messages",
            post(move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (
                        StatusCode::TOO_MANY_REQUESTS,
                        [("Retry-After", "0")],
                        "slow down",
                    )
                }
            }),
        );
        let base = spawn_upstream(app).await;

        let client = VisionClient::new(config_for(base)).unwrap();
        let err = client.analyze(&payload()).await.unwrap_err();

        assert!(matches!(err, AnalysisError::RateLimited));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    fn rate_limited_upstream(retry_after: &'static str, calls: Arc<AtomicUsize>) -> Router {
        Router::new().route(
            "/messages",
            post(move || {
                let counter = Arc::clone(&calls);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (
                        StatusCode::TOO_MANY_REQUESTS,
                        [("Retry-After", retry_after)],
                        "slow down",
                    )
                }
            }),
        )
    }

    #[tokio::test]
    async fn test_last_attempt_does_not_wait_for_retry_after() {
        let calls = Arc::new(AtomicUsize::new(0));
        let base = spawn_upstream(rate_limited_upstream("30", Arc::clone(&calls))).await;

        let client = VisionClient::new(VisionConfig {
            max_retries: 1,
            ..config_for(base)
        })
        .unwrap();

        let started = std::time::Instant::now();
        let err = client.analyze(&payload()).await.unwrap_err();

        assert!(matches!(err, AnalysisError::RateLimited));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_retry_after_is_capped_by_request_timeout() {
        let calls = Arc::new(AtomicUsize::new(0));
        let base = spawn_upstream(rate_limited_upstream("3600", Arc::clone(&calls))).await;

        let client = VisionClient::new(VisionConfig {
            max_retries: 2,
            request_timeout_secs: 1,
            ..config_for(base)
        })
        .unwrap();

        let started = std::time::Instant::now();
        let err = client.analyze(&payload()).await.unwrap_err();

        assert!(matches!(err, AnalysisError::RateLimited));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_retry_after_parsing() {
        let mut headers = reqwest::header::HeaderMap::new();
        assert_eq!(retry_after(&headers), None);

        headers.insert(reqwest::header::RETRY_AFTER, "7".parse().unwrap());
        assert_eq!(retry_after(&headers), Some(Duration::from_secs(7)));

        headers.insert(
            reqwest::header::RETRY_AFTER,
            "Wed, 21 Oct 2015 07:28:00 GMT".parse().unwrap(),
        );
        assert_eq!(retry_after(&headers), None);
    }
}
