//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::analysis::VisionConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Feedback store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("meal-analyzer").to_string_lossy().to_string())
        .unwrap_or_else(|| "./meal_data".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> String {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest).to_string_lossy().to_string(),
        _ if path == "~" => dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string()),
        _ => path.to_string(),
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_max_body_size() -> usize {
    10 * 1024 * 1024 // 10 MB
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_size: default_max_body_size(),
        }
    }
}

/// Vision analyzer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default = "default_analyzer_url")]
    pub base_url: String,

    /// Empty disables analysis
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_analyzer_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_analyzer_url() -> String {
    VisionConfig::default().base_url
}

fn default_model() -> String {
    VisionConfig::default().model
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_analyzer_timeout() -> u64 {
    50
}

fn default_max_retries() -> u32 {
    2
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            base_url: default_analyzer_url(),
            api_key: String::new(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: default_analyzer_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl AnalyzerConfig {
    /// Whether an API key is configured
    pub fn is_enabled(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Client settings for [`crate::analysis::VisionClient`]
    pub fn vision_config(&self) -> VisionConfig {
        VisionConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            request_timeout_secs: self.request_timeout_secs,
            max_retries: self.max_retries,
            ..VisionConfig::default()
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn from_toml_str(content: &str) -> Result<Self, String> {
        let mut config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        config.storage.data_dir = expand_home(&config.storage.data_dir);
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Standard config file locations, in search order
    fn search_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("meal-analyzer").join("config.toml")),
            Some(PathBuf::from("/etc/meal-analyzer/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// First config file that exists in the standard locations
    pub fn find_default_path() -> Option<PathBuf> {
        first_existing(&Self::search_paths())
    }

    /// Load `path` with environment overrides, or the environment alone
    /// when there is no file
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::from_env()),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(host) = var("MEAL_ANALYZER_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("MEAL_ANALYZER_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Storage overrides
        if let Some(data_dir) = var("MEAL_ANALYZER_DATA_DIR") {
            self.storage.data_dir = expand_home(&data_dir);
        }

        // Analyzer overrides
        if let Some(key) = var("MEAL_ANALYZER_API_KEY").or_else(|| var("ANTHROPIC_API_KEY")) {
            self.analyzer.api_key = key;
        }
        if let Some(model) = var("MEAL_ANALYZER_MODEL") {
            self.analyzer.model = model;
        }
        if let Some(url) = var("MEAL_ANALYZER_API_URL") {
            self.analyzer.base_url = url;
        }

        // Logging overrides
        if let Some(level) = var("MEAL_ANALYZER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("MEAL_ANALYZER_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn first_existing(paths: &[PathBuf]) -> Option<PathBuf> {
    paths.iter().find(|p| p.exists()).cloned()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    let data_dir = toml::Value::String(default_data_dir()).to_string();

    format!(
        r#"# Healthy Meal Analyzer Configuration
#
# Environment variables override these settings:
# - MEAL_ANALYZER_HOST
# - MEAL_ANALYZER_PORT
# - MEAL_ANALYZER_DATA_DIR
# - MEAL_ANALYZER_API_KEY (or ANTHROPIC_API_KEY)
# - MEAL_ANALYZER_API_URL
# - MEAL_ANALYZER_MODEL
# - MEAL_ANALYZER_LOG_LEVEL
# - MEAL_ANALYZER_LOG_FORMAT

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8082

# Largest accepted request body (bytes); images arrive base64 encoded
max_body_size = 10485760

[storage]
# Directory holding <user_id>/<image_id>_feedback.json files
data_dir = {data_dir}

[analyzer]
# Messages API base URL
base_url = "https://api.anthropic.com/v1"

# API key; leave empty to disable meal analysis
api_key = ""

# Vision model used for meal analysis
model = "claude-3-5-sonnet-20241022"

# Maximum reply length in tokens
max_tokens = 1500

# Request timeout in seconds
request_timeout_secs = 50

# Attempts for timeouts and rate limits
max_retries = 2

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    )
}
