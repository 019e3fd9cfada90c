use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "WakaLens";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Anthropic API endpoint used when none is configured.
pub const DEFAULT_CLAUDE_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";

/// Upper bound on a single model call.
pub const LLM_TIMEOUT_SECS: u64 = 120;

/// Request bodies above this are refused.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Translation routes: at most this many calls per client per window.
pub const TRANSLATE_MAX_REQUESTS: u32 = 10;
pub const TRANSLATE_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "wakalens_lib=info,wakalens=info,tower_http=info"
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Process configuration, read once from the environment at start-up.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub claude_api_key: Option<String>,
    pub claude_model: String,
    pub claude_base_url: String,
    pub frontend_url: String,
    pub rate_limit_window: Duration,
    pub rate_limit_max_requests: u32,
    pub prompts_dir: PathBuf,
    pub static_dir: Option<PathBuf>,
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            claude_api_key: None,
            claude_model: DEFAULT_CLAUDE_MODEL.to_string(),
            claude_base_url: DEFAULT_CLAUDE_BASE_URL.to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            rate_limit_window: Duration::from_millis(15 * 60 * 1000),
            rate_limit_max_requests: 100,
            prompts_dir: PathBuf::from("prompts"),
            static_dir: None,
            environment: "development".to_string(),
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Unset or blank
    /// keys take their defaults; malformed numbers are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(v) => parse_number("PORT", &v)?,
            None => defaults.port,
        };
        let rate_limit_window = match get("RATE_LIMIT_WINDOW_MS") {
            Some(v) => Duration::from_millis(parse_number("RATE_LIMIT_WINDOW_MS", &v)?),
            None => defaults.rate_limit_window,
        };
        let rate_limit_max_requests = match get("RATE_LIMIT_MAX_REQUESTS") {
            Some(v) => parse_number("RATE_LIMIT_MAX_REQUESTS", &v)?,
            None => defaults.rate_limit_max_requests,
        };

        Ok(Self {
            port,
            claude_api_key: get("CLAUDE_API_KEY"),
            claude_model: get("CLAUDE_MODEL").unwrap_or(defaults.claude_model),
            claude_base_url: get("CLAUDE_BASE_URL").unwrap_or(defaults.claude_base_url),
            frontend_url: get("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            rate_limit_window,
            rate_limit_max_requests,
            prompts_dir: get("PROMPTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.prompts_dir),
            static_dir: get("STATIC_DIR").map(PathBuf::from),
            environment: get("WAKALENS_ENV").unwrap_or(defaults.environment),
        })
    }

    pub fn api_key_configured(&self) -> bool {
        self.claude_api_key.is_some()
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
