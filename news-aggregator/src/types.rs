use std::env;

pub use interfaces::defs::{normalize_language, DEFAULT_LANGUAGE, DEFAULT_TERM};
pub use interfaces::defs::{Article, InteractionEvent, Query, RecommendationEntry, SourceInfo};
pub use interfaces::state::{NavEvent, NavSelection, SelectionChange};

pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2/everything";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    /// `None` leaves the transport default in place.
    pub timeout_seconds: Option<u64>,
    /// Extra attempts after the first one for idempotent GETs.
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub news_api_url: String,
    pub news_api_key: String,
    /// Base URL of the service exposing `/recommendations` and `/track`.
    pub server_url: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "News-Aggregator/1.0".to_string(),
            timeout_seconds: None,
            max_retries: 0,
            retry_delay_ms: 500,
            news_api_url: DEFAULT_NEWS_API_URL.to_string(),
            news_api_key: String::new(),
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

impl FetchConfig {
    /// Overlays `NEWS_*` environment variables on the defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(key) = env::var("NEWS_API_KEY") {
            config.news_api_key = key;
        }
        if let Ok(url) = env::var("NEWS_API_URL") {
            config.news_api_url = url;
        }
        if let Ok(url) = env::var("NEWS_SERVER_URL") {
            config.server_url = url;
        }
        if let Ok(raw) = env::var("NEWS_FETCH_TIMEOUT_SECS") {
            let seconds = raw.parse().map_err(|_| {
                AggregatorError::Config(format!("NEWS_FETCH_TIMEOUT_SECS is not a number: {}", raw))
            })?;
            config.timeout_seconds = Some(seconds);
        }
        if let Ok(raw) = env::var("NEWS_FETCH_MAX_RETRIES") {
            config.max_retries = raw.parse().map_err(|_| {
                AggregatorError::Config(format!("NEWS_FETCH_MAX_RETRIES is not a number: {}", raw))
            })?;
        }

        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("Response has no articles collection: {detail}")]
    MissingArticles { detail: String },

    #[error("News API error {code}: {message}")]
    Api { code: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Recommendation fetch failed: {0}")]
    RecommendationFetch(String),

    #[error("Tracking failed: {0}")]
    Tracking(String),
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
