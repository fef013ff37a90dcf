use crate::types::{AggregatorError, FetchConfig, Result};
use backoff::{backoff::Backoff, exponential::ExponentialBackoff};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// Raw outcome of a GET: the status and body, left for the caller to interpret.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: StatusCode,
    pub body: String,
}

pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true)
            .brotli(true);

        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// GET `url`, retrying transport errors, 429 and 5xx up to `max_retries` times.
    /// Any other status is returned as-is.
    pub async fn get(&self, url: &Url) -> Result<FetchResponse> {
        let start_time = Instant::now();
        let shown_url = redact(url);

        let mut backoff: ExponentialBackoff<backoff::SystemClock> = ExponentialBackoff {
            current_interval: Duration::from_millis(self.config.retry_delay_ms),
            initial_interval: Duration::from_millis(self.config.retry_delay_ms),
            max_interval: Duration::from_millis(self.config.retry_delay_ms * 32),
            multiplier: 2.0,
            max_elapsed_time: None,
            ..Default::default()
        };

        let mut attempt = 0;
        loop {
            debug!("GET {} (attempt {})", shown_url, attempt + 1);

            let error = match self.client.get(url.clone()).send().await {
                Ok(response) if is_transient(response.status()) => AggregatorError::Status {
                    endpoint: shown_url.clone(),
                    status: response.status().as_u16(),
                },
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await?;
                    let response_time_ms = start_time.elapsed().as_millis() as u64;
                    info!("GET {} -> {} ({} bytes, {}ms)", shown_url, status, body.len(), response_time_ms);
                    return Ok(FetchResponse { status, body });
                }
                Err(e) => AggregatorError::Http(e),
            };

            if attempt < self.config.max_retries {
                if let Some(delay) = backoff.next_backoff() {
                    warn!("Attempt {} failed for {}: {}, retrying in {:?}", attempt + 1, shown_url, error, delay);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
            }

            return Err(error);
        }
    }

    /// POST `body` as JSON once. Returns the response status.
    pub async fn post_json<B: Serialize + ?Sized>(&self, url: &Url, body: &B) -> Result<StatusCode> {
        debug!("POST {}", redact(url));
        let response = self.client.post(url.clone()).json(body).send().await?;
        Ok(response.status())
    }
}

fn is_transient(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// Hide the API key in logs.
pub fn redact(url: &Url) -> String {
    if !url.query_pairs().any(|(key, _)| key == "apiKey") {
        return url.to_string();
    }

    let mut shown = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == "apiKey" { "***".to_string() } else { value.into_owned() };
            (key.into_owned(), value)
        })
        .collect();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}

/// Append `segment` to the path of `base`, keeping any existing path prefix.
pub fn join_endpoint(base: &str, segment: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| AggregatorError::Config(format!("URL cannot be a base: {}", base)))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}
