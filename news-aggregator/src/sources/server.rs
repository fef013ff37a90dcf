//! Clients for the companion web service that tracks reads and serves
//! recommendations.

use crate::fetcher::{join_endpoint, Fetcher};
use crate::traits::{InteractionSink, RecommendationSource};
use crate::types::{AggregatorError, InteractionEvent, RecommendationEntry, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

pub struct HttpRecommendationSource {
    fetcher: Arc<Fetcher>,
    endpoint: Url,
}

impl HttpRecommendationSource {
    pub fn new(fetcher: Arc<Fetcher>) -> Result<Self> {
        let endpoint = join_endpoint(&fetcher.config().server_url, "recommendations")?;
        Ok(Self { fetcher, endpoint })
    }

    /// The `user` parameter is left out entirely for anonymous visitors.
    pub fn request_url(&self, user_id: Option<&str>) -> Url {
        let mut url = self.endpoint.clone();
        if let Some(user_id) = user_id {
            url.query_pairs_mut().append_pair("user", user_id);
        }
        url
    }
}

#[async_trait]
impl RecommendationSource for HttpRecommendationSource {
    async fn fetch(&self, user_id: Option<&str>) -> Result<Vec<RecommendationEntry>> {
        let url = self.request_url(user_id);
        let response = self
            .fetcher
            .get(&url)
            .await
            .map_err(|e| AggregatorError::RecommendationFetch(e.to_string()))?;

        if !response.status.is_success() {
            return Err(AggregatorError::RecommendationFetch(format!(
                "HTTP {}: {}",
                response.status.as_u16(),
                response.status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let entries: Vec<RecommendationEntry> = serde_json::from_str(&response.body)
            .map_err(|e| AggregatorError::RecommendationFetch(format!("malformed body: {}", e)))?;

        info!("Personalized recommendations: {} entries", entries.len());
        Ok(entries)
    }
}

pub struct HttpInteractionSink {
    fetcher: Arc<Fetcher>,
    endpoint: Url,
}

impl HttpInteractionSink {
    pub fn new(fetcher: Arc<Fetcher>) -> Result<Self> {
        let endpoint = join_endpoint(&fetcher.config().server_url, "track")?;
        Ok(Self { fetcher, endpoint })
    }
}

#[async_trait]
impl InteractionSink for HttpInteractionSink {
    async fn submit(&self, event: &InteractionEvent) -> Result<()> {
        let status = self
            .fetcher
            .post_json(&self.endpoint, event)
            .await
            .map_err(|e| AggregatorError::Tracking(e.to_string()))?;

        if !status.is_success() {
            return Err(AggregatorError::Tracking(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        debug!("Tracked interaction with '{}'", event.title);
        Ok(())
    }
}
