use crate::fetcher::{redact, Fetcher};
use crate::traits::ArticleSource;
use crate::types::{AggregatorError, Article, FetchConfig, Query, Result, SourceInfo};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// Body of a NewsAPI `everything` response. Error responses carry
/// `code`/`message` and no `articles`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub articles: Option<Vec<NewsApiArticle>>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiArticle {
    #[serde(default)]
    pub source: Option<NewsApiPublisher>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewsApiPublisher {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl NewsApiArticle {
    /// `None` when a required field is missing or the timestamp doesn't parse.
    pub fn into_article(self) -> Option<Article> {
        let title = self.title?;
        let url = self.url?;
        let published_at = DateTime::parse_from_rfc3339(self.published_at.as_deref()?)
            .ok()?
            .with_timezone(&Utc);
        let source = self.source.unwrap_or(NewsApiPublisher { id: None, name: None });

        Some(Article {
            title,
            description: self.description,
            url,
            image_url: self.url_to_image,
            published_at,
            source: SourceInfo {
                id: source.id,
                name: source.name.unwrap_or_default(),
            },
        })
    }
}

/// Decode a NewsAPI body. A missing `articles` collection is a failure.
pub fn parse_articles(body: &str) -> Result<Vec<Article>> {
    let response: NewsApiResponse = serde_json::from_str(body)?;

    let Some(raw_articles) = response.articles else {
        return Err(match (response.code, response.message) {
            (Some(code), Some(message)) => AggregatorError::Api { code, message },
            (_, message) => AggregatorError::MissingArticles {
                detail: message
                    .or(response.status)
                    .unwrap_or_else(|| "no status".to_string()),
            },
        });
    };

    let total = raw_articles.len();
    let articles: Vec<Article> = raw_articles
        .into_iter()
        .filter_map(NewsApiArticle::into_article)
        .collect();

    if articles.len() < total {
        warn!("Dropped {} malformed articles out of {}", total - articles.len(), total);
    }

    Ok(articles)
}

/// [`ArticleSource`] backed by the NewsAPI `everything` endpoint.
pub struct NewsApiSource {
    fetcher: Arc<Fetcher>,
    endpoint: Url,
    api_key: String,
}

impl NewsApiSource {
    pub fn new(fetcher: Arc<Fetcher>) -> Result<Self> {
        let config: &FetchConfig = fetcher.config();
        let endpoint = Url::parse(&config.news_api_url)?;
        if config.news_api_key.is_empty() {
            warn!("No news API key configured; requests will likely be rejected");
        }
        let api_key = config.news_api_key.clone();

        Ok(Self {
            fetcher,
            endpoint,
            api_key,
        })
    }

    pub fn request_url(&self, query: &Query) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", &query.term)
            .append_pair("apiKey", &self.api_key)
            .append_pair("language", &query.language);
        url
    }
}

#[async_trait]
impl ArticleSource for NewsApiSource {
    fn source_name(&self) -> String {
        self.endpoint
            .host_str()
            .map(|host| format!("News API ({})", host))
            .unwrap_or_else(|| "News API".to_string())
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<Article>> {
        let url = self.request_url(query);
        let response = self.fetcher.get(&url).await?;

        // Error statuses often still carry a JSON explanation.
        let parsed = parse_articles(&response.body);
        if !response.status.is_success() {
            return Err(match parsed {
                Err(api_error @ AggregatorError::Api { .. }) => api_error,
                _ => AggregatorError::Status {
                    endpoint: redact(&url),
                    status: response.status.as_u16(),
                },
            });
        }

        let articles = parsed?;
        info!(
            "Fetched {} articles for '{}' ({})",
            articles.len(),
            query.term,
            query.language
        );
        Ok(articles)
    }
}
