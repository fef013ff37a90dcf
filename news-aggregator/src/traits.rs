use crate::types::{Article, InteractionEvent, Query, RecommendationEntry, Result, SelectionChange};
use async_trait::async_trait;

/// Upstream news search.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Human-readable name for logs
    fn source_name(&self) -> String;

    /// Fetch the raw, unfiltered articles matching `query`
    async fn fetch(&self, query: &Query) -> Result<Vec<Article>>;
}

/// Backend producing ranked `(label, category)` pairs for a user.
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn fetch(&self, user_id: Option<&str>) -> Result<Vec<RecommendationEntry>>;
}

/// Collaborator receiving interaction events.
#[async_trait]
pub trait InteractionSink: Send + Sync {
    async fn submit(&self, event: &InteractionEvent) -> Result<()>;
}

/// Presentation of the current article set.
pub trait ArticleDisplay: Send + Sync {
    /// Replace everything shown with `articles`
    fn show_articles(&self, articles: &[Article]);

    /// Move the navigation highlight
    fn mark_selection(&self, _change: &SelectionChange) {}
}

pub trait RecommendationDisplay: Send + Sync {
    /// Replace everything shown with `entries`
    fn show_recommendations(&self, entries: &[RecommendationEntry]);
}

/// Opens an article for reading, e.g. in a new browser tab.
pub trait ArticleOpener: Send + Sync {
    fn open(&self, url: &str);
}
