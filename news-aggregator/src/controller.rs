use crate::processing::ArticleFilterPipeline;
use crate::traits::{ArticleDisplay, ArticleSource};
use crate::types::{normalize_language, Article, NavEvent, NavSelection, Query, Result, DEFAULT_TERM};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// What happened to a dispatched query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Results replaced the displayed set.
    Applied { shown: usize },
    /// The source failed; the displayed set is unchanged.
    Failed,
    /// A later-dispatched query was already applied, so these results were dropped.
    Superseded,
    /// Nothing was dispatched (empty search term, invalid language).
    Ignored,
}

#[derive(Debug)]
struct Session {
    language: String,
    selection: NavSelection,
    last_search: Option<String>,
    last_query: Query,
}

#[derive(Debug, Default)]
struct ShownArticles {
    /// Sequence number of the query these articles came from; 0 before any.
    request: u64,
    articles: Vec<Article>,
}

/// Owns the query/language/navigation state of a browsing session and keeps the
/// display in sync with the latest results.
pub struct QueryController {
    source: Arc<dyn ArticleSource>,
    pipeline: ArticleFilterPipeline,
    display: Arc<dyn ArticleDisplay>,
    session: Mutex<Session>,
    shown: Mutex<ShownArticles>,
    next_request: AtomicU64,
}

impl QueryController {
    pub fn new(source: Arc<dyn ArticleSource>, display: Arc<dyn ArticleDisplay>) -> Self {
        let default_query = Query::default();
        Self {
            source,
            pipeline: ArticleFilterPipeline::default(),
            display,
            session: Mutex::new(Session {
                language: default_query.language.clone(),
                selection: NavSelection::default(),
                last_search: None,
                last_query: default_query,
            }),
            shown: Mutex::new(ShownArticles::default()),
            next_request: AtomicU64::new(0),
        }
    }

    pub fn with_pipeline(mut self, pipeline: ArticleFilterPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Fetch and filter without touching session or display state.
    pub async fn search(&self, term: &str, language: &str) -> Result<Vec<Article>> {
        let query = Query::new(term, language);
        let raw = self.source.fetch(&query).await?;
        Ok(self.pipeline.process(raw))
    }

    /// Initial load with the default query.
    pub async fn init(&self) -> DispatchOutcome {
        info!("Loading default news from {}", self.source.source_name());
        self.dispatch(Query::default()).await
    }

    pub async fn select_category(&self, category: &str) -> DispatchOutcome {
        let query = {
            let mut session = self.session.lock().await;
            let change = session
                .selection
                .apply(&NavEvent::CategoryClicked(category.to_string()));
            self.display.mark_selection(&change);
            session.selection = change.next;
            Query::new(category, session.language.clone())
        };
        self.dispatch(query).await
    }

    pub async fn submit_search(&self, term: &str) -> DispatchOutcome {
        if term.is_empty() {
            debug!("Ignoring empty search");
            return DispatchOutcome::Ignored;
        }

        let query = {
            let mut session = self.session.lock().await;
            let change = session.selection.apply(&NavEvent::SearchSubmitted);
            self.display.mark_selection(&change);
            session.selection = change.next;
            session.last_search = Some(term.to_string());
            Query::new(term, session.language.clone())
        };
        self.dispatch(query).await
    }

    /// Re-runs the last free-text search (or the default term) in `code`.
    /// The navigation selection is left as it is.
    pub async fn change_language(&self, code: &str) -> DispatchOutcome {
        let Some(language) = normalize_language(code) else {
            warn!("Ignoring invalid language code '{}'", code);
            return DispatchOutcome::Ignored;
        };

        let query = {
            let mut session = self.session.lock().await;
            session.language = language.clone();
            let term = session
                .last_search
                .clone()
                .unwrap_or_else(|| DEFAULT_TERM.to_string());
            Query::new(term, language)
        };
        self.dispatch(query).await
    }

    pub async fn selection(&self) -> NavSelection {
        self.session.lock().await.selection.clone()
    }

    /// The most recently dispatched query.
    pub async fn current_query(&self) -> Query {
        self.session.lock().await.last_query.clone()
    }

    pub async fn language(&self) -> String {
        self.session.lock().await.language.clone()
    }

    pub async fn displayed_articles(&self) -> Vec<Article> {
        self.shown.lock().await.articles.clone()
    }

    async fn dispatch(&self, query: Query) -> DispatchOutcome {
        let request = self.next_request.fetch_add(1, Ordering::SeqCst) + 1;
        self.session.lock().await.last_query = query.clone();

        let articles = match self.search(&query.term, &query.language).await {
            Ok(articles) => articles,
            Err(e) => {
                error!("Error fetching news for '{}' ({}): {}", query.term, query.language, e);
                return DispatchOutcome::Failed;
            }
        };

        let mut shown = self.shown.lock().await;
        if request < shown.request {
            debug!(
                "Dropping results of request {} for '{}': request {} already shown",
                request, query.term, shown.request
            );
            return DispatchOutcome::Superseded;
        }

        shown.request = request;
        shown.articles = articles;
        self.display.show_articles(&shown.articles);
        DispatchOutcome::Applied {
            shown: shown.articles.len(),
        }
    }
}
