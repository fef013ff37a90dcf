#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use news_aggregator::{
    AggregatorError, Article, ArticleDisplay, ArticleOpener, ArticleSource, FetchConfig,
    InteractionEvent, InteractionSink, Query, RecommendationDisplay, RecommendationEntry,
    RecommendationSource, Result, SelectionChange, SourceInfo,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, Once};
use tokio::net::TcpListener;
use tokio::sync::Notify;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Minutes after a fixed base instant.
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap() + chrono::Duration::minutes(minutes)
}

pub fn article(title: &str, image: Option<&str>, minutes: i64) -> Article {
    Article {
        title: title.to_string(),
        description: None,
        url: format!("https://news.example.com/{}", title.to_lowercase().replace(' ', "-")),
        image_url: image.map(str::to_string),
        published_at: at(minutes),
        source: SourceInfo {
            id: None,
            name: "Example Wire".to_string(),
        },
    }
}

pub fn with_description(mut article: Article, description: &str) -> Article {
    article.description = Some(description.to_string());
    article
}

pub fn titles(articles: &[Article]) -> Vec<String> {
    articles.iter().map(|a| a.title.clone()).collect()
}

#[derive(Clone)]
enum Scripted {
    Articles(Vec<Article>),
    Fail,
}

/// Article source answering by query term. Unknown terms fail.
#[derive(Default)]
pub struct FakeArticleSource {
    responses: Mutex<HashMap<String, Scripted>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<Query>>,
}

impl FakeArticleSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, term: &str, articles: Vec<Article>) -> Self {
        self.set(term, articles);
        self
    }

    pub fn failing(self, term: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(term.to_string(), Scripted::Fail);
        self
    }

    pub fn set(&self, term: &str, articles: Vec<Article>) {
        self.responses
            .lock()
            .unwrap()
            .insert(term.to_string(), Scripted::Articles(articles));
    }

    pub fn fail(&self, term: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(term.to_string(), Scripted::Fail);
    }

    /// Fetches for `term` block until the returned gate is notified.
    pub fn gate(&self, term: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(term.to_string(), gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<Query> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArticleSource for FakeArticleSource {
    fn source_name(&self) -> String {
        "fake".to_string()
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<Article>> {
        self.calls.lock().unwrap().push(query.clone());

        let gate = self.gates.lock().unwrap().get(&query.term).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let scripted = self.responses.lock().unwrap().get(&query.term).cloned();
        match scripted {
            Some(Scripted::Articles(articles)) => Ok(articles),
            _ => Err(AggregatorError::MissingArticles {
                detail: format!("no articles for {}", query.term),
            }),
        }
    }
}

#[derive(Default)]
pub struct RecordingDisplay {
    pub shown: Mutex<Vec<Vec<String>>>,
    pub selections: Mutex<Vec<SelectionChange>>,
    pub recommendations: Mutex<Vec<Vec<RecommendationEntry>>>,
    pub opened: Mutex<Vec<String>>,
}

impl RecordingDisplay {
    pub fn last_shown(&self) -> Option<Vec<String>> {
        self.shown.lock().unwrap().last().cloned()
    }

    pub fn show_count(&self) -> usize {
        self.shown.lock().unwrap().len()
    }
}

impl ArticleDisplay for RecordingDisplay {
    fn show_articles(&self, articles: &[Article]) {
        self.shown.lock().unwrap().push(titles(articles));
    }

    fn mark_selection(&self, change: &SelectionChange) {
        self.selections.lock().unwrap().push(change.clone());
    }
}

impl RecommendationDisplay for RecordingDisplay {
    fn show_recommendations(&self, entries: &[RecommendationEntry]) {
        self.recommendations.lock().unwrap().push(entries.to_vec());
    }
}

impl ArticleOpener for RecordingDisplay {
    fn open(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}

/// Recommendation source replaying queued results; fails once exhausted.
#[derive(Default)]
pub struct QueuedRecommendations {
    queue: Mutex<VecDeque<Option<Vec<RecommendationEntry>>>>,
}

impl QueuedRecommendations {
    pub fn push_ok(&self, entries: Vec<RecommendationEntry>) {
        self.queue.lock().unwrap().push_back(Some(entries));
    }

    pub fn push_err(&self) {
        self.queue.lock().unwrap().push_back(None);
    }
}

#[async_trait]
impl RecommendationSource for QueuedRecommendations {
    async fn fetch(&self, _user_id: Option<&str>) -> Result<Vec<RecommendationEntry>> {
        match self.queue.lock().unwrap().pop_front() {
            Some(Some(entries)) => Ok(entries),
            _ => Err(AggregatorError::RecommendationFetch("HTTP 500".to_string())),
        }
    }
}

/// Sink recording events. `blocked` sinks never finish; `failing` sinks error.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<InteractionEvent>>,
    pub failing: bool,
    pub blocked: bool,
}

#[async_trait]
impl InteractionSink for RecordingSink {
    async fn submit(&self, event: &InteractionEvent) -> Result<()> {
        self.events.lock().unwrap().push(event.clone());
        if self.blocked {
            std::future::pending::<()>().await;
        }
        if self.failing {
            return Err(AggregatorError::Tracking("HTTP 503: Service Unavailable".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub body: String,
}

struct CannedState {
    responses: Mutex<VecDeque<(StatusCode, String)>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Answers every route with the next canned `(status, body)`; the last one repeats.
async fn canned(
    State(state): State<Arc<CannedState>>,
    method: Method,
    uri: Uri,
    body: String,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        target: uri.to_string(),
        body,
    });

    let mut responses = state.responses.lock().unwrap();
    let (status, body) = if responses.len() > 1 {
        responses.pop_front().unwrap()
    } else {
        responses.front().cloned().unwrap()
    };
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

/// Local axum server standing in for NewsAPI and the recommendation service.
pub struct CannedServer {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl CannedServer {
    pub async fn start(responses: Vec<(u16, &str)>) -> Self {
        assert!(!responses.is_empty());
        let responses = responses
            .into_iter()
            .map(|(status, body)| (StatusCode::from_u16(status).unwrap(), body.to_string()))
            .collect();

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = Arc::new(CannedState {
            responses: Mutex::new(responses),
            requests: requests.clone(),
        });
        let router = Router::new()
            .route("/v2/everything", get(canned))
            .route("/recommendations", get(canned))
            .route("/track", post(canned))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn config(&self) -> FetchConfig {
        FetchConfig {
            news_api_url: format!("{}/v2/everything", self.url),
            news_api_key: "test-key".to_string(),
            server_url: self.url.clone(),
            retry_delay_ms: 10,
            ..FetchConfig::default()
        }
    }
}
