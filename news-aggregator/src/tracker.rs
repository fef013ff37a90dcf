use crate::traits::{ArticleOpener, InteractionSink};
use crate::types::{Article, InteractionEvent};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Reports article clicks without holding up the caller. One attempt per
/// click: failures are logged and dropped.
#[derive(Clone)]
pub struct InteractionTracker {
    sink: Arc<dyn InteractionSink>,
}

impl InteractionTracker {
    pub fn new(sink: Arc<dyn InteractionSink>) -> Self {
        Self { sink }
    }

    /// Spawns the submission and returns immediately. Dropping the handle
    /// detaches the task. Must be called from within a tokio runtime.
    pub fn report(&self, user_id: Option<&str>, article: &Article) -> JoinHandle<()> {
        let event = InteractionEvent::from_click(user_id, article);
        let sink = self.sink.clone();

        tokio::spawn(async move {
            match sink.submit(&event).await {
                Ok(()) => debug!("Reported interaction with '{}'", event.title),
                Err(e) => error!("Error tracking interaction with '{}': {}", event.title, e),
            }
        })
    }

    /// Click handler: open first, then report. Same runtime requirement as
    /// [`InteractionTracker::report`].
    pub fn open_article(
        &self,
        user_id: Option<&str>,
        article: &Article,
        opener: &dyn ArticleOpener,
    ) -> JoinHandle<()> {
        opener.open(&article.url);
        self.report(user_id, article)
    }
}
