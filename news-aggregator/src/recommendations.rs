use crate::traits::{RecommendationDisplay, RecommendationSource};
use crate::types::RecommendationEntry;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered { count: usize },
    /// Fetch failed; the previous set is still shown.
    Failed,
}

/// Keeps the displayed recommendation list in step with the backend. Each
/// successful fetch replaces the whole list.
pub struct RecommendationRenderer {
    source: Arc<dyn RecommendationSource>,
    display: Arc<dyn RecommendationDisplay>,
    current: RwLock<Vec<RecommendationEntry>>,
}

impl RecommendationRenderer {
    pub fn new(source: Arc<dyn RecommendationSource>, display: Arc<dyn RecommendationDisplay>) -> Self {
        Self {
            source,
            display,
            current: RwLock::new(Vec::new()),
        }
    }

    pub async fn refresh(&self, user_id: Option<&str>) -> RenderOutcome {
        match self.source.fetch(user_id).await {
            Ok(entries) => {
                let mut current = self.current.write().await;
                *current = entries;
                self.display.show_recommendations(&current);
                RenderOutcome::Rendered {
                    count: current.len(),
                }
            }
            Err(e) => {
                error!("Error fetching recommendations for {:?}: {}", user_id, e);
                RenderOutcome::Failed
            }
        }
    }

    pub async fn current(&self) -> Vec<RecommendationEntry> {
        self.current.read().await.clone()
    }
}
