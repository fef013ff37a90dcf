pub mod types;
pub mod traits;
pub mod fetcher;
pub mod processing;
pub mod sources;
pub mod controller;
pub mod recommendations;
pub mod tracker;
pub mod card;
pub mod display;

pub use types::*;
pub use traits::{ArticleDisplay, ArticleOpener, ArticleSource, InteractionSink, RecommendationDisplay, RecommendationSource};
pub use fetcher::Fetcher;
pub use processing::{ArticleFilterPipeline, ProcessingStage, PROMOTIONAL_TERMS};
pub use sources::{HttpInteractionSink, HttpRecommendationSource, NewsApiSource};
pub use controller::{DispatchOutcome, QueryController};
pub use recommendations::{RecommendationRenderer, RenderOutcome};
pub use tracker::InteractionTracker;
pub use card::ArticleCard;
pub use display::ConsoleDisplay;
