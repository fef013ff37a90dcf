pub mod news_api;
pub mod server;

pub use news_api::NewsApiSource;
pub use server::{HttpInteractionSink, HttpRecommendationSource};
