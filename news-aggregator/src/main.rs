use anyhow::Context;
use clap::Parser;
use news_aggregator::{
    ConsoleDisplay, FetchConfig, Fetcher, HttpInteractionSink, HttpRecommendationSource,
    InteractionTracker, NewsApiSource, QueryController, RecommendationRenderer,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Browse filtered news from the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// User whose reads are tracked and who gets recommendations
    #[arg(long)]
    user: Option<String>,

    /// Navigation category to select after the initial load
    #[arg(long)]
    category: Option<String>,

    /// Free-text search to run after the initial load
    #[arg(long)]
    query: Option<String>,

    /// Switch to this 2-letter language code at the end
    #[arg(long)]
    language: Option<String>,

    /// Open the n-th displayed article (1-based) and report the read
    #[arg(long)]
    open: Option<usize>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = FetchConfig::from_env().context("Invalid NEWS_* environment")?;
    info!("Starting news aggregator (server: {})", config.server_url);

    let fetcher = Arc::new(Fetcher::new(config).context("Failed to build HTTP client")?);
    let display = Arc::new(ConsoleDisplay::stdout());

    let controller = QueryController::new(
        Arc::new(NewsApiSource::new(fetcher.clone()).context("Invalid NEWS_API_URL")?),
        display.clone(),
    );
    let renderer = RecommendationRenderer::new(
        Arc::new(HttpRecommendationSource::new(fetcher.clone()).context("Invalid NEWS_SERVER_URL")?),
        display.clone(),
    );
    let tracker = InteractionTracker::new(Arc::new(
        HttpInteractionSink::new(fetcher).context("Invalid NEWS_SERVER_URL")?,
    ));

    let user = args.user.as_deref();
    controller.init().await;
    renderer.refresh(user).await;

    if let Some(category) = &args.category {
        controller.select_category(category).await;
    }
    if let Some(query) = &args.query {
        controller.submit_search(query).await;
    }
    if let Some(language) = &args.language {
        controller.change_language(language).await;
    }

    if let Some(n) = args.open {
        let articles = controller.displayed_articles().await;
        match n.checked_sub(1).and_then(|index| articles.get(index)) {
            Some(article) => {
                // The process exits right after, so wait for the report here.
                let report = tracker.open_article(user, article, display.as_ref());
                if let Err(e) = report.await {
                    warn!("Interaction report task failed: {}", e);
                }
            }
            None => warn!("No article #{} among {} displayed", n, articles.len()),
        }
    }

    info!("News aggregator finished");
    Ok(())
}
