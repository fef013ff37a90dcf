use crate::types::Article;
use tracing::debug;

/// Substrings marking promotional content. Matched case-insensitively against
/// title and description.
pub const PROMOTIONAL_TERMS: [&str; 16] = [
    "sponsored",
    "advertisement",
    "promotion",
    "advertorial",
    "paid content",
    "partnered",
    "affiliate",
    "clickbait",
    "subscribe",
    "deal",
    "discount",
    "sale",
    "offer",
    "shop now",
    "buy now",
    "sweepstakes",
];

/// One step of the article pipeline. Stages are pure and infallible.
pub trait ProcessingStage: Send + Sync {
    fn process(&self, articles: Vec<Article>) -> Vec<Article>;

    fn stage_name(&self) -> &'static str;
}

/// Most recent first. Equal timestamps keep their input order.
pub struct RecencySortStage;

impl ProcessingStage for RecencySortStage {
    fn process(&self, mut articles: Vec<Article>) -> Vec<Article> {
        // sort_by is stable
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        articles
    }

    fn stage_name(&self) -> &'static str {
        "recency_sort"
    }
}

/// Drops articles mentioning any denylisted term.
pub struct DenylistStage {
    terms: Vec<String>,
}

impl DenylistStage {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: terms.into_iter().map(|t| t.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn promotional() -> Self {
        Self::new(PROMOTIONAL_TERMS)
    }
}

impl ProcessingStage for DenylistStage {
    fn process(&self, articles: Vec<Article>) -> Vec<Article> {
        let terms: Vec<&str> = self.terms.iter().map(String::as_str).collect();
        articles
            .into_iter()
            .filter(|article| !article.mentions_any(&terms))
            .collect()
    }

    fn stage_name(&self) -> &'static str {
        "denylist"
    }
}

/// Drops articles without an image.
pub struct ImageRequiredStage;

impl ProcessingStage for ImageRequiredStage {
    fn process(&self, articles: Vec<Article>) -> Vec<Article> {
        articles.into_iter().filter(Article::has_image).collect()
    }

    fn stage_name(&self) -> &'static str {
        "image_required"
    }
}

/// Turns a raw article collection into the ordered sequence shown to the user.
pub struct ArticleFilterPipeline {
    stages: Vec<Box<dyn ProcessingStage>>,
}

impl ArticleFilterPipeline {
    /// A pipeline with no stages; see [`Default`] for the standard one.
    pub fn empty() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn with_stage(mut self, stage: Box<dyn ProcessingStage>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.stage_name()).collect()
    }

    pub fn process(&self, articles: Vec<Article>) -> Vec<Article> {
        self.stages.iter().fold(articles, |articles, stage| {
            let before = articles.len();
            let after = stage.process(articles);
            debug!("Stage {}: {} -> {} articles", stage.stage_name(), before, after.len());
            after
        })
    }
}

impl Default for ArticleFilterPipeline {
    fn default() -> Self {
        Self::empty()
            .with_stage(Box::new(RecencySortStage))
            .with_stage(Box::new(DenylistStage::promotional()))
            .with_stage(Box::new(ImageRequiredStage))
    }
}
