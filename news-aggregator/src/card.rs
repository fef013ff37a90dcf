use crate::types::Article;
use chrono::{DateTime, FixedOffset, Offset, Utc};

pub const NO_DESCRIPTION: &str = "No description available.";
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x200";

/// Asia/Jakarta, which has no daylight saving.
const JAKARTA_OFFSET_SECS: i32 = 7 * 3600;

/// Presentation model of one article tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCard {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub source_line: String,
    pub url: String,
}

impl From<&Article> for ArticleCard {
    fn from(article: &Article) -> Self {
        let image_url = article
            .image_url
            .clone()
            .filter(|image| !image.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

        Self {
            title: article.title.clone(),
            description: article
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            image_url,
            source_line: format!("{} · {}", article.source.name, format_local_time(&article.published_at)),
            url: article.url.clone(),
        }
    }
}

/// e.g. `5/1/2024, 7:00:00 PM`
pub fn format_local_time(published_at: &DateTime<Utc>) -> String {
    let offset = FixedOffset::east_opt(JAKARTA_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    published_at
        .with_timezone(&offset)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}
