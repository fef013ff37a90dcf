use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TERM: &str = "India";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Publisher of an article as reported by the news API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// A single news item, immutable once received from the article source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub source: SourceInfo,
}

impl Article {
    /// Blank image URLs count as missing.
    pub fn has_image(&self) -> bool {
        self.image_url
            .as_deref()
            .is_some_and(|image| !image.trim().is_empty())
    }

    /// Case-insensitive substring match of any term against title or description.
    /// Terms are expected in lowercase.
    pub fn mentions_any(&self, terms: &[&str]) -> bool {
        let title = self.title.to_lowercase();
        let description = self.description.as_deref().map(str::to_lowercase);

        terms.iter().any(|term| {
            title.contains(term)
                || description
                    .as_deref()
                    .is_some_and(|description| description.contains(term))
        })
    }
}

/// A `(label, category)` pair produced by the recommendation backend.
/// Travels as a 2-element JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct RecommendationEntry {
    pub label: String,
    pub category: String,
}

impl RecommendationEntry {
    pub fn new(label: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            category: category.into(),
        }
    }
}

impl From<(String, String)> for RecommendationEntry {
    fn from((label, category): (String, String)) -> Self {
        Self { label, category }
    }
}

impl From<RecommendationEntry> for (String, String) {
    fn from(entry: RecommendationEntry) -> Self {
        (entry.label, entry.category)
    }
}

impl fmt::Display for RecommendationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - Category: {}", self.label, self.category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub term: String,
    pub language: String,
}

impl Query {
    pub fn new(term: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            language: language.into(),
        }
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new(DEFAULT_TERM, DEFAULT_LANGUAGE)
    }
}

/// Normalizes a 2-letter language code to lowercase, rejecting anything else.
pub fn normalize_language(code: &str) -> Option<String> {
    let code = code.trim();
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code.to_ascii_lowercase())
    } else {
        None
    }
}

/// Record of a user opening an article. Built at click time, sent once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub user_id: Option<String>,
    pub title: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InteractionEvent {
    /// The article's source name doubles as the interaction category.
    pub fn from_click(user_id: Option<&str>, article: &Article) -> Self {
        Self {
            user_id: user_id.map(str::to_owned),
            title: article.title.clone(),
            category: article.source.name.clone(),
            description: article.description.clone(),
        }
    }
}
