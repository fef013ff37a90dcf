use crate::card::ArticleCard;
use crate::traits::{ArticleDisplay, ArticleOpener, RecommendationDisplay};
use crate::types::{Article, RecommendationEntry, SelectionChange};
use std::io::{self, Write};
use std::sync::Mutex;

/// Renders articles and recommendations as plain text on a writer (stdout by default).
pub struct ConsoleDisplay<W: Write + Send = io::Stdout> {
    out: Mutex<W>,
}

impl ConsoleDisplay {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_lines(&self, lines: &[String]) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        for line in lines {
            // A closed stdout is not worth failing the session over.
            let _ = writeln!(out, "{}", line);
        }
        let _ = out.flush();
    }
}

impl<W: Write + Send> ArticleDisplay for ConsoleDisplay<W> {
    fn show_articles(&self, articles: &[Article]) {
        let mut lines = vec![format!("== {} articles ==", articles.len())];
        for (index, article) in articles.iter().enumerate() {
            let card = ArticleCard::from(article);
            lines.push(format!("[{}] {}", index + 1, card.title));
            lines.push(format!("    {}", card.source_line));
            lines.push(format!("    {}", card.description));
        }
        self.write_lines(&lines);
    }

    fn mark_selection(&self, change: &SelectionChange) {
        if let Some(category) = &change.activated {
            self.write_lines(&[format!("-> category: {}", category)]);
        }
    }
}

impl<W: Write + Send> RecommendationDisplay for ConsoleDisplay<W> {
    fn show_recommendations(&self, entries: &[RecommendationEntry]) {
        let mut lines = vec![format!("== {} recommendations ==", entries.len())];
        lines.extend(entries.iter().map(|entry| format!("  * {}", entry)));
        self.write_lines(&lines);
    }
}

impl<W: Write + Send> ArticleOpener for ConsoleDisplay<W> {
    fn open(&self, url: &str) {
        self.write_lines(&[format!("Opening {}", url)]);
    }
}
