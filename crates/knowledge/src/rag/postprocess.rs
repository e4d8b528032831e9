//! Political group extraction.
//!
//! Queries about parties or groups are answered from the bullet lists in the
//! retrieved chunks rather than from the model, which tends to drop or
//! paraphrase list items.

use crate::types::ScoredChunk;
use regex::Regex;
use regio_core::{AppError, AppResult, RagSettings};

/// Pulls bullet lines naming an organization out of retrieved text.
#[derive(Debug, Clone)]
pub struct PoliticalGroupExtractor {
    keywords: Vec<String>,
    pattern: Regex,
}

impl PoliticalGroupExtractor {
    /// `keywords` trigger extraction, `tokens` are the organization names a
    /// bullet line must contain. Both match case-insensitively.
    pub fn new(keywords: &[String], tokens: &[String]) -> AppResult<Self> {
        let keywords = keywords.iter().map(|k| k.to_lowercase()).collect();
        let pattern = build_pattern(tokens)?;

        Ok(Self { keywords, pattern })
    }

    pub fn from_settings(settings: &RagSettings) -> AppResult<Self> {
        Self::new(&settings.political_keywords, &settings.organization_tokens)
    }

    /// Whether the query asks about political groups.
    pub fn is_triggered(&self, query: &str) -> bool {
        let lower = query.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }

    /// Matching bullet lines, chunk by chunk in retrieval order.
    ///
    /// Every match is kept, so a line present in two overlapping chunks
    /// appears twice.
    pub fn extract(&self, chunks: &[ScoredChunk]) -> Vec<String> {
        chunks
            .iter()
            .flat_map(|scored| {
                self.pattern
                    .find_iter(&scored.chunk.text)
                    .map(|m| m.as_str().trim().to_string())
            })
            .filter(|line| !line.is_empty())
            .collect()
    }
}

/// A bullet, whitespace, then the rest of the line as long as it names one
/// of the tokens.
fn build_pattern(tokens: &[String]) -> AppResult<Regex> {
    let alternatives: Vec<String> = tokens
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(regex::escape)
        .collect();

    if alternatives.is_empty() {
        return Err(AppError::Config(
            "rag.organizationTokens must not be empty".to_string(),
        ));
    }

    let pattern = format!(r"(?i)•[^\S\n][^\n]*?(?:{})[^\n]*", alternatives.join("|"));

    Regex::new(&pattern)
        .map_err(|e| AppError::Config(format!("Invalid organization token pattern: {}", e)))
}
