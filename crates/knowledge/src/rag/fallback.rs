//! Fallback for answers that carry no usable content.

use crate::types::ScoredChunk;
use regio_core::RagSettings;

/// Detects insufficient answers and turns retrieved chunks into raw
/// passages.
#[derive(Debug, Clone)]
pub struct FallbackResolver {
    not_found_phrases: Vec<String>,
    k: usize,
    prefix_chars: usize,
}

impl FallbackResolver {
    pub fn new<'a>(
        not_found_phrases: impl IntoIterator<Item = &'a str>,
        k: usize,
        prefix_chars: usize,
    ) -> Self {
        Self {
            not_found_phrases: not_found_phrases
                .into_iter()
                .map(|p| p.to_lowercase())
                .filter(|p| !p.trim().is_empty())
                .collect(),
            k,
            prefix_chars,
        }
    }

    /// Resolver using the phrases of every language, since the model may
    /// refuse in either.
    pub fn from_settings(settings: &RagSettings) -> Self {
        Self::new(
            settings.not_found_phrases.entries().map(|(_, phrase)| phrase),
            settings.fallback_k,
            settings.fallback_prefix_chars,
        )
    }

    /// Number of chunks to retrieve for the fallback.
    pub fn k(&self) -> usize {
        self.k
    }

    /// True when the answer is empty or reports that nothing was found.
    ///
    /// This is a substring heuristic over the model's own wording.
    pub fn is_insufficient(&self, answer: &str) -> bool {
        if answer.trim().is_empty() {
            return true;
        }

        let lower = answer.to_lowercase();
        self.not_found_phrases
            .iter()
            .any(|phrase| lower.contains(phrase.as_str()))
    }

    /// Leading characters of each chunk, without repeats, in retrieval order.
    pub fn passages(&self, chunks: &[ScoredChunk]) -> Vec<String> {
        let mut passages: Vec<String> = Vec::new();

        for scored in chunks {
            let prefix: String = scored
                .chunk
                .text
                .trim()
                .chars()
                .take(self.prefix_chars)
                .collect();

            if !prefix.is_empty() && !passages.contains(&prefix) {
                passages.push(prefix);
            }
        }

        passages
    }
}
