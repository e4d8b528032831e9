//! Recursive boundary splitter.

use super::merging::{char_len, hard_split, merge_splits};
use super::ChunkConfig;

/// Splits text at the coarsest boundary that occurs in it, recursing into
/// finer boundaries only for pieces that are still too long.
#[derive(Debug, Clone)]
pub struct RecursiveSplitter {
    config: ChunkConfig,
}

impl RecursiveSplitter {
    pub fn new(config: ChunkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Split text into trimmed, non-empty chunks.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_with(text, &self.config.separators)
    }

    fn split_with(&self, text: &str, separators: &[String]) -> Vec<String> {
        let size = self.config.chunk_size;
        let overlap = self.config.chunk_overlap;

        // First boundary present in the text wins, finer ones are kept for recursion
        let position = separators
            .iter()
            .position(|sep| !sep.is_empty() && text.contains(sep.as_str()));

        let Some(index) = position else {
            return if char_len(text) < size {
                merge_splits(&[text.to_string()], size, overlap)
            } else {
                hard_split(text, size, overlap)
            };
        };

        let separator = &separators[index];
        let finer = &separators[index + 1..];

        let mut chunks = Vec::new();
        let mut good_splits = Vec::new();

        for piece in split_keeping_separator(text, separator) {
            if char_len(&piece) < size {
                good_splits.push(piece);
                continue;
            }

            if !good_splits.is_empty() {
                chunks.extend(merge_splits(&good_splits, size, overlap));
                good_splits.clear();
            }

            if finer.is_empty() {
                chunks.extend(hard_split(&piece, size, overlap));
            } else {
                chunks.extend(self.split_with(&piece, finer));
            }
        }

        if !good_splits.is_empty() {
            chunks.extend(merge_splits(&good_splits, size, overlap));
        }

        chunks
    }
}

/// Split on `separator`, attaching it to the start of the following piece.
fn split_keeping_separator(text: &str, separator: &str) -> Vec<String> {
    let mut parts = text.split(separator);
    let mut pieces = Vec::new();

    if let Some(first) = parts.next() {
        pieces.push(first.to_string());
    }
    pieces.extend(parts.map(|part| format!("{}{}", separator, part)));

    pieces.retain(|p| !p.is_empty());
    pieces
}
