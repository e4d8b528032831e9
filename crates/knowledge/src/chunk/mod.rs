//! Recursive chunking of document pages.
//!
//! Text is split at the coarsest boundary first (paragraph, line, sentence,
//! bullet) and only cut at a fixed character count when no boundary is left.
//! Neighbouring chunks overlap so that short lists are kept whole in at
//! least one chunk.

mod merging;
mod splitter;

pub use splitter::RecursiveSplitter;

use crate::types::{Chunk, DocumentPage};
use regio_core::RagSettings;

/// Chunking parameters. Sizes are measured in characters.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    /// Boundaries from coarsest to finest
    pub separators: Vec<String>,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self::from_settings(&RagSettings::default())
    }
}

impl ChunkConfig {
    pub fn from_settings(settings: &RagSettings) -> Self {
        Self {
            chunk_size: settings.chunk_size,
            chunk_overlap: settings.chunk_overlap,
            separators: settings.separators.clone(),
        }
    }
}

/// Split every page into chunks, numbering them across the whole document.
///
/// Chunks never span a page boundary.
pub fn chunk_pages(pages: &[DocumentPage], config: &ChunkConfig) -> Vec<Chunk> {
    let splitter = RecursiveSplitter::new(config.clone());
    let mut chunks = Vec::new();

    for page in pages {
        for text in splitter.split_text(&page.text) {
            chunks.push(Chunk {
                text,
                order: chunks.len(),
                page: page.number,
            });
        }
    }

    tracing::debug!(
        "Split {} pages into {} chunks (size {}, overlap {})",
        pages.len(),
        chunks.len(),
        config.chunk_size,
        config.chunk_overlap
    );

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u32, text: &str) -> DocumentPage {
        DocumentPage {
            number,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_default_config_matches_settings() {
        let config = ChunkConfig::default();
        assert_eq!(config.chunk_size, 600);
        assert_eq!(config.chunk_overlap, 300);
        assert_eq!(config.separators, vec!["\n\n", "\n", ".", "•"]);
    }

    #[test]
    fn test_chunks_keep_page_and_order() {
        let pages = vec![page(1, "Rathaus am Koblenzer Platz."), page(2, ""), page(3, "Kurpark.")];
        let chunks = chunk_pages(&pages, &ChunkConfig::default());

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].order, 0);
        assert_eq!(chunks[0].page, 1);
        assert_eq!(chunks[1].order, 1);
        assert_eq!(chunks[1].page, 3);
        assert_eq!(chunks[1].text, "Kurpark.");
    }

    #[test]
    fn test_short_bullet_list_is_never_split() {
        let bullets = "• CDU Fraktion im Stadtrat\n• SPD Fraktion im Stadtrat\n• FDP Gruppe im Stadtrat";
        let intro = format!("Politik in der Stadt. {}", "Der Stadtrat tagt regelmäßig im Rathaus. ".repeat(9));
        let outro = format!("Weitere Informationen. {}", "Die Sitzungen sind öffentlich zugänglich. ".repeat(9));
        let text = format!("{}\n\n{}\n\n{}", intro.trim(), bullets, outro.trim());

        let chunks = chunk_pages(&[page(1, &text)], &ChunkConfig::default());

        assert!(chunks.len() > 1, "expected several chunks, got {:?}", chunks);
        assert!(
            chunks.iter().any(|c| c.text.contains(bullets)),
            "no chunk holds the whole list"
        );

        let full_lines: Vec<&str> = bullets.lines().collect();
        for chunk in &chunks {
            for line in chunk.text.lines().filter(|l| l.starts_with('•')) {
                assert!(full_lines.contains(&line), "bullet cut mid-line: {:?}", line);
            }
        }
    }
}
