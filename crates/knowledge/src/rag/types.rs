//! RAG answer types.

use crate::types::ScoredChunk;
use regio_prompt::Language;
use serde::{Deserialize, Serialize};

/// Which stage produced the final answer text.
///
/// Only the text is shown to users; provenance exists for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Canned greeting, no retrieval
    Greeting,
    /// Model answer over retrieved context
    Synthesized,
    /// Bullet lines pulled straight from retrieved chunks
    Extracted,
    /// Raw passage prefixes from a second retrieval
    Fallback,
    /// Fixed sentinel, nothing relevant was found
    NotFound,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Greeting => "greeting",
            Provenance::Synthesized => "synthesized",
            Provenance::Extracted => "extracted",
            Provenance::Fallback => "fallback",
            Provenance::NotFound => "not_found",
        }
    }
}

/// Final answer to one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub provenance: Provenance,
    pub language: Language,
}

/// Output of the answer synthesizer.
#[derive(Debug, Clone)]
pub struct Synthesis {
    /// Model reply, trimmed
    pub answer: String,

    /// Chunks that were placed in the prompt, in retrieval order
    pub sources: Vec<ScoredChunk>,
}
