//! Retrieval-augmented answering.

pub mod engine;
pub mod fallback;
pub mod intent;
pub mod language;
pub mod postprocess;
pub mod session;
pub mod synthesize;
pub mod types;

pub use engine::AnswerEngine;
pub use fallback::FallbackResolver;
pub use intent::{Intent, IntentClassifier};
pub use language::LanguageDetector;
pub use postprocess::PoliticalGroupExtractor;
pub use session::{
    ChatSession, ConversationLog, JsonlConversationLog, LogEntry, MemoryConversationLog, Role,
};
pub use synthesize::AnswerSynthesizer;
pub use types::{Answer, Provenance, Synthesis};
