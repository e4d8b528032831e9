//! Prompt and message types.

use serde::{Deserialize, Serialize};

/// Response language.
///
/// Exactly two variants exist. Any detected tag other than `de` is answered
/// in English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "de")]
    German,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// All variants, German first.
    pub const ALL: [Language; 2] = [Language::German, Language::English];

    /// Map a two-letter tag onto a response language.
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().eq_ignore_ascii_case("de") {
            Language::German
        } else {
            Language::English
        }
    }

    /// Two-letter tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::German => "de",
            Language::English => "en",
        }
    }
}

/// User-visible strings that exist in every response language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// Canned reply to a greeting
    Greeting,
    /// Sentence introducing extracted political groups
    PoliticalGroupsIntro,
    /// Sentence introducing raw fallback passages
    FallbackIntro,
    /// Final answer when nothing relevant exists
    NotFound,
    /// Instruction telling the model to use only the context
    InstructionPrefix,
    /// Label in front of the question
    QuestionLabel,
    /// Label the model continues after
    AnswerLabel,
}

impl MessageKind {
    pub const ALL: [MessageKind; 7] = [
        MessageKind::Greeting,
        MessageKind::PoliticalGroupsIntro,
        MessageKind::FallbackIntro,
        MessageKind::NotFound,
        MessageKind::InstructionPrefix,
        MessageKind::QuestionLabel,
        MessageKind::AnswerLabel,
    ];
}

/// A fully rendered QA prompt ready for the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// Prompt text sent as the user message
    pub user: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Language of the instruction and labels
    pub language: Language,

    /// Number of context passages embedded
    #[serde(rename = "contextPassages")]
    pub context_passages: usize,

    /// Length of the joined context in characters
    #[serde(rename = "contextChars")]
    pub context_chars: usize,
}
