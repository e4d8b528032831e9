//! Bilingual message catalog.
//!
//! Every user-visible sentence lives in one table keyed by language and
//! message kind, so the German and English variants cannot drift apart.

use crate::builder::render_template;
use crate::types::{Language, MessageKind};
use regio_core::AppResult;
use std::collections::HashMap;

fn template(language: Language, kind: MessageKind) -> &'static str {
    use Language::{English, German};
    use MessageKind::*;

    match (language, kind) {
        (German, Greeting) => {
            "Hallo, ich bin der RegioWizard_KI Chatbot! 😊 Frag mich alles über {{town}}!"
        }
        (English, Greeting) => "Hi, I'm RegioWizard_KI Chatbot! 😊 Ask me anything about {{town}}!",

        (German, PoliticalGroupsIntro) => "Die politischen Gruppierungen in {{town}} sind:",
        (English, PoliticalGroupsIntro) => "The political groups in {{town}} are:",

        (German, FallbackIntro) => "Hier sind die relevantesten Informationen:",
        (English, FallbackIntro) => "Here’s the most relevant information found:",

        (German, NotFound) => "Nicht im bereitgestellten Dokument gefunden.",
        (English, NotFound) => "Not found in the provided document.",

        (German, InstructionPrefix) => {
            "Du bist ein hilfsbereiter Assistent mit Wissen über {{town}}. \
             Verwende AUSSCHLIESSLICH den untenstehenden Kontext, um die Frage des Nutzers zu beantworten."
        }
        (English, InstructionPrefix) => {
            "You are a helpful assistant knowledgeable about {{town}}. \
             Use ONLY the context below to answer the user's question."
        }

        (German, QuestionLabel) => "Frage",
        (English, QuestionLabel) => "Question",

        (German, AnswerLabel) => "Antwort",
        (English, AnswerLabel) => "Answer",
    }
}

/// Rendered messages for one town.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    town: String,
    messages: HashMap<(Language, MessageKind), String>,
}

impl MessageCatalog {
    /// Render every message for `town`.
    pub fn new(town: impl Into<String>) -> AppResult<Self> {
        let town = town.into();
        let mut variables = HashMap::new();
        variables.insert("town".to_string(), town.clone());

        let mut messages = HashMap::new();
        for language in Language::ALL {
            for kind in MessageKind::ALL {
                let rendered = render_template(template(language, kind), &variables)?;
                messages.insert((language, kind), rendered);
            }
        }

        tracing::debug!("Rendered {} catalog messages for {}", messages.len(), town);

        Ok(Self { town, messages })
    }

    /// Town the catalog was rendered for.
    pub fn town(&self) -> &str {
        &self.town
    }

    /// Message text in the given language.
    pub fn get(&self, language: Language, kind: MessageKind) -> &str {
        // The table is filled for every (language, kind) pair in `new`.
        self.messages
            .get(&(language, kind))
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Message followed by a blank line and `body`.
    pub fn introduce(&self, language: Language, kind: MessageKind, body: &str) -> String {
        format!("{}\n\n{}", self.get(language, kind), body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_message_is_rendered() {
        let catalog = MessageCatalog::new("Bad Breisig").unwrap();
        for language in Language::ALL {
            for kind in MessageKind::ALL {
                let text = catalog.get(language, kind);
                assert!(!text.is_empty(), "{:?}/{:?} is empty", language, kind);
                assert!(!text.contains("{{"), "{:?}/{:?} not rendered", language, kind);
            }
        }
    }

    #[test]
    fn test_town_is_substituted() {
        let catalog = MessageCatalog::new("Bad Breisig").unwrap();
        assert_eq!(
            catalog.get(Language::German, MessageKind::Greeting),
            "Hallo, ich bin der RegioWizard_KI Chatbot! 😊 Frag mich alles über Bad Breisig!"
        );
        assert_eq!(
            catalog.get(Language::English, MessageKind::PoliticalGroupsIntro),
            "The political groups in Bad Breisig are:"
        );
    }

    #[test]
    fn test_variants_differ_per_language() {
        let catalog = MessageCatalog::new("Sinzig").unwrap();
        for kind in MessageKind::ALL {
            assert_ne!(
                catalog.get(Language::German, kind),
                catalog.get(Language::English, kind)
            );
        }
    }

    #[test]
    fn test_introduce() {
        let catalog = MessageCatalog::new("Sinzig").unwrap();
        let text = catalog.introduce(Language::German, MessageKind::FallbackIntro, "Rathaus");
        assert_eq!(text, "Hier sind die relevantesten Informationen:\n\nRathaus");
    }
}
