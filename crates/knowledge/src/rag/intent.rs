//! Greeting detection.

use regio_core::RagSettings;
use regio_prompt::Language;

/// Classified purpose of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// One of the curated greeting tokens, in the token's language
    Greeting(Language),
    /// Anything else goes through retrieval
    Question,
}

/// Exact-match greeting classifier.
///
/// A query is a greeting only if, trimmed and lowercased, it equals one of
/// the configured tokens. There is no fuzzy matching.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    greetings: Vec<(String, Language)>,
}

impl IntentClassifier {
    pub fn new<'a>(greetings: impl IntoIterator<Item = (&'a str, Language)>) -> Self {
        Self {
            greetings: greetings
                .into_iter()
                .map(|(token, language)| (token.trim().to_lowercase(), language))
                .collect(),
        }
    }

    pub fn from_settings(settings: &RagSettings) -> Self {
        Self::new(
            settings
                .greetings
                .entries()
                .map(|(tag, token)| (token, Language::from_tag(tag))),
        )
    }

    pub fn classify(&self, text: &str) -> Intent {
        let normalized = text.trim().to_lowercase();

        self.greetings
            .iter()
            .find(|(token, _)| *token == normalized)
            .map(|(_, language)| Intent::Greeting(*language))
            .unwrap_or(Intent::Question)
    }

    pub fn is_greeting(&self, text: &str) -> bool {
        matches!(self.classify(text), Intent::Greeting(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IntentClassifier {
        IntentClassifier::from_settings(&RagSettings::default())
    }

    #[test]
    fn test_every_greeting_token_matches() {
        let classifier = classifier();
        for token in ["hi", "hello", "hey", "greetings", "hallo", "servus", "moin"] {
            assert!(classifier.is_greeting(token), "{} not a greeting", token);
            assert!(classifier.is_greeting(&format!("  {}\n", token.to_uppercase())));
        }
    }

    #[test]
    fn test_greeting_carries_its_language() {
        let classifier = classifier();
        assert_eq!(classifier.classify("Hallo"), Intent::Greeting(Language::German));
        assert_eq!(classifier.classify(" moin "), Intent::Greeting(Language::German));
        assert_eq!(classifier.classify("Hello"), Intent::Greeting(Language::English));
    }

    #[test]
    fn test_no_fuzzy_matching() {
        let classifier = classifier();
        assert_eq!(classifier.classify("hallo!"), Intent::Question);
        assert_eq!(classifier.classify("hi there"), Intent::Question);
        assert_eq!(classifier.classify("Hallo, wer ist Bürgermeister?"), Intent::Question);
        assert_eq!(classifier.classify(""), Intent::Question);
    }
}
