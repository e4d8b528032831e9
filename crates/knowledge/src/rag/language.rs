//! Query language detection.

use regio_core::RagSettings;
use regio_prompt::Language;
use whatlang::{Detector, Lang};

/// Inputs with fewer letters than this are not worth a statistical guess.
const MIN_LETTERS: usize = 3;

/// Best-effort language detector that never fails.
///
/// Detection is restricted to the configured languages. Anything the
/// detector cannot classify gets the default tag.
pub struct LanguageDetector {
    detector: Detector,
    default_tag: String,
}

impl std::fmt::Debug for LanguageDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageDetector")
            .field("default_tag", &self.default_tag)
            .finish()
    }
}

impl LanguageDetector {
    /// Detector limited to `tags`, answering `default_tag` when unsure.
    ///
    /// Unknown tags are ignored with a warning.
    pub fn new(tags: &[String], default_tag: impl Into<String>) -> Self {
        let allowlist: Vec<Lang> = tags
            .iter()
            .filter_map(|tag| {
                let lang = lang_for_tag(tag);
                if lang.is_none() {
                    tracing::warn!("Ignoring unsupported detection language '{}'", tag);
                }
                lang
            })
            .collect();

        Self {
            detector: Detector::with_allowlist(allowlist),
            default_tag: default_tag.into(),
        }
    }

    pub fn from_settings(settings: &RagSettings) -> Self {
        Self::new(&settings.detection_languages, settings.default_language.clone())
    }

    /// Two-letter tag of the text's language, or the default tag.
    pub fn detect(&self, text: &str) -> String {
        if text.chars().filter(|c| c.is_alphabetic()).count() < MIN_LETTERS {
            tracing::debug!("Text too short for language detection, using '{}'", self.default_tag);
            return self.default_tag.clone();
        }

        match self.detector.detect_lang(text).and_then(tag_for_lang) {
            Some(tag) => tag.to_string(),
            None => {
                tracing::warn!(
                    "Could not detect language of query, using '{}'",
                    self.default_tag
                );
                self.default_tag.clone()
            }
        }
    }

    /// Response language for the text: German for `de`, English otherwise.
    pub fn detect_language(&self, text: &str) -> Language {
        Language::from_tag(&self.detect(text))
    }
}

fn lang_for_tag(tag: &str) -> Option<Lang> {
    match tag.trim().to_ascii_lowercase().as_str() {
        "de" => Some(Lang::Deu),
        "en" => Some(Lang::Eng),
        "fr" => Some(Lang::Fra),
        "it" => Some(Lang::Ita),
        "es" => Some(Lang::Spa),
        "nl" => Some(Lang::Nld),
        "pt" => Some(Lang::Por),
        "pl" => Some(Lang::Pol),
        "tr" => Some(Lang::Tur),
        _ => None,
    }
}

fn tag_for_lang(lang: Lang) -> Option<&'static str> {
    match lang {
        Lang::Deu => Some("de"),
        Lang::Eng => Some("en"),
        Lang::Fra => Some("fr"),
        Lang::Ita => Some("it"),
        Lang::Spa => Some("es"),
        Lang::Nld => Some("nl"),
        Lang::Por => Some("pt"),
        Lang::Pol => Some("pl"),
        Lang::Tur => Some("tr"),
        _ => None,
    }
}
