//! Source document loading and per-page text extraction.

use crate::types::DocumentPage;
use regio_core::{AppError, AppResult};
use std::fs;
use std::path::Path;

/// Page separator inside plain-text documents.
pub const PAGE_BREAK: char = '\x0C';

/// Document format classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Pdf,
    Markdown,
    PlainText,
    Unknown,
}

impl ContentType {
    /// Detect content type from file extension.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("pdf") => Self::Pdf,
            Some("md") | Some("markdown") => Self::Markdown,
            Some("txt") => Self::PlainText,
            _ => Self::Unknown,
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Markdown => "markdown",
            Self::PlainText => "text",
            Self::Unknown => "unknown",
        }
    }
}

/// Load a document and extract its text page by page.
///
/// PDFs are read with lopdf. Text and markdown files are split into pages
/// on form feed characters.
pub fn load_pages(path: &Path) -> AppResult<Vec<DocumentPage>> {
    let content_type = ContentType::from_path(path);

    tracing::debug!("Loading {} document {:?}", content_type.as_str(), path);

    let pages = match content_type {
        ContentType::Pdf => load_pdf_pages(path)?,
        ContentType::Markdown | ContentType::PlainText => {
            let raw = fs::read_to_string(path)
                .map_err(|e| AppError::Document(format!("Failed to read {:?}: {}", path, e)))?;
            split_text_pages(&raw)
        }
        ContentType::Unknown => {
            return Err(AppError::Document(format!(
                "Unsupported document type: {:?}. Supported: pdf, txt, md",
                path
            )));
        }
    };

    tracing::info!("Loaded {} pages from {:?}", pages.len(), path);
    Ok(pages)
}

/// Split plain text into pages on form feed.
pub fn split_text_pages(raw: &str) -> Vec<DocumentPage> {
    raw.split(PAGE_BREAK)
        .enumerate()
        .map(|(i, text)| DocumentPage {
            number: i as u32 + 1,
            text: text.to_string(),
        })
        .collect()
}

fn load_pdf_pages(path: &Path) -> AppResult<Vec<DocumentPage>> {
    let document = lopdf::Document::load(path)
        .map_err(|e| AppError::Document(format!("Failed to open PDF {:?}: {}", path, e)))?;

    let mut pages = Vec::new();
    for number in document.get_pages().keys() {
        let text = document.extract_text(&[*number]).map_err(|e| {
            AppError::Document(format!(
                "Failed to extract text from page {} of {:?}: {}",
                number, path, e
            ))
        })?;
        pages.push(DocumentPage {
            number: *number,
            text,
        });
    }

    if pages.is_empty() {
        return Err(AppError::Document(format!("PDF {:?} has no pages", path)));
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_content_type_detection() {
        assert_eq!(
            ContentType::from_path(Path::new("bad_breisig_docs.pdf")),
            ContentType::Pdf
        );
        assert_eq!(
            ContentType::from_path(Path::new("SATZUNG.PDF")),
            ContentType::Pdf
        );
        assert_eq!(
            ContentType::from_path(Path::new("notes.md")),
            ContentType::Markdown
        );
        assert_eq!(
            ContentType::from_path(Path::new("corpus.txt")),
            ContentType::PlainText
        );
        assert_eq!(
            ContentType::from_path(Path::new("image.png")),
            ContentType::Unknown
        );
    }

    #[test]
    fn test_split_text_pages() {
        let pages = split_text_pages("Seite eins\x0CSeite zwei\x0C");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[0].text, "Seite eins");
        assert_eq!(pages[1].number, 2);
        assert_eq!(pages[1].text, "Seite zwei");
        assert_eq!(pages[2].text, "");
    }

    #[test]
    fn test_load_text_document() {
        let mut file = NamedTempFile::with_suffix(".txt").unwrap();
        write!(file, "Rathaus\x0CKurpark").unwrap();

        let pages = load_pages(file.path()).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].text, "Kurpark");
    }

    #[test]
    fn test_missing_document_is_document_error() {
        let result = load_pages(Path::new("/nonexistent/bad_breisig_docs.txt"));
        assert!(matches!(result, Err(AppError::Document(_))));
    }

    #[test]
    fn test_invalid_pdf_is_document_error() {
        let mut file = NamedTempFile::with_suffix(".pdf").unwrap();
        write!(file, "not a pdf").unwrap();

        let result = load_pages(file.path());
        assert!(matches!(result, Err(AppError::Document(_))));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = load_pages(Path::new("corpus.docx"));
        assert!(matches!(result, Err(AppError::Document(_))));
    }
}
