use super::types::{RecognizedPage, TextRecognizer};
use super::RecognitionError;
use crate::pipeline::import::DocumentUpload;

/// Page separator in plain-text exports of scanned records.
const FORM_FEED: char = '\u{000C}';

/// Reads documents that already carry a text layer, exported as UTF-8.
///
/// Pages are separated by form feeds. The engine has no confidence signal of
/// its own, so every page gets the configured placeholder value.
pub struct PlainTextRecognizer {
    confidence: u8,
}

impl PlainTextRecognizer {
    pub fn new(confidence: u8) -> Self {
        Self {
            confidence: confidence.min(100),
        }
    }
}

impl TextRecognizer for PlainTextRecognizer {
    fn recognize(&self, upload: &DocumentUpload) -> Result<Vec<RecognizedPage>, RecognitionError> {
        let text = std::str::from_utf8(&upload.bytes)
            .map_err(|e| RecognitionError::UnsupportedEncoding(e.to_string()))?;

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(text
            .split(FORM_FEED)
            .enumerate()
            .map(|(i, page)| RecognizedPage::new(i + 1, page, self.confidence))
            .collect())
    }

    fn name(&self) -> &'static str {
        "plain_text"
    }
}

/// Stand-in when no OCR engine is wired. Always fails, so the adapter
/// degrades to its placeholder page.
pub struct UnavailableRecognizer;

impl TextRecognizer for UnavailableRecognizer {
    fn recognize(&self, _upload: &DocumentUpload) -> Result<Vec<RecognizedPage>, RecognitionError> {
        Err(RecognitionError::Unavailable("no OCR engine configured".into()))
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}

/// Canned engine for tests and demos.
pub struct MockRecognizer {
    pages: Vec<String>,
    confidence: u8,
    failure: Option<String>,
}

impl MockRecognizer {
    pub fn new(pages: &[&str], confidence: u8) -> Self {
        Self {
            pages: pages.iter().map(|p| p.to_string()).collect(),
            confidence,
            failure: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            pages: Vec::new(),
            confidence: 0,
            failure: Some(reason.to_string()),
        }
    }
}

impl TextRecognizer for MockRecognizer {
    fn recognize(&self, _upload: &DocumentUpload) -> Result<Vec<RecognizedPage>, RecognitionError> {
        if let Some(reason) = &self.failure {
            return Err(RecognitionError::Unavailable(reason.clone()));
        }
        Ok(self
            .pages
            .iter()
            .enumerate()
            .map(|(i, text)| RecognizedPage::new(i + 1, text.as_str(), self.confidence))
            .collect())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
