use serde::{Deserialize, Serialize};

use super::RecognitionError;
use crate::pipeline::import::DocumentUpload;

/// Text recognized on a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedPage {
    /// 1-based.
    pub page_number: usize,
    pub text: String,
    /// Engine-reported confidence, 0-100. Carried into every entry built
    /// from this page.
    pub confidence: u8,
}

impl RecognizedPage {
    pub fn new(page_number: usize, text: impl Into<String>, confidence: u8) -> Self {
        Self {
            page_number,
            text: text.into(),
            confidence: confidence.min(100),
        }
    }
}

/// Recognition engine abstraction (allows mocking for tests).
pub trait TextRecognizer {
    /// Convert a document into its pages, in any order.
    fn recognize(&self, upload: &DocumentUpload) -> Result<Vec<RecognizedPage>, RecognitionError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
