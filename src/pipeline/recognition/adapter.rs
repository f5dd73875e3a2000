use super::sanitize::sanitize_recognized_text;
use super::types::{RecognizedPage, TextRecognizer};
use crate::pipeline::import::DocumentUpload;

/// Text of the synthetic page returned when recognition fails.
pub const RECOGNITION_UNAVAILABLE_TEXT: &str = "[Text recognition unavailable for this document]";

/// Placeholder page standing in for a document the engine could not read.
pub fn placeholder_page(reason: &str) -> RecognizedPage {
    RecognizedPage::new(1, format!("{RECOGNITION_UNAVAILABLE_TEXT} ({reason})"), 0)
}

/// Failure-tolerant wrapper around a recognition engine.
pub struct RecognitionAdapter {
    engine: Box<dyn TextRecognizer + Send + Sync>,
}

impl RecognitionAdapter {
    pub fn new(engine: Box<dyn TextRecognizer + Send + Sync>) -> Self {
        Self { engine }
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Pages ordered by page number with sanitized text.
    ///
    /// Never fails: an engine error is logged and replaced by a single
    /// placeholder page so the pipeline keeps moving.
    pub fn recognize(&self, upload: &DocumentUpload) -> Vec<RecognizedPage> {
        match self.engine.recognize(upload) {
            Ok(mut pages) => {
                pages.sort_by_key(|p| p.page_number);
                for page in &mut pages {
                    page.text = sanitize_recognized_text(&page.text);
                }
                tracing::debug!(
                    engine = self.engine.name(),
                    file = %upload.filename,
                    pages = pages.len(),
                    "Recognition complete"
                );
                pages
            }
            Err(e) => {
                tracing::warn!(
                    engine = self.engine.name(),
                    file = %upload.filename,
                    error = %e,
                    "Recognition failed, continuing with placeholder page"
                );
                vec![placeholder_page(&e.to_string())]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::recognition::engines::{MockRecognizer, UnavailableRecognizer};
    use crate::pipeline::recognition::RecognitionError;

    fn upload() -> DocumentUpload {
        DocumentUpload::new("vol1.pdf", b"%PDF-1.4".to_vec(), None)
    }

    struct ShuffledRecognizer;

    impl TextRecognizer for ShuffledRecognizer {
        fn recognize(
            &self,
            _upload: &DocumentUpload,
        ) -> Result<Vec<RecognizedPage>, RecognitionError> {
            Ok(vec![
                RecognizedPage::new(3, "third", 70),
                RecognizedPage::new(1, "  first  \n\n", 70),
                RecognizedPage::new(2, "second", 70),
            ])
        }

        fn name(&self) -> &'static str {
            "shuffled"
        }
    }

    #[test]
    fn failing_engine_yields_single_placeholder() {
        let adapter = RecognitionAdapter::new(Box::new(MockRecognizer::failing("engine crashed")));
        let pages = adapter.recognize(&upload());

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].confidence, 0);
        assert!(pages[0].text.starts_with(RECOGNITION_UNAVAILABLE_TEXT));
        assert!(pages[0].text.contains("engine crashed"));
    }

    #[test]
    fn unavailable_engine_degrades() {
        let adapter = RecognitionAdapter::new(Box::new(UnavailableRecognizer));
        let pages = adapter.recognize(&upload());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].text.contains("unavailable"));
    }

    #[test]
    fn pages_are_ordered_and_sanitized() {
        let adapter = RecognitionAdapter::new(Box::new(ShuffledRecognizer));
        let pages = adapter.recognize(&upload());

        let numbers: Vec<usize> = pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(pages[0].text, "first");
    }

    #[test]
    fn zero_pages_pass_through() {
        let adapter = RecognitionAdapter::new(Box::new(MockRecognizer::new(&[], 75)));
        assert!(adapter.recognize(&upload()).is_empty());
    }
}
