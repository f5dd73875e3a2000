use std::collections::HashSet;

use chrono::NaiveDateTime;
use uuid::Uuid;

use super::classify::{EntryClassifier, KeywordClassifier};
use super::patterns;
use super::ExtractionError;
use crate::models::{DateConfidence, MedicalEntry};
use crate::pipeline::recognition::RecognizedPage;

/// Per-document inputs shared by every page extraction.
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    pub document_id: Uuid,
    /// Stands in for the service date of pages without a parseable one.
    pub extracted_at: NaiveDateTime,
    /// Confidence points removed from entries with a fallback date.
    pub date_fallback_penalty: u8,
}

/// Entry extraction stage: one `MedicalEntry` per recognized page.
pub trait EntryExtractor: Send + Sync {
    fn extract(
        &self,
        pages: &[RecognizedPage],
        context: &ExtractionContext,
    ) -> Result<Vec<MedicalEntry>, ExtractionError>;
}

/// Lexical extractor: keyword classification plus marker/regex captures.
pub struct KeywordEntryExtractor {
    classifier: Box<dyn EntryClassifier>,
}

impl Default for KeywordEntryExtractor {
    fn default() -> Self {
        Self::new(Box::new(KeywordClassifier))
    }
}

impl KeywordEntryExtractor {
    pub fn new(classifier: Box<dyn EntryClassifier>) -> Self {
        Self { classifier }
    }

    /// Build the entry for a single page. Pure: depends only on its inputs
    /// (plus a fresh id).
    pub fn extract_page(&self, page: &RecognizedPage, context: &ExtractionContext) -> MedicalEntry {
        let text = page.text.as_str();

        let (date, date_confidence) = match patterns::parse_first_date(text) {
            Some(date) => (date, DateConfidence::Parsed),
            None => {
                tracing::debug!(
                    document_id = %context.document_id,
                    page = page.page_number,
                    "No parseable date on page, using extraction date"
                );
                (context.extracted_at.date(), DateConfidence::Fallback)
            }
        };

        let confidence = match date_confidence {
            DateConfidence::Parsed => page.confidence,
            DateConfidence::Fallback => page.confidence.saturating_sub(context.date_fallback_penalty),
        };

        MedicalEntry {
            id: Uuid::new_v4(),
            document_id: context.document_id,
            page_number: page.page_number,
            date,
            date_confidence,
            entry_type: self.classifier.classify(text),
            chief_complaint: patterns::capture_chief_complaint(text),
            diagnoses: patterns::capture_diagnoses(text),
            symptoms: patterns::detect_symptoms(text),
            chronicity_indicators: patterns::detect_chronicity_indicators(text),
            aggravation_indicators: patterns::detect_aggravation_indicators(text),
            severity: patterns::detect_severity(text),
            raw_text: page.text.clone(),
            confidence,
        }
    }
}

impl EntryExtractor for KeywordEntryExtractor {
    fn extract(
        &self,
        pages: &[RecognizedPage],
        context: &ExtractionContext,
    ) -> Result<Vec<MedicalEntry>, ExtractionError> {
        // Entries are keyed by page, so a page may appear only once.
        let mut seen = HashSet::with_capacity(pages.len());
        if let Some(page) = pages.iter().find(|p| !seen.insert(p.page_number)) {
            return Err(ExtractionError::PageFailed {
                page: page.page_number,
                reason: "duplicate page number".into(),
            });
        }

        let entries: Vec<MedicalEntry> = pages
            .iter()
            .map(|page| self.extract_page(page, context))
            .collect();

        let fallback_dates = entries.iter().filter(|e| !e.has_reliable_date()).count();
        let sparse = entries.iter().filter(|e| e.is_sparse()).count();
        tracing::info!(
            document_id = %context.document_id,
            pages = pages.len(),
            entries = entries.len(),
            fallback_dates,
            sparse,
            "Entry extraction complete"
        );

        Ok(entries)
    }
}
