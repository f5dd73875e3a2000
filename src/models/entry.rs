use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{DateConfidence, EntryType, Severity};

/// One clinical observation extracted from one recognized page.
///
/// Built once by the entry extractor and never mutated afterwards.
/// `document_id` is a lookup key only; the owning `StrDocument` holds the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalEntry {
    pub id: Uuid,
    pub document_id: Uuid,
    pub page_number: usize,
    /// Best-effort service date. Falls back to the extraction date when the
    /// page carries no parseable date (see `date_confidence`).
    pub date: NaiveDate,
    pub date_confidence: DateConfidence,
    pub entry_type: EntryType,
    pub chief_complaint: Option<String>,
    pub diagnoses: Vec<String>,
    pub symptoms: Vec<String>,
    pub chronicity_indicators: Vec<String>,
    pub aggravation_indicators: Vec<String>,
    pub severity: Option<Severity>,
    pub raw_text: String,
    /// Extraction confidence, 0-100.
    pub confidence: u8,
}

impl MedicalEntry {
    /// Labels this entry contributes to condition grouping.
    ///
    /// Every diagnosis is a label; the chief complaint only stands in when
    /// no diagnosis was captured. Sparse entries yield nothing.
    pub fn condition_labels(&self) -> Vec<&str> {
        if !self.diagnoses.is_empty() {
            return self.diagnoses.iter().map(String::as_str).collect();
        }
        self.chief_complaint.as_deref().into_iter().collect()
    }

    pub fn has_reliable_date(&self) -> bool {
        self.date_confidence == DateConfidence::Parsed
    }

    /// True when nothing clinical was captured from the page.
    pub fn is_sparse(&self) -> bool {
        self.chief_complaint.is_none() && self.diagnoses.is_empty() && self.symptoms.is_empty()
    }
}
