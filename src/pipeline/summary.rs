//! Document-level summary derived from entries and opportunities.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{BodySystem, ConfidenceTier, DateRange, StrDocument};
use crate::pipeline::analysis::{group_entries, infer_body_system};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub total_entries: usize,
    pub date_range: Option<DateRange>,
    /// Sorted, without `other`.
    pub body_systems_affected: Vec<BodySystem>,
    /// One label per condition group, ordered by grouping key.
    pub unique_conditions: Vec<String>,
    pub total_claim_opportunities: usize,
    pub high_confidence_opportunities: usize,
}

impl DocumentSummary {
    /// Works on any snapshot, so an errored document still reports whatever
    /// was extracted before the failure.
    pub fn from_document(document: &StrDocument) -> Self {
        let unique_conditions: Vec<String> = group_entries(&document.entries)
            .into_values()
            .map(|group| group.label)
            .collect();

        let body_systems_affected: BTreeSet<BodySystem> = unique_conditions
            .iter()
            .map(|label| infer_body_system(label))
            .chain(document.opportunities.iter().map(|o| o.body_system))
            .filter(|system| *system != BodySystem::Other)
            .collect();

        Self {
            total_entries: document.entries.len(),
            date_range: document.date_range,
            body_systems_affected: body_systems_affected.into_iter().collect(),
            unique_conditions,
            total_claim_opportunities: document.opportunities.len(),
            high_confidence_opportunities: document
                .opportunities
                .iter()
                .filter(|o| o.confidence == ConfidenceTier::High)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateConfidence, EntryType, FileKind, MedicalEntry};
    use crate::pipeline::analysis::{analyze, AnalysisConfig};
    use crate::pipeline::opportunity::{
        OpportunityGenerator, RuleBasedOpportunityGenerator, StaticDisabilityProfile,
    };
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn make_entry(document_id: Uuid, day: u32, diagnoses: &[&str]) -> MedicalEntry {
        MedicalEntry {
            id: Uuid::new_v4(),
            document_id,
            page_number: day as usize,
            date: NaiveDate::from_ymd_opt(2005, 7, day).unwrap(),
            date_confidence: DateConfidence::Parsed,
            entry_type: EntryType::SickCall,
            chief_complaint: None,
            diagnoses: diagnoses.iter().map(|d| d.to_string()).collect(),
            symptoms: vec![],
            chronicity_indicators: vec![],
            aggravation_indicators: vec![],
            severity: None,
            raw_text: String::new(),
            confidence: 75,
        }
    }

    fn make_document() -> StrDocument {
        StrDocument::new("str.pdf", 2048, FileKind::Pdf, None, Utc::now().naive_utc())
    }

    #[test]
    fn empty_document_summary() {
        let summary = DocumentSummary::from_document(&make_document());
        assert_eq!(summary.total_entries, 0);
        assert!(summary.date_range.is_none());
        assert!(summary.body_systems_affected.is_empty());
        assert!(summary.unique_conditions.is_empty());
        assert_eq!(summary.total_claim_opportunities, 0);
        assert_eq!(summary.high_confidence_opportunities, 0);
    }

    #[test]
    fn summary_counts_conditions_and_systems() {
        let mut document = make_document();
        let id = document.id;
        document.start_processing(10).unwrap();
        document
            .record_entries(vec![
                make_entry(id, 1, &["Lumbar strain"]),
                make_entry(id, 5, &["lumbar strain", "tinnitus"]),
                make_entry(id, 9, &["lumbar strain"]),
                make_entry(id, 12, &["fatigue"]),
                make_entry(id, 20, &[]),
            ])
            .unwrap();

        let analyses = analyze(&document.entries, &AnalysisConfig::default());
        let opportunities = RuleBasedOpportunityGenerator
            .generate(&analyses, &StaticDisabilityProfile::default())
            .unwrap();
        drop(analyses);
        document.record_opportunities(opportunities).unwrap();

        let summary = DocumentSummary::from_document(&document);
        assert_eq!(summary.total_entries, 5);
        assert_eq!(summary.unique_conditions, vec!["fatigue", "Lumbar strain", "tinnitus"]);
        assert_eq!(
            summary.body_systems_affected,
            vec![BodySystem::Musculoskeletal, BodySystem::Auditory]
        );
        assert_eq!(summary.total_claim_opportunities, 3);
        assert_eq!(summary.high_confidence_opportunities, 1);

        let range = summary.date_range.unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2005, 7, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2005, 7, 20).unwrap());
    }

    #[test]
    fn summary_serializes_snake_case() {
        let json = serde_json::to_value(DocumentSummary::from_document(&make_document())).unwrap();
        assert!(json.get("total_claim_opportunities").is_some());
        assert!(json.get("body_systems_affected").is_some());
    }
}
