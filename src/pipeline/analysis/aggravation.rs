use crate::models::{AggravationSignature, MedicalEntry, Severity};
use crate::pipeline::extraction::patterns::has_pre_existing_language;

/// Group size from which visit volume alone counts as escalation.
const INCREASED_FREQUENCY_MIN_ENTRIES: usize = 3;

/// Aggravation signature for one condition group.
///
/// Worsening, frequency and severity signals only produce a pattern when
/// some entry documents the condition as pre-existing.
pub fn aggravation_signature(entries: &[&MedicalEntry]) -> AggravationSignature {
    let pre_existing_evidence = entries.iter().any(|e| has_pre_existing_language(&e.raw_text));
    let worsening_evidence = entries.iter().any(|e| !e.aggravation_indicators.is_empty());
    let increased_frequency = entries.len() >= INCREASED_FREQUENCY_MIN_ENTRIES;
    let increased_severity = entries.iter().any(|e| e.severity == Some(Severity::Severe))
        && entries.iter().any(|e| e.severity == Some(Severity::Mild));

    AggravationSignature {
        pre_existing_evidence,
        worsening_evidence,
        increased_frequency,
        increased_severity,
        has_pattern: pre_existing_evidence
            && (worsening_evidence || increased_frequency || increased_severity),
    }
}
