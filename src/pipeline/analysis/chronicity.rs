use chrono::NaiveDate;

use super::AnalysisConfig;
use crate::models::{ChronicitySignature, FrequencyClass, MedicalEntry};

/// Classify a mean gap between visits, in days.
pub fn classify_frequency(mean_gap_days: f64) -> FrequencyClass {
    if mean_gap_days < 30.0 {
        FrequencyClass::Frequent
    } else if mean_gap_days < 90.0 {
        FrequencyClass::Regular
    } else if mean_gap_days < 180.0 {
        FrequencyClass::Periodic
    } else {
        FrequencyClass::Occasional
    }
}

/// Chronicity signature for one condition group.
///
/// `has_pattern` counts every entry. Timespan and frequency use the entry
/// dates, optionally without fallback dates.
pub fn chronicity_signature(entries: &[&MedicalEntry], config: &AnalysisConfig) -> ChronicitySignature {
    let entry_count = entries.len();

    let mut dates: Vec<NaiveDate> = entries
        .iter()
        .filter(|e| !config.exclude_fallback_dates || e.has_reliable_date())
        .map(|e| e.date)
        .collect();
    dates.sort();

    let timespan_days = match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => (*last - *first).num_days(),
        _ => 0,
    };

    // Consecutive gaps sum to the timespan, so the mean is timespan / gaps.
    let frequency = (dates.len() >= 2 && timespan_days > 0)
        .then(|| classify_frequency(timespan_days as f64 / (dates.len() - 1) as f64));

    ChronicitySignature {
        has_pattern: entry_count >= 2,
        entry_count,
        timespan_days,
        frequency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateConfidence, EntryType};
    use chrono::Duration;
    use uuid::Uuid;

    fn base_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2007, 1, 1).unwrap()
    }

    fn make_entry(offset_days: i64, confidence: DateConfidence) -> MedicalEntry {
        MedicalEntry {
            id: Uuid::new_v4(),
            document_id: Uuid::nil(),
            page_number: 1,
            date: base_date() + Duration::days(offset_days),
            date_confidence: confidence,
            entry_type: EntryType::SickCall,
            chief_complaint: None,
            diagnoses: vec!["lumbar strain".into()],
            symptoms: vec![],
            chronicity_indicators: vec![],
            aggravation_indicators: vec![],
            severity: None,
            raw_text: String::new(),
            confidence: 75,
        }
    }

    fn signature(offsets: &[i64]) -> ChronicitySignature {
        let entries: Vec<MedicalEntry> = offsets
            .iter()
            .map(|o| make_entry(*o, DateConfidence::Parsed))
            .collect();
        let refs: Vec<&MedicalEntry> = entries.iter().collect();
        chronicity_signature(&refs, &AnalysisConfig::default())
    }

    #[test]
    fn single_entry_has_no_pattern() {
        let sig = signature(&[0]);
        assert!(!sig.has_pattern);
        assert_eq!(sig.entry_count, 1);
        assert_eq!(sig.timespan_days, 0);
        assert!(sig.frequency.is_none());
    }

    #[test]
    fn two_entries_is_a_pattern() {
        let sig = signature(&[0, 400]);
        assert!(sig.has_pattern);
        assert_eq!(sig.timespan_days, 400);
    }

    #[test]
    fn frequency_boundaries() {
        assert_eq!(signature(&[0, 29]).frequency, Some(FrequencyClass::Frequent));
        assert_eq!(signature(&[0, 30]).frequency, Some(FrequencyClass::Regular));
        assert_eq!(signature(&[0, 89]).frequency, Some(FrequencyClass::Regular));
        assert_eq!(signature(&[0, 90]).frequency, Some(FrequencyClass::Periodic));
        assert_eq!(signature(&[0, 179]).frequency, Some(FrequencyClass::Periodic));
        assert_eq!(signature(&[0, 180]).frequency, Some(FrequencyClass::Occasional));
    }

    #[test]
    fn mean_gap_over_several_visits() {
        let sig = signature(&[40, 0, 20]);
        assert_eq!(sig.timespan_days, 40);
        assert_eq!(sig.frequency, Some(FrequencyClass::Frequent));
    }

    #[test]
    fn same_day_entries_have_no_frequency() {
        let sig = signature(&[5, 5, 5]);
        assert!(sig.has_pattern);
        assert_eq!(sig.timespan_days, 0);
        assert!(sig.frequency.is_none());
    }

    #[test]
    fn fallback_dates_count_by_default() {
        let entries = vec![
            make_entry(0, DateConfidence::Parsed),
            make_entry(10, DateConfidence::Fallback),
        ];
        let refs: Vec<&MedicalEntry> = entries.iter().collect();
        let sig = chronicity_signature(&refs, &AnalysisConfig::default());
        assert_eq!(sig.timespan_days, 10);
        assert_eq!(sig.frequency, Some(FrequencyClass::Frequent));
    }

    #[test]
    fn fallback_dates_can_be_excluded() {
        let entries = vec![
            make_entry(0, DateConfidence::Parsed),
            make_entry(3000, DateConfidence::Fallback),
        ];
        let refs: Vec<&MedicalEntry> = entries.iter().collect();
        let config = AnalysisConfig {
            exclude_fallback_dates: true,
        };
        let sig = chronicity_signature(&refs, &config);
        assert!(sig.has_pattern);
        assert_eq!(sig.entry_count, 2);
        assert_eq!(sig.timespan_days, 0);
        assert!(sig.frequency.is_none());
    }

    #[test]
    fn classify_frequency_direct() {
        assert_eq!(classify_frequency(29.9), FrequencyClass::Frequent);
        assert_eq!(classify_frequency(30.0), FrequencyClass::Regular);
        assert_eq!(classify_frequency(90.0), FrequencyClass::Periodic);
        assert_eq!(classify_frequency(180.0), FrequencyClass::Occasional);
    }
}
