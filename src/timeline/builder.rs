use super::types::{TimelineEvent, TimelineEventKind};
use crate::models::{EntryType, MedicalEntry};

/// Lazily project entries into chronologically ordered timeline events.
///
/// Entries are ordered by (date, page number); events of one entry keep the
/// order diagnoses, symptoms, injury. An entry that yields none of these
/// still appears once as an encounter.
pub fn build_timeline(entries: &[MedicalEntry]) -> impl Iterator<Item = TimelineEvent> + '_ {
    let mut ordered: Vec<&MedicalEntry> = entries.iter().collect();
    ordered.sort_by_key(|e| (e.date, e.page_number));
    ordered.into_iter().flat_map(entry_events)
}

fn entry_events(entry: &MedicalEntry) -> Vec<TimelineEvent> {
    let event = |kind, description: String, condition: Option<&str>| TimelineEvent {
        date: entry.date,
        kind,
        description,
        condition: condition.map(str::to_string),
        entry_id: entry.id,
        page_number: entry.page_number,
    };

    let primary_label = entry.condition_labels().first().copied();
    let mut events = Vec::new();

    for diagnosis in &entry.diagnoses {
        events.push(event(
            TimelineEventKind::Diagnosis,
            format!("Diagnosed: {diagnosis}"),
            Some(diagnosis.as_str()),
        ));
    }

    for symptom in &entry.symptoms {
        events.push(event(
            TimelineEventKind::Symptom,
            format!("Symptom reported: {symptom}"),
            primary_label,
        ));
    }

    if entry.entry_type == EntryType::Injury {
        let description = match &entry.chief_complaint {
            Some(complaint) => format!("Injury: {complaint}"),
            None => "Injury documented".to_string(),
        };
        events.push(event(TimelineEventKind::Injury, description, primary_label));
    }

    if events.is_empty() {
        let description = match &entry.chief_complaint {
            Some(complaint) => format!("{}: {complaint}", entry.entry_type),
            None => format!("{} visit", entry.entry_type),
        };
        events.push(event(TimelineEventKind::Encounter, description, primary_label));
    }

    events
}
