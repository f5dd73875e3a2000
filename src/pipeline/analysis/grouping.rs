use std::collections::BTreeMap;

use crate::models::MedicalEntry;

/// Entries sharing one inferred condition label.
#[derive(Debug, Clone)]
pub struct ConditionGroup<'a> {
    /// Label as first seen in the record.
    pub label: String,
    /// In input order, each entry at most once.
    pub entries: Vec<&'a MedicalEntry>,
}

impl ConditionGroup<'_> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Grouping key: lowercase with inner whitespace collapsed, so
/// "Lumbar  Strain" and "lumbar strain" land together.
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Group entries by condition label.
///
/// Each diagnosis creates or extends a group; the chief complaint is used
/// only when the entry has no diagnosis. Entries with neither are left out.
/// An entry listing several diagnoses joins several groups.
pub fn group_entries(entries: &[MedicalEntry]) -> BTreeMap<String, ConditionGroup<'_>> {
    let mut groups: BTreeMap<String, ConditionGroup<'_>> = BTreeMap::new();

    for entry in entries {
        for label in entry.condition_labels() {
            let key = normalize_label(label);
            if key.is_empty() {
                continue;
            }
            let group = groups.entry(key).or_insert_with(|| ConditionGroup {
                label: label.trim().to_string(),
                entries: Vec::new(),
            });
            if !group.entries.iter().any(|e| e.id == entry.id) {
                group.entries.push(entry);
            }
        }
    }

    groups
}
