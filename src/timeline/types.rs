use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single event on the service timeline, projected from one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub date: NaiveDate,
    pub kind: TimelineEventKind,
    pub description: String,
    pub condition: Option<String>,
    pub entry_id: Uuid,
    pub page_number: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventKind {
    Diagnosis,
    Symptom,
    Injury,
    /// Dated visit with nothing more specific captured.
    Encounter,
}
