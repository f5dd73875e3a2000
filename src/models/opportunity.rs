use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{BodySystem, ConfidenceTier, FrequencyClass, OpportunityType};

/// How often and for how long a condition recurs across entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChronicitySignature {
    pub has_pattern: bool,
    pub entry_count: usize,
    /// Whole days between the earliest and latest entry date.
    pub timespan_days: i64,
    /// Only computed with two or more dated entries spanning at least a day.
    pub frequency: Option<FrequencyClass>,
}

/// Evidence that a condition documented before service worsened during it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggravationSignature {
    pub pre_existing_evidence: bool,
    pub worsening_evidence: bool,
    pub increased_frequency: bool,
    pub increased_severity: bool,
    /// Pre-existing evidence is a required gate; the other three only count
    /// once it is present.
    pub has_pattern: bool,
}

/// One candidate claim derived from a condition group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimOpportunity {
    pub id: Uuid,
    pub condition: String,
    pub body_system: BodySystem,
    pub opportunity_type: OpportunityType,
    pub confidence: ConfidenceTier,
    pub supporting_entry_ids: Vec<Uuid>,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub chronicity: ChronicitySignature,
    pub aggravation: Option<AggravationSignature>,
    /// Already service-connected condition this one would be secondary to.
    pub primary_condition: Option<String>,
    pub required_evidence: Vec<String>,
    pub suggested_prompts: Vec<String>,
    pub next_action: String,
    /// Resolved against the external disability profile at generation time.
    pub already_claimed: bool,
}
