use uuid::Uuid;

use super::profile::DisabilityProfile;
use super::templates::ClaimTemplates;
use super::OpportunityError;
use crate::models::{
    AggravationSignature, ChronicitySignature, ClaimOpportunity, ConfidenceTier, EntryType,
    OpportunityType,
};
use crate::pipeline::analysis::ConditionAnalysis;

/// Entry count from which a group is rated high confidence, and from which a
/// chronic pattern becomes a chronic-condition opportunity.
const STRONG_GROUP_MIN_ENTRIES: usize = 3;

/// Opportunity generation stage.
pub trait OpportunityGenerator: Send + Sync {
    fn generate(
        &self,
        analyses: &[ConditionAnalysis<'_>],
        profile: &dyn DisabilityProfile,
    ) -> Result<Vec<ClaimOpportunity>, OpportunityError>;
}

/// Aggravation first, then chronic with enough entries, else direct.
pub fn opportunity_type(
    chronicity: &ChronicitySignature,
    aggravation: &AggravationSignature,
) -> OpportunityType {
    if aggravation.has_pattern {
        OpportunityType::Aggravation
    } else if chronicity.has_pattern && chronicity.entry_count >= STRONG_GROUP_MIN_ENTRIES {
        OpportunityType::ChronicCondition
    } else {
        OpportunityType::DirectServiceConnection
    }
}

/// `high` at three or more entries, otherwise `medium`. `low` is never
/// assigned by volume.
pub fn confidence_tier(entry_count: usize) -> ConfidenceTier {
    if entry_count >= STRONG_GROUP_MIN_ENTRIES {
        ConfidenceTier::High
    } else {
        ConfidenceTier::Medium
    }
}

/// Rule-based generator: one opportunity per condition group.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedOpportunityGenerator;

impl RuleBasedOpportunityGenerator {
    fn build(
        &self,
        analysis: &ConditionAnalysis<'_>,
        profile: &dyn DisabilityProfile,
    ) -> Result<ClaimOpportunity, OpportunityError> {
        let group = &analysis.group;
        let (first_date, last_date) = match (
            group.entries.iter().map(|e| e.date).min(),
            group.entries.iter().map(|e| e.date).max(),
        ) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(OpportunityError::EmptyGroup(group.label.clone())),
        };

        let opportunity_type = opportunity_type(&analysis.chronicity, &analysis.aggravation);
        let mental_health = group
            .entries
            .iter()
            .any(|e| e.entry_type == EntryType::MentalHealth);

        Ok(ClaimOpportunity {
            id: Uuid::new_v4(),
            condition: group.label.clone(),
            body_system: analysis.body_system,
            opportunity_type,
            confidence: confidence_tier(group.len()),
            supporting_entry_ids: group.entries.iter().map(|e| e.id).collect(),
            first_date,
            last_date,
            chronicity: analysis.chronicity.clone(),
            // Worsening or volume alone says nothing about a pre-service baseline.
            aggravation: analysis
                .aggravation
                .pre_existing_evidence
                .then(|| analysis.aggravation.clone()),
            primary_condition: None,
            required_evidence: ClaimTemplates::required_evidence(opportunity_type),
            suggested_prompts: ClaimTemplates::lay_statement_prompts(&group.label, mental_health),
            next_action: ClaimTemplates::next_action(opportunity_type).to_string(),
            already_claimed: profile.is_already_claimed(&group.label),
        })
    }
}

impl OpportunityGenerator for RuleBasedOpportunityGenerator {
    fn generate(
        &self,
        analyses: &[ConditionAnalysis<'_>],
        profile: &dyn DisabilityProfile,
    ) -> Result<Vec<ClaimOpportunity>, OpportunityError> {
        let mut opportunities = analyses
            .iter()
            .map(|analysis| self.build(analysis, profile))
            .collect::<Result<Vec<_>, _>>()?;

        // Unclaimed, stronger opportunities first.
        opportunities.sort_by(|a, b| {
            a.already_claimed
                .cmp(&b.already_claimed)
                .then(a.confidence.cmp(&b.confidence))
                .then(b.supporting_entry_ids.len().cmp(&a.supporting_entry_ids.len()))
                .then(a.condition.cmp(&b.condition))
        });

        tracing::info!(
            groups = analyses.len(),
            opportunities = opportunities.len(),
            high_confidence = opportunities
                .iter()
                .filter(|o| o.confidence == ConfidenceTier::High)
                .count(),
            already_claimed = opportunities.iter().filter(|o| o.already_claimed).count(),
            "Opportunity generation complete"
        );

        Ok(opportunities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BodySystem, DateConfidence, MedicalEntry};
    use crate::pipeline::analysis::{analyze, AnalysisConfig, ConditionGroup};
    use crate::pipeline::opportunity::StaticDisabilityProfile;
    use chrono::{Duration, NaiveDate};

    fn make_entry(offset_days: i64, diagnosis: &str, text: &str) -> MedicalEntry {
        MedicalEntry {
            id: Uuid::new_v4(),
            document_id: Uuid::nil(),
            page_number: 1,
            date: NaiveDate::from_ymd_opt(2006, 2, 1).unwrap() + Duration::days(offset_days),
            date_confidence: DateConfidence::Parsed,
            entry_type: EntryType::SickCall,
            chief_complaint: None,
            diagnoses: vec![diagnosis.to_string()],
            symptoms: vec![],
            chronicity_indicators: vec![],
            aggravation_indicators: crate::pipeline::extraction::patterns::detect_aggravation_indicators(text),
            severity: None,
            raw_text: text.to_string(),
            confidence: 75,
        }
    }

    fn generate(entries: &[MedicalEntry], profile: &StaticDisabilityProfile) -> Vec<ClaimOpportunity> {
        let analyses = analyze(entries, &AnalysisConfig::default());
        RuleBasedOpportunityGenerator
            .generate(&analyses, profile)
            .unwrap()
    }

    fn chronicity(has_pattern: bool, entry_count: usize) -> ChronicitySignature {
        ChronicitySignature {
            has_pattern,
            entry_count,
            timespan_days: 0,
            frequency: None,
        }
    }

    #[test]
    fn type_priority() {
        let aggravated = AggravationSignature {
            pre_existing_evidence: true,
            worsening_evidence: true,
            has_pattern: true,
            ..Default::default()
        };
        let none = AggravationSignature::default();

        assert_eq!(opportunity_type(&chronicity(true, 5), &aggravated), OpportunityType::Aggravation);
        assert_eq!(opportunity_type(&chronicity(true, 3), &none), OpportunityType::ChronicCondition);
        assert_eq!(
            opportunity_type(&chronicity(true, 2), &none),
            OpportunityType::DirectServiceConnection
        );
        assert_eq!(
            opportunity_type(&chronicity(false, 1), &none),
            OpportunityType::DirectServiceConnection
        );
    }

    #[test]
    fn confidence_by_volume() {
        assert_eq!(confidence_tier(1), ConfidenceTier::Medium);
        assert_eq!(confidence_tier(2), ConfidenceTier::Medium);
        assert_eq!(confidence_tier(3), ConfidenceTier::High);
        assert_eq!(confidence_tier(12), ConfidenceTier::High);
    }

    #[test]
    fn one_opportunity_per_group() {
        let entries = vec![
            make_entry(0, "lumbar strain", "back pain"),
            make_entry(20, "lumbar strain", "back pain"),
            make_entry(40, "lumbar strain", "back pain"),
            make_entry(60, "tinnitus", "ringing"),
        ];
        let opportunities = generate(&entries, &StaticDisabilityProfile::default());
        assert_eq!(opportunities.len(), 2);

        let lumbar = opportunities.iter().find(|o| o.condition == "lumbar strain").unwrap();
        assert_eq!(lumbar.opportunity_type, OpportunityType::ChronicCondition);
        assert_eq!(lumbar.confidence, ConfidenceTier::High);
        assert_eq!(lumbar.supporting_entry_ids.len(), 3);
        assert_eq!(lumbar.first_date, entries[0].date);
        assert_eq!(lumbar.last_date, entries[2].date);
        assert_eq!(lumbar.body_system, BodySystem::Musculoskeletal);
        assert!(lumbar.aggravation.is_none());
        assert_eq!(lumbar.required_evidence.len(), 3);
        assert_eq!(lumbar.next_action, "File with in-service continuity evidence");

        let tinnitus = opportunities.iter().find(|o| o.condition == "tinnitus").unwrap();
        assert_eq!(tinnitus.opportunity_type, OpportunityType::DirectServiceConnection);
        assert_eq!(tinnitus.confidence, ConfidenceTier::Medium);
    }

    #[test]
    fn aggravation_opportunity() {
        let entries = vec![make_entry(0, "asthma", "History of asthma, worsening symptoms")];
        let opportunities = generate(&entries, &StaticDisabilityProfile::default());

        let asthma = &opportunities[0];
        assert_eq!(asthma.opportunity_type, OpportunityType::Aggravation);
        assert!(asthma.aggravation.as_ref().unwrap().has_pattern);
        assert_eq!(asthma.required_evidence.len(), 5);
    }

    #[test]
    fn frequent_visits_without_history_carry_no_aggravation() {
        let entries = vec![
            make_entry(0, "lumbar strain", "back pain, worse today"),
            make_entry(10, "lumbar strain", "back pain"),
            make_entry(20, "lumbar strain", "back pain"),
        ];
        let opportunities = generate(&entries, &StaticDisabilityProfile::default());

        let lumbar = &opportunities[0];
        assert_eq!(lumbar.opportunity_type, OpportunityType::ChronicCondition);
        assert!(lumbar.aggravation.is_none());
    }

    #[test]
    fn pre_existing_history_attaches_signature_without_pattern() {
        let entries = vec![make_entry(0, "asthma", "History of asthma, stable")];
        let opportunities = generate(&entries, &StaticDisabilityProfile::default());

        let asthma = &opportunities[0];
        assert_eq!(asthma.opportunity_type, OpportunityType::DirectServiceConnection);
        let signature = asthma.aggravation.as_ref().unwrap();
        assert!(signature.pre_existing_evidence);
        assert!(!signature.has_pattern);
    }

    #[test]
    fn already_claimed_from_profile() {
        let entries = vec![
            make_entry(0, "Tinnitus", "ringing"),
            make_entry(0, "migraine", "headache"),
        ];
        let profile = StaticDisabilityProfile::new(["bilateral tinnitus"]);
        let opportunities = generate(&entries, &profile);

        let tinnitus = opportunities.iter().find(|o| o.condition == "Tinnitus").unwrap();
        assert!(tinnitus.already_claimed);
        let migraine = opportunities.iter().find(|o| o.condition == "migraine").unwrap();
        assert!(!migraine.already_claimed);
        // Unclaimed first.
        assert_eq!(opportunities[0].condition, "migraine");
    }

    #[test]
    fn mental_health_entries_get_extra_prompt() {
        let mut entry = make_entry(0, "PTSD", "nightmares");
        entry.entry_type = EntryType::MentalHealth;
        let opportunities = generate(&[entry], &StaticDisabilityProfile::default());
        assert_eq!(opportunities[0].suggested_prompts.len(), 4);
    }

    #[test]
    fn no_groups_no_opportunities() {
        let opportunities = generate(&[], &StaticDisabilityProfile::default());
        assert!(opportunities.is_empty());
    }

    #[test]
    fn empty_group_is_rejected() {
        let analysis = ConditionAnalysis {
            group: ConditionGroup {
                label: "ghost".into(),
                entries: vec![],
            },
            body_system: BodySystem::Other,
            chronicity: chronicity(false, 0),
            aggravation: AggravationSignature::default(),
        };
        let err = RuleBasedOpportunityGenerator
            .generate(&[analysis], &StaticDisabilityProfile::default())
            .unwrap_err();
        assert!(matches!(err, OpportunityError::EmptyGroup(label) if label == "ghost"));
    }
}
