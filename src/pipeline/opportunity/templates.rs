use crate::models::OpportunityType;

/// Evidence checklists, lay-statement prompts and next-action labels.
/// Wording stays neutral: these are prompts for review, not conclusions.
pub struct ClaimTemplates;

impl ClaimTemplates {
    /// Evidence every opportunity needs, extended per opportunity type.
    pub fn required_evidence(opportunity_type: OpportunityType) -> Vec<String> {
        let mut evidence = vec![
            "Service treatment records (on file)".to_string(),
            "VA or private medical records showing a current diagnosis".to_string(),
            "Veteran lay statement describing onset and symptoms".to_string(),
        ];

        match opportunity_type {
            OpportunityType::Aggravation => {
                evidence.push("Pre-service medical records documenting the baseline condition".into());
                evidence.push("Evidence the condition worsened beyond natural progression during service".into());
            }
            OpportunityType::SecondaryCondition => {
                evidence.push("Evidence of the primary service-connected condition".into());
                evidence.push("Medical nexus letter linking this condition to the primary condition".into());
            }
            _ => {}
        }

        evidence
    }

    /// Lay-statement prompts for one condition. Mental-health conditions get
    /// an extra prompt about functional impact.
    pub fn lay_statement_prompts(condition: &str, mental_health: bool) -> Vec<String> {
        let mut prompts = vec![
            format!("When did you first notice {condition} during your service, and what were you doing at the time?"),
            format!("How often do {condition} symptoms occur today, and how long do they last?"),
            format!("How does {condition} affect your work and daily activities?"),
        ];

        if mental_health {
            prompts.push(format!(
                "Describe how {condition} affects your relationships and your ability to keep a routine."
            ));
        }

        prompts
    }

    /// Recommended next step for an opportunity type.
    pub fn next_action(opportunity_type: OpportunityType) -> &'static str {
        match opportunity_type {
            OpportunityType::DirectServiceConnection => "File for direct service connection",
            OpportunityType::Aggravation => "Gather pre-service records and file for aggravation",
            OpportunityType::SecondaryCondition => "Request a nexus letter and file as secondary",
            OpportunityType::ChronicCondition => "File with in-service continuity evidence",
            OpportunityType::MentalHealth => "Schedule a mental health evaluation",
            OpportunityType::Tbi => "Request a TBI evaluation",
            OpportunityType::Ptsd => "Complete a PTSD stressor statement",
            OpportunityType::GulfWarPresumptive => "Verify Gulf War service dates for presumptive filing",
            OpportunityType::BurnPitPresumptive => "Verify burn pit exposure locations for presumptive filing",
            OpportunityType::AgentOrangePresumptive => "Verify herbicide exposure for presumptive filing",
        }
    }
}
