//! Condition grouping and pattern analysis.
//!
//! Groups entries by condition label and derives, per group, the chronicity
//! signature (how often / how long) and the aggravation signature (documented
//! pre-existing condition that worsened). Everything here is pure.

pub mod aggravation;
pub mod body_system;
pub mod chronicity;
pub mod grouping;

pub use aggravation::*;
pub use body_system::*;
pub use chronicity::*;
pub use grouping::*;

use crate::config::PipelineConfig;
use crate::models::{AggravationSignature, BodySystem, ChronicitySignature, MedicalEntry};

/// Knobs for signature computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Leave entries whose date fell back to extraction time out of the
    /// timespan and frequency math. Off by default.
    pub exclude_fallback_dates: bool,
}

impl From<&PipelineConfig> for AnalysisConfig {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            exclude_fallback_dates: config.exclude_fallback_dates,
        }
    }
}

/// A condition group together with its derived signatures.
#[derive(Debug, Clone)]
pub struct ConditionAnalysis<'a> {
    pub group: ConditionGroup<'a>,
    pub body_system: BodySystem,
    pub chronicity: ChronicitySignature,
    pub aggravation: AggravationSignature,
}

/// Group entries and compute both signatures for every group.
pub fn analyze<'a>(entries: &'a [MedicalEntry], config: &AnalysisConfig) -> Vec<ConditionAnalysis<'a>> {
    let analyses: Vec<ConditionAnalysis<'a>> = group_entries(entries)
        .into_values()
        .map(|group| ConditionAnalysis {
            body_system: infer_body_system(&group.label),
            chronicity: chronicity_signature(&group.entries, config),
            aggravation: aggravation_signature(&group.entries),
            group,
        })
        .collect();

    tracing::debug!(
        entries = entries.len(),
        groups = analyses.len(),
        chronic = analyses.iter().filter(|a| a.chronicity.has_pattern).count(),
        aggravated = analyses.iter().filter(|a| a.aggravation.has_pattern).count(),
        "Condition analysis complete"
    );

    analyses
}
