use std::sync::LazyLock;

use regex::Regex;

use crate::models::EntryType;

/// Decides the single entry type of a page.
pub trait EntryClassifier: Send + Sync {
    fn classify(&self, text: &str) -> EntryType;
}

type KeywordRule = (EntryType, &'static [&'static str]);

/// Fixed precedence: the first rule with a matching keyword wins.
const BASE_RULES: &[KeywordRule] = &[
    (EntryType::SickCall, &["sick call", "sick-call", "sick slip", "sick hall"]),
    (
        EntryType::Injury,
        &["injury", "injured", "fracture", "sprain", "laceration", "contusion"],
    ),
    (
        EntryType::PhysicalExam,
        &[
            "physical exam",
            "physical examination",
            "periodic health assessment",
            "annual exam",
        ],
    ),
    (
        EntryType::MentalHealth,
        &[
            "mental health",
            "behavioral health",
            "psychiatric",
            "psychiatry",
            "psychiatrist",
            "ptsd",
            "depression",
            "anxiety",
        ],
    ),
];

/// Consulted after the base rules by `ExtendedKeywordClassifier`.
const EXTENDED_RULES: &[KeywordRule] = &[
    (
        EntryType::SeparationExam,
        &["separation exam", "separation physical", "ets physical"],
    ),
    (
        EntryType::DeploymentScreening,
        &["pre-deployment", "post-deployment", "deployment health"],
    ),
    (
        EntryType::Emergency,
        &["emergency room", "emergency department", "er visit"],
    ),
    (
        EntryType::Hospitalization,
        &["admitted to", "hospital admission", "inpatient", "discharge summary"],
    ),
    (EntryType::Dental, &["dental", "tooth", "molar"]),
    (EntryType::Imaging, &["x-ray", "xray", "mri", "ct scan", "radiograph"]),
    (EntryType::Lab, &["lab result", "cbc", "urinalysis", "blood panel"]),
    (EntryType::Immunization, &["immunization", "vaccine", "vaccination"]),
    (EntryType::Referral, &["referral", "referred to", "consult request"]),
    (EntryType::FollowUp, &["follow-up", "follow up", "recheck"]),
    (
        EntryType::Medication,
        &["prescribed", "prescription", "refill", "mg"],
    ),
];

type RulePattern = (EntryType, Regex);

/// Whole-word alternation per rule, plurals allowed.
fn compile(rules: &[KeywordRule]) -> Vec<RulePattern> {
    rules
        .iter()
        .map(|(entry_type, keywords)| {
            let alternation = keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(?i)\b(?:{alternation})s?\b");
            (*entry_type, Regex::new(&pattern).unwrap())
        })
        .collect()
}

static BASE_PATTERNS: LazyLock<Vec<RulePattern>> = LazyLock::new(|| compile(BASE_RULES));
static EXTENDED_PATTERNS: LazyLock<Vec<RulePattern>> = LazyLock::new(|| compile(EXTENDED_RULES));

fn first_match(patterns: &[RulePattern], text: &str) -> Option<EntryType> {
    patterns
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(entry_type, _)| *entry_type)
}

/// sick_call → injury → physical_exam → mental_health → other.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordClassifier;

impl EntryClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> EntryType {
        first_match(&BASE_PATTERNS, text).unwrap_or(EntryType::Other)
    }
}

/// Same precedence as `KeywordClassifier`, then the remaining record types
/// before falling back to other.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtendedKeywordClassifier;

impl EntryClassifier for ExtendedKeywordClassifier {
    fn classify(&self, text: &str) -> EntryType {
        first_match(&BASE_PATTERNS, text)
            .or_else(|| first_match(&EXTENDED_PATTERNS, text))
            .unwrap_or(EntryType::Other)
    }
}
