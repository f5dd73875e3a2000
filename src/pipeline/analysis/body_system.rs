use std::sync::LazyLock;

use regex::Regex;

use crate::models::BodySystem;

/// Keyword table, checked in order. Mental health comes before
/// neurological so "sleep" and "anxiety" terms do not land elsewhere, and
/// digestive comes before cardiovascular for "heartburn".
const BODY_SYSTEM_KEYWORDS: &[(BodySystem, &[&str])] = &[
    (
        BodySystem::MentalHealth,
        &[
            "ptsd",
            "post-traumatic",
            "depression",
            "depressive",
            "anxiety",
            "insomnia",
            "nightmare",
            "adjustment disorder",
            "bipolar",
            "panic",
        ],
    ),
    (BodySystem::Auditory, &["tinnitus", "hearing", "otitis", "ear", "earache"]),
    (
        BodySystem::Neurological,
        &["migraine", "headache", "tbi", "concussion", "neuropathy", "radiculopathy", "seizure"],
    ),
    (
        BodySystem::Musculoskeletal,
        &[
            "back", "backache", "lumbar", "cervical", "spine", "spinal", "knee", "shoulder",
            "ankle", "hip", "wrist", "strain", "sprain", "fracture", "arthritis", "tendon",
            "tendonitis", "tendinitis", "plantar", "joint",
        ],
    ),
    (
        BodySystem::Respiratory,
        &[
            "asthma", "sinus", "sinusitis", "rhinitis", "bronchitis", "copd", "sleep apnea",
            "pulmonary", "lung",
        ],
    ),
    (
        BodySystem::Digestive,
        &[
            "gerd", "reflux", "heartburn", "ibs", "bowel", "gastritis", "gastroenteritis",
            "gastrointestinal", "hernia", "hemorrhoid",
        ],
    ),
    (
        BodySystem::Cardiovascular,
        &["hypertension", "blood pressure", "cardiac", "heart", "arrhythmia"],
    ),
    (
        BodySystem::Skin,
        &["dermatitis", "eczema", "psoriasis", "rash", "acne", "scar", "pseudofolliculitis"],
    ),
    (BodySystem::Endocrine, &["diabetes", "diabetic", "thyroid", "hypothyroidism"]),
    (
        BodySystem::Genitourinary,
        &["kidney", "renal", "bladder", "urinary", "prostate", "prostatitis", "erectile"],
    ),
    (BodySystem::Vision, &["vision", "eye", "glaucoma", "retina", "retinal"]),
];

/// One whole-word alternation per system, plurals allowed.
static BODY_SYSTEM_PATTERNS: LazyLock<Vec<(BodySystem, Regex)>> = LazyLock::new(|| {
    BODY_SYSTEM_KEYWORDS
        .iter()
        .map(|(system, keywords)| {
            let alternation = keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(?i)\b(?:{alternation})s?\b");
            (*system, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Map a condition label onto the body system it most likely belongs to.
pub fn infer_body_system(condition: &str) -> BodySystem {
    BODY_SYSTEM_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(condition))
        .map(|(system, _)| *system)
        .unwrap_or(BodySystem::Other)
}
