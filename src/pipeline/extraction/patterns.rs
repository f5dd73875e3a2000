//! Lexical vocabulary shared by entry extraction and pattern analysis.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::models::Severity;

/// Longest chief complaint / diagnosis captured after a marker.
const MAX_CAPTURE_CHARS: usize = 120;

static CHIEF_COMPLAINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)chief\s+complaint\s*:\s*([^.!?\n]+)").unwrap());

static DIAGNOSIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)diagnosis\s*:\s*([^.!?\n]+)").unwrap());

static US_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").unwrap());

/// Symptom label → trigger words. Presence only; labels are not exclusive.
const SYMPTOM_VOCABULARY: &[(&str, &[&str])] = &[
    ("pain", &["pain"]),
    ("sleep disturbance", &["sleep disturbance", "insomnia"]),
    ("nightmares", &["nightmare"]),
    ("anxiety", &["anxiety"]),
];

struct TermPattern {
    regex: Regex,
    term: &'static str,
}

fn term(term: &'static str) -> TermPattern {
    TermPattern {
        regex: Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term))).unwrap(),
        term,
    }
}

static CHRONICITY_TERMS: LazyLock<Vec<TermPattern>> = LazyLock::new(|| {
    vec![
        term("chronic"),
        term("persistent"),
        term("ongoing"),
        term("since"),
        term("for the past"),
    ]
});

static AGGRAVATION_TERMS: LazyLock<Vec<TermPattern>> =
    LazyLock::new(|| vec![term("worse"), term("worsening"), term("increased")]);

static PRE_EXISTING_TERMS: LazyLock<Vec<TermPattern>> = LazyLock::new(|| {
    vec![
        term("pre-existing"),
        term("history of"),
        term("prior to service"),
    ]
});

/// Checked in order; the first hit wins.
static SEVERITY_TERMS: LazyLock<Vec<(Severity, Regex)>> = LazyLock::new(|| {
    vec![
        (Severity::Severe, Regex::new(r"(?i)\bsevere(ly)?\b").unwrap()),
        (Severity::Moderate, Regex::new(r"(?i)\bmoderate(ly)?\b").unwrap()),
        (Severity::Mild, Regex::new(r"(?i)\bmild(ly)?\b").unwrap()),
    ]
});

/// Text after `chief complaint:` up to the next sentence terminator.
pub fn capture_chief_complaint(text: &str) -> Option<String> {
    CHIEF_COMPLAINT
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| clean_capture(m.as_str()))
}

/// Every `diagnosis:` capture on the page, deduplicated case-insensitively.
pub fn capture_diagnoses(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for capture in DIAGNOSIS.captures_iter(text) {
        let Some(value) = capture.get(1).and_then(|m| clean_capture(m.as_str())) else {
            continue;
        };
        if !found.iter().any(|d| d.eq_ignore_ascii_case(&value)) {
            found.push(value);
        }
    }
    found
}

/// First `MM/DD/YYYY` token that is a real calendar date.
pub fn parse_first_date(text: &str) -> Option<NaiveDate> {
    US_DATE.captures_iter(text).find_map(|c| {
        let month: u32 = c[1].parse().ok()?;
        let day: u32 = c[2].parse().ok()?;
        let year: i32 = c[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

pub fn detect_symptoms(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    SYMPTOM_VOCABULARY
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|t| lower.contains(t)))
        .map(|(label, _)| label.to_string())
        .collect()
}

pub fn detect_chronicity_indicators(text: &str) -> Vec<String> {
    matching_terms(&CHRONICITY_TERMS, text)
}

pub fn detect_aggravation_indicators(text: &str) -> Vec<String> {
    matching_terms(&AGGRAVATION_TERMS, text)
}

pub fn has_pre_existing_language(text: &str) -> bool {
    PRE_EXISTING_TERMS.iter().any(|p| p.regex.is_match(text))
}

pub fn detect_severity(text: &str) -> Option<Severity> {
    SEVERITY_TERMS
        .iter()
        .find(|(_, regex)| regex.is_match(text))
        .map(|(severity, _)| *severity)
}

fn matching_terms(terms: &[TermPattern], text: &str) -> Vec<String> {
    terms
        .iter()
        .filter(|p| p.regex.is_match(text))
        .map(|p| p.term.to_string())
        .collect()
}

fn clean_capture(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches([',', ';', ':']).trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_CAPTURE_CHARS).collect::<String>().trim_end().to_string())
}
