// src/extractors/element_text.rs
use once_cell::sync::Lazy;
use regex::Regex;
use crate::election::models::{BallotNumber, CandidateRecord};
use crate::utils::error::ExtractError;

// Shorter upper bound than the page-wide name pattern: element text is already
// scoped to one card.
static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-ZÁÀÂÃÉÊÍÓÔÕÚÇ][A-ZÁÀÂÃÉÊÍÓÔÕÚÇ\s]{8,40}\b").expect("Failed to compile NAME_RE")
});
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[1-9]\d{4}\b").expect("Failed to compile NUMBER_RE")
});
static VOTES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b([0-9]{1,3}(?:\.[0-9]{3})*)\s*votos?").expect("Failed to compile VOTES_RE")
});

/// Value of a formatted count such as "1.234", separators ignored. Counts too
/// large for u64 saturate at `u64::MAX`. `None` when there are no digits.
pub fn parse_vote_digits(s: &str) -> Option<u64> {
    let mut digits = s.chars().filter_map(|c| c.to_digit(10)).peekable();
    digits.peek()?;
    Some(digits.fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(u64::from(d))))
}

/// Parses one candidate out of the flattened text of a single element.
pub fn parse_element_text(text: &str) -> Result<CandidateRecord, ExtractError> {
    let name = NAME_RE
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .ok_or_else(|| ExtractError::NoNameInText(text.chars().take(60).collect()))?;

    let mut record = CandidateRecord::named(name);
    if let Some(m) = NUMBER_RE.find(text) {
        record.number = BallotNumber::Text(m.as_str().to_string());
    }
    record.votes = VOTES_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_vote_digits(m.as_str()))
        .unwrap_or(0);
    record.elected = text.to_lowercase().contains("eleito");

    Ok(record)
}
