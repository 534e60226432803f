// src/extractors/field_map.rs
use serde_json::{Map, Value};
use crate::election::models::{BallotNumber, CandidateRecord, INDEPENDENT_PARTY};
use crate::extractors::element_text::parse_vote_digits;
use crate::utils::error::ExtractError;

// Alias keys seen in TSE payloads, highest priority first.
const NAME_KEYS: &[&str] = &["nome", "nomeUrna", "name", "candidato"];
const NUMBER_KEYS: &[&str] = &["numero", "numeroUrna", "number"];
const PARTY_KEYS: &[&str] = &["partido", "siglaPartido", "party"];
const VOTES_KEYS: &[&str] = &["votos", "totalVotos", "votes"];
const STATUS_KEYS: &[&str] = &["situacao", "descricaoSituacao", "status"];

/// First alias present in the object, even when its value is null.
fn first_present<'a>(item: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| item.get(*key))
}

/// Renders a scalar as text. Arrays, objects and null have no text form here.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Falsy values (null, false, 0, "", [], {}) count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Status text as found. Lists and objects keep their JSON form, so
/// `["ELEITO"]` still reads as elected.
fn status_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
        other => scalar_text(other),
    }
}

fn ballot_number(value: &Value) -> BallotNumber {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => BallotNumber::Numeric(i),
            None => BallotNumber::Text(n.to_string()),
        },
        other => scalar_text(other).map(BallotNumber::Text).unwrap_or_default(),
    }
}

fn vote_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        // "1.234" and "1,234" both mean 1234 here
        Value::String(s) => parse_vote_digits(s).unwrap_or(0),
        _ => 0,
    }
}

/// Projects a decoded JSON object onto a candidate record.
pub fn map_candidate(item: &Map<String, Value>) -> Result<CandidateRecord, ExtractError> {
    // a list or object under a name key is truthy but still not a name
    let name = first_present(item, NAME_KEYS)
        .filter(|value| is_truthy(value))
        .and_then(scalar_text)
        .ok_or_else(|| ExtractError::MissingName(Value::Object(item.clone()).to_string()))?;

    let status = first_present(item, STATUS_KEYS).and_then(status_text);
    let elected = status
        .as_deref()
        .map(|s| s.to_lowercase().contains("eleito"))
        .unwrap_or(false);

    Ok(CandidateRecord {
        index: None,
        name,
        number: first_present(item, NUMBER_KEYS).map(ballot_number).unwrap_or_default(),
        party: first_present(item, PARTY_KEYS)
            .and_then(scalar_text)
            .unwrap_or_else(|| INDEPENDENT_PARTY.to_string()),
        votes: first_present(item, VOTES_KEYS).map(vote_count).unwrap_or(0),
        status,
        elected,
    })
}
