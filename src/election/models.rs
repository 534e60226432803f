// src/election/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Party marker used when no party acronym could be attached to a record.
pub const INDEPENDENT_PARTY: &str = "IND";

/// Ballot number as it appeared in the source. Embedded JSON carries it either
/// as a string or as a bare integer; both are kept as found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BallotNumber {
    Numeric(i64),
    Text(String),
}

impl Default for BallotNumber {
    fn default() -> Self {
        BallotNumber::Text(String::new())
    }
}

impl fmt::Display for BallotNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BallotNumber::Numeric(n) => write!(f, "{}", n),
            BallotNumber::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for BallotNumber {
    fn from(s: &str) -> Self {
        BallotNumber::Text(s.to_string())
    }
}

/// One candidate as recovered from the results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub index: Option<u32>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "numero", default)]
    pub number: BallotNumber,
    #[serde(rename = "partido", default = "default_party")]
    pub party: String,
    #[serde(rename = "votos", default)]
    pub votes: u64,
    #[serde(rename = "situacao", skip_serializing_if = "Option::is_none", default)]
    pub status: Option<String>,
    #[serde(rename = "eleito", default)]
    pub elected: bool,
}

fn default_party() -> String {
    INDEPENDENT_PARTY.to_string()
}

impl CandidateRecord {
    /// A record with only a name; every other field takes its placeholder.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            index: None,
            name: name.into(),
            number: BallotNumber::default(),
            party: default_party(),
            votes: 0,
            status: None,
            elected: false,
        }
    }

    /// The deduplication key: the whitespace-trimmed name.
    pub fn key(&self) -> &str {
        self.name.trim()
    }
}

/// The JSON document written at the end of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsReport {
    pub municipio: String,
    pub estado: String,
    pub cargo: String,
    pub ano: u32,
    pub total: usize,
    pub eleitos: usize,
    pub fonte: String,
    pub url_origem: String,
    pub data_extracao: String,
    pub metodo: String,
    pub candidatos: Vec<CandidateRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_with_portuguese_keys() {
        let mut record = CandidateRecord::named("MARIA DAS DORES");
        record.number = BallotNumber::Numeric(15123);
        record.votes = 1200;
        record.elected = true;

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["nome"], "MARIA DAS DORES");
        assert_eq!(json["numero"], 15123);
        assert_eq!(json["partido"], "IND");
        assert_eq!(json["votos"], 1200);
        assert_eq!(json["eleito"], true);
        assert!(json.get("index").is_none(), "index is omitted when unset");
        assert!(json.get("situacao").is_none(), "situacao is omitted when unset");
    }

    #[test]
    fn test_ballot_number_keeps_source_kind() {
        let text: BallotNumber = serde_json::from_str("\"15000\"").unwrap();
        let numeric: BallotNumber = serde_json::from_str("15000").unwrap();
        assert_eq!(text, BallotNumber::Text("15000".into()));
        assert_eq!(numeric, BallotNumber::Numeric(15000));
        assert_eq!(text.to_string(), numeric.to_string());
    }

    #[test]
    fn test_key_trims_whitespace() {
        let record = CandidateRecord::named("  JOSE RIBAMAR  ");
        assert_eq!(record.key(), "JOSE RIBAMAR");
    }
}
