// src/extractors/text_pattern.rs
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use crate::election::config::DEFAULT_ELECTED_SEATS;
use crate::election::models::{BallotNumber, CandidateRecord, INDEPENDENT_PARTY};
use crate::election::PageSource;
use crate::extractors::element_text::parse_vote_digits;
use crate::extractors::observer::{ExtractionObserver, PatternCounts};
use crate::extractors::stage::{ExtractionStrategy, Stage, StageReport};

// --- Raw patterns (shared with the debug annotator) ---
pub const BLOCK_PATTERN: &str = r"(?is)(?:candidato|nome).*?(?:eleito|não eleito|votos)";
pub const NAME_PATTERN: &str = r"\b[A-ZÁÀÂÃÉÊÍÓÔÕÚÇ][A-ZÁÀÂÃÉÊÍÓÔÕÚÇ\s]{8,50}\b";
pub const NUMBER_PATTERN: &str = r"\b[1-9]\d{4}\b";
// ASCII digits only; other scripts' digits are not vote counts.
pub const VOTES_PATTERN: &str = r"\b[0-9]{1,3}(?:\.[0-9]{3})*\s*votos?\b";
pub const PARTY_PATTERN: &str = r"\b(?:PT|PSDB|MDB|PL|PP|PDT|PSB|REPUBLICANOS|PODE|PSOL|DEM|SOLIDARIEDADE|AVANTE|CIDADANIA|PMN|PV|REDE|UP|PCB|PSTU|PCO|PMB|DC|AGIR|PROS|PTB|PSD|PSC|PR|PHS|PRP|PRTB|PSL|NOVO|PATRIOTA)\b";

/// Pattern/label pairs for `utils::html_debug::create_debug_html`.
pub const HIGHLIGHT_PATTERNS: [(&str, &str); 4] = [
    (NAME_PATTERN, "name"),
    (NUMBER_PATTERN, "number"),
    (VOTES_PATTERN, "votes"),
    (PARTY_PATTERN, "party"),
];

// Uppercase runs that come from markup or script rather than a ballot.
const NAME_NOISE: &[&str] = &["javascript", "function", "class", "style", "script"];
const MIN_NAME_CHARS: usize = 10;

static BLOCK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(BLOCK_PATTERN).expect("Failed to compile BLOCK_RE"));
static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(NAME_PATTERN).expect("Failed to compile NAME_RE"));
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(NUMBER_PATTERN).expect("Failed to compile NUMBER_RE"));
static VOTES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(VOTES_PATTERN).expect("Failed to compile VOTES_RE"));
static PARTY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(PARTY_PATTERN).expect("Failed to compile PARTY_RE"));

/// The lists harvested from the raw text, before positional alignment.
#[derive(Debug, Default)]
struct Harvest {
    blocks: usize,
    names: Vec<String>,
    numbers: Vec<String>,
    votes: Vec<u64>,
    parties: Vec<String>,
}

impl Harvest {
    fn from_text(html: &str) -> Self {
        let names = NAME_RE
            .find_iter(html)
            .map(|m| m.as_str().trim())
            .filter(|name| name.chars().count() > MIN_NAME_CHARS)
            .filter(|name| {
                let lower = name.to_lowercase();
                !NAME_NOISE.iter().any(|noise| lower.contains(noise))
            })
            .map(str::to_string)
            .collect();

        let numbers = NUMBER_RE.find_iter(html).map(|m| m.as_str().to_string()).collect();

        let votes = VOTES_RE
            .find_iter(html)
            .filter_map(|m| parse_vote_digits(m.as_str()))
            .filter(|v| *v > 0)
            .collect();

        let mut seen = HashSet::new();
        let parties = PARTY_RE
            .find_iter(html)
            .map(|m| m.as_str())
            .filter(|party| seen.insert(*party))
            .map(str::to_string)
            .collect();

        Self {
            blocks: BLOCK_RE.find_iter(html).count(),
            names,
            numbers,
            votes,
            parties,
        }
    }

    fn counts(&self) -> PatternCounts {
        PatternCounts {
            blocks: self.blocks,
            names: self.names.len(),
            numbers: self.numbers.len(),
            votes: self.votes.len(),
            parties: self.parties.clone(),
        }
    }
}

/// Harvests name, number and vote tokens from the raw page text and zips them
/// into records by position. The pairing is a guess: nothing ties the i-th
/// name to the i-th number in the source.
#[derive(Debug)]
pub struct TextPatternExtractor {
    elected_seats: usize,
}

impl Default for TextPatternExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_ELECTED_SEATS)
    }
}

impl TextPatternExtractor {
    /// `elected_seats` leading records are flagged elected.
    pub fn new(elected_seats: usize) -> Self {
        Self { elected_seats }
    }

    fn synthesize(&self, harvest: &Harvest) -> Vec<CandidateRecord> {
        let aligned = harvest.names.len().min(harvest.numbers.len()).min(harvest.votes.len());

        (0..aligned)
            .map(|i| {
                let elected = i < self.elected_seats;
                CandidateRecord {
                    index: Some(i as u32 + 1),
                    name: harvest
                        .names
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| format!("CANDIDATO {}", i + 1)),
                    number: harvest
                        .numbers
                        .get(i)
                        .map(|n| BallotNumber::Text(n.clone()))
                        .unwrap_or_else(|| BallotNumber::Text((10_000 + i).to_string())),
                    party: if harvest.parties.is_empty() {
                        INDEPENDENT_PARTY.to_string()
                    } else {
                        harvest.parties[i % harvest.parties.len()].clone()
                    },
                    votes: harvest.votes.get(i).copied().unwrap_or(0),
                    status: Some(if elected { "ELEITO" } else { "NÃO ELEITO" }.to_string()),
                    elected,
                }
            })
            .collect()
    }
}

impl ExtractionStrategy for TextPatternExtractor {
    fn stage(&self) -> Stage {
        Stage::TextPattern
    }

    fn extract(&self, page: &PageSource, observer: &mut dyn ExtractionObserver) -> StageReport {
        let harvest = Harvest::from_text(&page.html);
        observer.pattern_counts(&harvest.counts());

        let mut report = StageReport::new(Stage::TextPattern);
        report.records = self.synthesize(&harvest);
        report
    }
}
