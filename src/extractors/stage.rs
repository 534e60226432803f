// src/extractors/stage.rs
use std::fmt;
use crate::election::{CandidateRecord, PageSource};
use crate::extractors::observer::ExtractionObserver;
use crate::utils::error::ExtractError;

/// The extraction passes, in the order their output is merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ScriptJson,
    TextPattern,
    DomSelector,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ScriptJson => "script JSON",
            Stage::TextPattern => "text patterns",
            Stage::DomSelector => "DOM selectors",
        };
        f.write_str(name)
    }
}

/// What a stage produced, and what it had to skip on the way.
#[derive(Debug, Clone)]
pub struct StageReport {
    pub stage: Stage,
    pub records: Vec<CandidateRecord>,
    pub skipped: Vec<ExtractError>,
}

/// Distinguishes "nothing there" from "something there we could not parse".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Extracted(usize),
    NotFound,
    Unparseable(usize),
}

impl StageReport {
    pub fn new(stage: Stage) -> Self {
        Self { stage, records: Vec::new(), skipped: Vec::new() }
    }

    pub fn status(&self) -> StageStatus {
        if !self.records.is_empty() {
            StageStatus::Extracted(self.records.len())
        } else if !self.skipped.is_empty() {
            StageStatus::Unparseable(self.skipped.len())
        } else {
            StageStatus::NotFound
        }
    }
}

/// One pass of the extraction cascade.
pub trait ExtractionStrategy {
    fn stage(&self) -> Stage;

    /// Runs the pass over the page. Never fails: anything unusable ends up
    /// in `StageReport::skipped`.
    fn extract(&self, page: &PageSource, observer: &mut dyn ExtractionObserver) -> StageReport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_distinguishes_empty_from_malformed() {
        let mut report = StageReport::new(Stage::ScriptJson);
        assert_eq!(report.status(), StageStatus::NotFound);

        report.skipped.push(ExtractError::MalformedJson("[{".into()));
        assert_eq!(report.status(), StageStatus::Unparseable(1));

        report.records.push(CandidateRecord::named("ANA PAULA FERREIRA"));
        assert_eq!(report.status(), StageStatus::Extracted(1));
    }
}
