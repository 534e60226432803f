// src/extractors/observer.rs
use crate::extractors::stage::{StageReport, StageStatus};

/// Raw hit counts from the text-pattern pass, before alignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternCounts {
    pub blocks: usize,
    pub names: usize,
    pub numbers: usize,
    pub votes: usize,
    pub parties: Vec<String>,
}

/// Receives progress events from the pipeline. Every hook has a no-op default
/// so implementors only override what they care about.
pub trait ExtractionObserver {
    fn page_loaded(&mut self, _chars: usize) {}
    fn scripts_found(&mut self, _count: usize) {}
    fn pattern_counts(&mut self, _counts: &PatternCounts) {}
    fn selector_matched(&mut self, _selector: &str, _count: usize) {}
    fn stage_finished(&mut self, _report: &StageReport) {}
    fn merged(&mut self, _unique: usize) {}
}

/// Default observer: progress lines through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl ExtractionObserver for TracingObserver {
    fn page_loaded(&mut self, chars: usize) {
        tracing::info!("Page size: {} characters", chars);
    }

    fn scripts_found(&mut self, count: usize) {
        tracing::info!("Found {} scripts", count);
    }

    fn pattern_counts(&mut self, counts: &PatternCounts) {
        tracing::info!("Candidate blocks found: {}", counts.blocks);
        tracing::info!("Potential names: {}", counts.names);
        tracing::info!("Ballot numbers: {}", counts.numbers);
        tracing::info!("Vote counts: {}", counts.votes);
        tracing::info!("Parties found: {:?}", counts.parties);
    }

    fn selector_matched(&mut self, selector: &str, count: usize) {
        tracing::info!("Found {} elements for selector: {}", count, selector);
    }

    fn stage_finished(&mut self, report: &StageReport) {
        match report.status() {
            StageStatus::Extracted(n) => {
                tracing::info!("Candidates extracted from {}: {}", report.stage, n)
            }
            StageStatus::NotFound => {
                tracing::info!("Candidates extracted from {}: 0 (nothing matched)", report.stage)
            }
            StageStatus::Unparseable(k) => tracing::warn!(
                "Candidates extracted from {}: 0 ({} matches could not be parsed)",
                report.stage,
                k
            ),
        }
        for skip in &report.skipped {
            tracing::debug!("[{}] skipped: {}", report.stage, skip);
        }
    }

    fn merged(&mut self, unique: usize) {
        tracing::info!("Unique candidates found: {}", unique);
    }
}

/// Observer that keeps every event, for assertions in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub page_chars: Option<usize>,
    pub scripts: Option<usize>,
    pub counts: Option<PatternCounts>,
    pub selectors: Vec<(String, usize)>,
    pub stages: Vec<(crate::extractors::stage::Stage, StageStatus)>,
    pub unique: Option<usize>,
}

#[cfg(test)]
impl ExtractionObserver for RecordingObserver {
    fn page_loaded(&mut self, chars: usize) {
        self.page_chars = Some(chars);
    }

    fn scripts_found(&mut self, count: usize) {
        self.scripts = Some(count);
    }

    fn pattern_counts(&mut self, counts: &PatternCounts) {
        self.counts = Some(counts.clone());
    }

    fn selector_matched(&mut self, selector: &str, count: usize) {
        self.selectors.push((selector.to_string(), count));
    }

    fn stage_finished(&mut self, report: &StageReport) {
        self.stages.push((report.stage, report.status()));
    }

    fn merged(&mut self, unique: usize) {
        self.unique = Some(unique);
    }
}
