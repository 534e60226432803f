// src/pipeline.rs
use std::collections::HashSet;
use crate::election::{CandidateRecord, ElectionConfig, PageSource};
use crate::extractors::{
    DomSelectorExtractor, ExtractionObserver, ExtractionStrategy, ScriptJsonExtractor,
    StageReport, TextPatternExtractor,
};

/// The extraction cascade, in merge order.
pub fn strategies(config: &ElectionConfig) -> Vec<Box<dyn ExtractionStrategy>> {
    vec![
        Box::new(ScriptJsonExtractor::new()),
        Box::new(TextPatternExtractor::new(config.elected_seats)),
        Box::new(DomSelectorExtractor::new()),
    ]
}

/// Concatenates stage outputs and keeps the first record seen for each
/// trimmed name. Later duplicates are dropped even if they carry more fields.
pub fn merge_records(reports: Vec<StageReport>) -> Vec<CandidateRecord> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::new();

    for record in reports.into_iter().flat_map(|report| report.records) {
        let key = record.key();
        if key.is_empty() || seen.contains(key) {
            continue;
        }
        seen.insert(key.to_string());
        unique.push(record);
    }

    unique
}

/// Runs every strategy over the page and merges the results.
pub fn extract_candidates(
    page: &PageSource,
    config: &ElectionConfig,
    observer: &mut dyn ExtractionObserver,
) -> Vec<CandidateRecord> {
    observer.page_loaded(page.char_len());

    let mut reports = Vec::new();
    for strategy in strategies(config) {
        tracing::debug!("Running {} extraction", strategy.stage());
        let report = strategy.extract(page, observer);
        observer.stage_finished(&report);
        reports.push(report);
    }

    let unique = merge_records(reports);
    observer.merged(unique.len());
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::observer::RecordingObserver;
    use crate::extractors::stage::{Stage, StageStatus};
    use crate::report::build_report;

    fn report_with(stage: Stage, names: &[&str]) -> StageReport {
        let mut report = StageReport::new(stage);
        report.records = names.iter().map(|n| CandidateRecord::named(*n)).collect();
        report
    }

    fn extract(html: &str) -> (Vec<CandidateRecord>, RecordingObserver) {
        let page = PageSource::from_html(html);
        let mut observer = RecordingObserver::default();
        let records = extract_candidates(&page, &ElectionConfig::default(), &mut observer);
        (records, observer)
    }

    #[test]
    fn test_merge_keeps_first_seen() {
        let mut first = report_with(Stage::ScriptJson, &["ANA LUCIA MOTA"]);
        first.records[0].votes = 10;
        let mut second = report_with(Stage::TextPattern, &["  ANA LUCIA MOTA ", "BRUNO CESAR DIAS"]);
        second.records[0].votes = 999;

        let merged = merge_records(vec![first, second]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].votes, 10);
        assert_eq!(merged[1].name, "BRUNO CESAR DIAS");
    }

    #[test]
    fn test_merge_drops_blank_names_and_is_case_sensitive() {
        let merged = merge_records(vec![report_with(
            Stage::DomSelector,
            &["   ", "Ana Lucia Mota", "ANA LUCIA MOTA"],
        )]);
        let names: Vec<&str> = merged.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Lucia Mota", "ANA LUCIA MOTA"]);
    }

    #[test]
    fn test_script_json_candidate() {
        let (records, observer) = extract(
            r#"<html><head><script>var candidatos = [{"nome":"FULANO DE TAL","numero":"15000","situacao":"ELEITO"}];</script></head><body></body></html>"#,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "FULANO DE TAL");
        assert!(records[0].elected);
        assert_eq!(observer.stages[0], (Stage::ScriptJson, StageStatus::Extracted(1)));
        assert_eq!(observer.unique, Some(1));
    }

    #[test]
    fn test_text_pattern_candidate() {
        let (records, _) = extract(
            "<html><body><p>JOAO DA SILVA SANTOS</p><p>12345</p><p>1.234 votos</p></body></html>",
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].votes, 1234);
        assert_eq!(records[0].number.to_string(), "12345");
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        let (records, observer) = extract("");
        assert!(records.is_empty());
        assert_eq!(observer.page_chars, Some(0));
        assert_eq!(observer.stages[0], (Stage::ScriptJson, StageStatus::NotFound));
        assert_eq!(observer.stages[1], (Stage::TextPattern, StageStatus::NotFound));
    }

    #[test]
    fn test_duplicate_across_stages_keeps_script_json() {
        let html = r#"<html><head>
            <script>var candidatos = [{"nome":"JOAO DA SILVA SANTOS","partido":"PSD","votos":50}];</script>
            </head><body><p>JOAO DA SILVA SANTOS</p><p>12345</p><p>1.234 votos</p></body></html>"#;
        let (records, observer) = extract(html);

        let matching: Vec<&CandidateRecord> =
            records.iter().filter(|r| r.key() == "JOAO DA SILVA SANTOS").collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].party, "PSD");
        assert_eq!(matching[0].votes, 50);
        assert_eq!(matching[0].index, None);
        assert_eq!(observer.stages[1], (Stage::TextPattern, StageStatus::Extracted(1)));
    }

    #[test]
    fn test_output_invariants_and_idempotence() {
        let html = r#"<html><head>
            <script>var resultados = [
              {"nomeUrna":"CARLA MENDES ROCHA","numeroUrna":45100,"totalVotos":900,"descricaoSituacao":"Eleito por média"},
              {"nomeUrna":"DIEGO FARIAS LOPES","numeroUrna":45200,"totalVotos":1500,"descricaoSituacao":"Suplente"}
            ];</script></head>
            <body>
              <div class="candidato-card">ELIANE TORRES VIANA 22333 700 votos</div>
              <div class="candidato-card">FABIO RANGEL MOURA 22444 1.700 votos Eleito</div>
            </body></html>"#;
        let config = ElectionConfig::default();

        let (first, _) = extract(html);
        let (second, _) = extract(html);
        let a = build_report(first, &config);
        let b = build_report(second, &config);
        assert_eq!(
            serde_json::to_string(&a.candidatos).unwrap(),
            serde_json::to_string(&b.candidatos).unwrap()
        );

        let names: HashSet<&str> = a.candidatos.iter().map(|r| r.key()).collect();
        assert_eq!(names.len(), a.candidatos.len());
        assert!(a.candidatos.windows(2).all(|w| w[0].votes >= w[1].votes));
        assert_eq!(a.total, a.candidatos.len());
        assert_eq!(a.eleitos, a.candidatos.iter().filter(|r| r.elected).count());
    }
}
