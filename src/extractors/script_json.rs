// src/extractors/script_json.rs
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;
use serde_json::Value;
use crate::election::PageSource;
use crate::extractors::field_map::map_candidate;
use crate::extractors::observer::ExtractionObserver;
use crate::extractors::stage::{ExtractionStrategy, Stage, StageReport};
use crate::utils::error::ExtractError;

static SCRIPT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("script").expect("Failed to compile SCRIPT_SELECTOR")
});

// `candidatos = [...]`, `resultado: [...]`, `dados=[...]`. The array body is
// lazy, so a nested array ends the match early and fails to decode.
static ARRAY_LITERAL_RE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?is)candidatos?\s*[:=]\s*(\[.*?\])",
        r"(?is)resultados?\s*[:=]\s*(\[.*?\])",
        r"(?is)dados?\s*[:=]\s*(\[.*?\])",
    ]
    .iter()
    .filter_map(|pat| Regex::new(pat).ok())
    .collect()
});

/// Pulls candidate arrays embedded as JSON literals in inline scripts.
#[derive(Debug, Default)]
pub struct ScriptJsonExtractor;

impl ScriptJsonExtractor {
    pub fn new() -> Self { Self }

    /// Scans raw script bodies. Usable without a parsed document.
    pub fn extract_from_scripts<S: AsRef<str>>(&self, scripts: &[S]) -> StageReport {
        let mut report = StageReport::new(Stage::ScriptJson);

        for script in scripts {
            let content = script.as_ref();
            for re in ARRAY_LITERAL_RE.iter() {
                for caps in re.captures_iter(content) {
                    let Some(literal) = caps.get(1) else { continue };
                    match serde_json::from_str::<Value>(literal.as_str()) {
                        Ok(Value::Array(items)) => self.collect_items(&items, &mut report),
                        Ok(_) => {}
                        Err(e) => report.skipped.push(ExtractError::MalformedJson(format!(
                            "{} ({})",
                            truncate(literal.as_str(), 80),
                            e
                        ))),
                    }
                }
            }
        }

        report
    }

    fn collect_items(&self, items: &[Value], report: &mut StageReport) {
        for item in items {
            let Value::Object(map) = item else { continue };
            if !item.to_string().to_lowercase().contains("nome") {
                continue;
            }
            match map_candidate(map) {
                Ok(record) => {
                    tracing::trace!("Script JSON candidate: {}", record.name);
                    report.records.push(record);
                }
                Err(e) => report.skipped.push(e),
            }
        }
    }
}

impl ExtractionStrategy for ScriptJsonExtractor {
    fn stage(&self) -> Stage {
        Stage::ScriptJson
    }

    fn extract(&self, page: &PageSource, observer: &mut dyn ExtractionObserver) -> StageReport {
        let scripts: Vec<String> = page
            .document
            .select(&SCRIPT_SELECTOR)
            .map(|script| script.text().collect::<String>())
            .filter(|text| !text.trim().is_empty())
            .collect();
        observer.scripts_found(scripts.len());

        self.extract_from_scripts(&scripts)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
