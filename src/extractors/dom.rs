// src/extractors/dom.rs
use scraper::{ElementRef, Selector};
use crate::election::PageSource;
use crate::extractors::element_text::parse_element_text;
use crate::extractors::observer::ExtractionObserver;
use crate::extractors::stage::{ExtractionStrategy, Stage, StageReport};
use crate::utils::error::ExtractError;

/// Structural guesses at where a results page keeps its candidate cards.
/// `[data-*=...]` parses but can never match an attribute; it stays in the
/// list so saved pages keep producing the same results.
pub const CANDIDATE_SELECTORS: [&str; 8] = [
    r#"[class*="candidat"]"#,
    r#"[class*="card"]"#,
    r#"[class*="result"]"#,
    r#"[data-*="candidat"]"#,
    r#"div[ng-repeat*="candidat"]"#,
    ".eleito, .nao-eleito",
    r#"[class*="nome"]"#,
    r#"[class*="votos"]"#,
];

const MAX_ELEMENTS_PER_SELECTOR: usize = 10;
const MIN_TEXT_CHARS: usize = 5;

/// Visible text of an element: each text node trimmed, then concatenated with
/// no separator. Adjacent nodes run together ("SANTOS" + "55123" becomes
/// "SANTOS55123"), which the name and number patterns then see as one word.
fn collapsed_text(element: ElementRef) -> String {
    element.text().map(str::trim).collect()
}

/// Applies the selector list to the parsed tree and parses one candidate per
/// matched element.
#[derive(Debug)]
pub struct DomSelectorExtractor {
    selectors: Vec<String>,
}

impl Default for DomSelectorExtractor {
    fn default() -> Self {
        Self::with_selectors(CANDIDATE_SELECTORS)
    }
}

impl DomSelectorExtractor {
    pub fn new() -> Self { Self::default() }

    pub fn with_selectors<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { selectors: selectors.into_iter().map(Into::into).collect() }
    }
}

impl ExtractionStrategy for DomSelectorExtractor {
    fn stage(&self) -> Stage {
        Stage::DomSelector
    }

    fn extract(&self, page: &PageSource, observer: &mut dyn ExtractionObserver) -> StageReport {
        let mut report = StageReport::new(Stage::DomSelector);

        for raw in &self.selectors {
            let selector = match Selector::parse(raw) {
                Ok(selector) => selector,
                Err(e) => {
                    report.skipped.push(ExtractError::InvalidSelector {
                        selector: raw.clone(),
                        reason: format!("{:?}", e),
                    });
                    continue;
                }
            };

            let elements: Vec<ElementRef> = page.document.select(&selector).collect();
            if elements.is_empty() {
                continue;
            }
            observer.selector_matched(raw, elements.len());

            for element in elements.into_iter().take(MAX_ELEMENTS_PER_SELECTOR) {
                let text = collapsed_text(element);
                if text.chars().count() <= MIN_TEXT_CHARS {
                    continue;
                }
                tracing::trace!("<{}> text: '{}'", element.value().name(), text);
                match parse_element_text(&text) {
                    Ok(record) => report.records.push(record),
                    Err(e) => report.skipped.push(e),
                }
            }
        }

        report
    }
}
