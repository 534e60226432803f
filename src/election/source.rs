// src/election/source.rs
use scraper::Html;
use std::path::Path;
use crate::utils::error::SourceError;

/// A saved results page: the raw text for the regex passes and the parsed
/// tree for the selector passes.
pub struct PageSource {
    pub html: String,
    pub document: Html,
}

impl PageSource {
    /// Reads a saved page from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        tracing::info!("Reading saved page: {}", path.display());

        let html = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::from_html(html))
    }

    /// Like `load`, but an unreadable page is logged and treated as empty, so
    /// the run ends with no candidates instead of an error.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("Failed to analyse HTML: {}", e);
                Self::from_html(String::new())
            }
        }
    }

    pub fn from_html(html: impl Into<String>) -> Self {
        let html = html.into();
        let document = Html::parse_document(&html);
        Self { html, document }
    }

    /// Size in characters, as reported in progress output.
    pub fn char_len(&self) -> usize {
        self.html.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<html><body>Eleição</body></html>").unwrap();

        let page = PageSource::load(&path).unwrap();
        assert!(page.html.contains("Eleição"));
        assert_eq!(page.char_len(), 33);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PageSource::load(dir.path().join("missing.html"));
        assert!(matches!(result, Err(SourceError::Io { .. })));
    }

    #[test]
    fn test_unreadable_page_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let page = PageSource::load_or_empty(dir.path().join("missing.html"));
        assert!(page.html.is_empty());
        assert_eq!(page.char_len(), 0);
    }
}
