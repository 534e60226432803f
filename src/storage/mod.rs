// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::election::ResultsReport;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Writes the report as pretty-printed UTF-8 JSON (2-space indent,
    /// non-ASCII kept as is).
    pub fn save_report(&self, report: &ResultsReport, filename: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(filename);

        let json = serde_json::to_string_pretty(report)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, json)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved report to {}", file_path.display());

        Ok(file_path)
    }

    /// Directory for debug artifacts, created on demand.
    pub fn debug_dir(&self) -> Result<PathBuf, StorageError> {
        let dir = self.base_dir.join("debug");
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .map_err(StorageError::IoError)?;
        }
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::election::{CandidateRecord, ElectionConfig};
    use crate::report::build_report;

    #[test]
    fn test_save_report_round_trips_and_keeps_accents() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path().join("out")).unwrap();

        let mut record = CandidateRecord::named("JOSÉ CONCEIÇÃO");
        record.votes = 321;
        let report = build_report(vec![record], &ElectionConfig::default());

        let path = storage.save_report(&report, "report.json").unwrap();
        let written = fs::read_to_string(&path).unwrap();

        assert!(written.contains("JOSÉ CONCEIÇÃO"), "non-ASCII must not be escaped");
        assert!(written.contains("\n  \"municipio\": \"Araruama\""), "2-space indent");

        let parsed: ResultsReport = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.total, 1);
        assert_eq!(parsed.candidatos[0].votes, 321);
        assert_eq!(parsed.fonte, "TSE - Dados extraídos via parsing HTML");
    }

    #[test]
    fn test_debug_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let debug = storage.debug_dir().unwrap();
        assert!(debug.is_dir());
        assert_eq!(storage.base_dir(), dir.path());
    }
}
