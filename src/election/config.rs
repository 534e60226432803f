// src/election/config.rs
use serde::Deserialize;
use std::path::Path;
use crate::utils::AppError;

pub const DEFAULT_INPUT_FILE: &str = "debug_tse_page.html";
pub const DEFAULT_OUTPUT_FILE: &str = "candidatos_araruama_parsed_2024.json";

/// Seats filled in the Araruama 2024 council race. The text-pattern path marks
/// this many leading records as elected.
pub const DEFAULT_ELECTED_SEATS: usize = 21;

/// Metadata stamped on the report plus the tunables of the heuristics.
/// Every field may be omitted from a config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ElectionConfig {
    pub municipio: String,
    pub estado: String,
    pub cargo: String,
    pub ano: u32,
    pub fonte: String,
    pub url_origem: String,
    pub metodo: String,
    pub elected_seats: usize,
}

impl Default for ElectionConfig {
    fn default() -> Self {
        Self {
            municipio: "Araruama".to_string(),
            estado: "RJ".to_string(),
            cargo: "Vereador".to_string(),
            ano: 2024,
            fonte: "TSE - Dados extraídos via parsing HTML".to_string(),
            url_origem: "https://resultados.tse.jus.br/oficial/app/index.html#/eleicao;e=e619;uf=rj;mu=58033;tipo=3/resultados/cargo/13".to_string(),
            metodo: "Parsing HTML + Padrões de texto".to_string(),
            elected_seats: DEFAULT_ELECTED_SEATS,
        }
    }
}

impl ElectionConfig {
    /// Reads a JSON config file. Missing keys fall back to the defaults above.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Cannot read config {}: {}", path.display(), e)))?;
        let config: ElectionConfig = serde_json::from_str(&raw)
            .map_err(|e| AppError::Config(format!("Invalid config {}: {}", path.display(), e)))?;
        tracing::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"municipio": "Cabo Frio", "elected_seats": 17}"#).unwrap();

        let config = ElectionConfig::from_file(&path).unwrap();
        assert_eq!(config.municipio, "Cabo Frio");
        assert_eq!(config.elected_seats, 17);
        assert_eq!(config.estado, "RJ");
        assert_eq!(config.ano, 2024);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ElectionConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
