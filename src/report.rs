// src/report.rs
use crate::election::{CandidateRecord, ElectionConfig, ResultsReport};

const PREVIEW_LEN: usize = 10;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sorts by votes (descending, ties keep merge order), counts, and wraps the
/// records in the metadata envelope.
pub fn build_report(mut records: Vec<CandidateRecord>, config: &ElectionConfig) -> ResultsReport {
    records.sort_by(|a, b| b.votes.cmp(&a.votes));
    let eleitos = records.iter().filter(|r| r.elected).count();

    ResultsReport {
        municipio: config.municipio.clone(),
        estado: config.estado.clone(),
        cargo: config.cargo.clone(),
        ano: config.ano,
        total: records.len(),
        eleitos,
        fonte: config.fonte.clone(),
        url_origem: config.url_origem.clone(),
        data_extracao: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        metodo: config.metodo.clone(),
        candidatos: records,
    }
}

/// One console line per record.
pub fn preview_line(record: &CandidateRecord) -> String {
    let marker = if record.elected { "[ELEITO]" } else { "[NAO ELEITO]" };
    format!("{} {} ({}) - {} votos", marker, record.name, record.party, record.votes)
}

/// Logs the top of the sorted report.
pub fn log_preview(report: &ResultsReport) {
    tracing::info!("Total: {} candidates, {} elected", report.total, report.eleitos);
    tracing::info!("Sample of extracted data:");
    for record in report.candidatos.iter().take(PREVIEW_LEN) {
        tracing::info!("{}", preview_line(record));
    }
}
