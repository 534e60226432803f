// src/election/mod.rs
pub mod config;
pub mod models;
pub mod source;

pub use config::ElectionConfig;
pub use models::{CandidateRecord, ResultsReport};
pub use source::PageSource;
