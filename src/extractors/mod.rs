// src/extractors/mod.rs
pub mod dom;
pub mod element_text;
pub mod field_map;
pub mod observer;
pub mod script_json;
pub mod stage;
pub mod text_pattern;

// Re-export key extraction types for convenience
pub use dom::DomSelectorExtractor;
pub use observer::{ExtractionObserver, TracingObserver};
pub use script_json::ScriptJsonExtractor;
pub use stage::{ExtractionStrategy, StageReport};
pub use text_pattern::TextPatternExtractor;
