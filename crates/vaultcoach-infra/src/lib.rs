//! Infrastructure layer - reference data loaders

pub mod reference_csv;

pub use reference_csv::{CsvReferenceRepository, MID_MARK_CHART_FILE, POLE_RESISTANCE_FILE};
