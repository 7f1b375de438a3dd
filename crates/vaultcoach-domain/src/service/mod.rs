//! Domain services

pub mod run_up_analyzer;

pub use run_up_analyzer::{analyze, IDEAL_TAKEOFF_M};
