//! Use cases

pub mod analysis_service;
pub mod coaching_service;

pub use analysis_service::{analyze_run_up, AnalysisReport, ReportMessages};
pub use coaching_service::{api_key_from_env, build_coach, preview_advice, request_advice, API_KEY_ENV};
