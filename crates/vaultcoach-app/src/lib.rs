//! Application service layer - analysis and coaching use cases, messages, config

pub mod app;
pub mod config;
pub mod messages;
