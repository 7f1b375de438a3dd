//! Error types for vaultcoach

use serde::Serialize;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing environment variable: {0}")]
    MissingEnv(String),
}

/// Why a single input field was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum FieldIssue {
    /// Field absent or blank
    Missing,
    /// Field present but not a finite number
    NotNumeric(String),
    /// Categorical field with an unrecognised option
    UnknownOption(String),
}

/// One rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Wire name of the field (e.g. "poleLength")
    pub field: &'static str,
    /// 画面表示用ラベル (e.g. "使用ポール長")
    pub label: &'static str,
    pub issue: FieldIssue,
}

/// Measurement input rejected before any computation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("invalid input: {}", describe_fields(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn push(&mut self, field: &'static str, label: &'static str, issue: FieldIssue) {
        self.fields.push(FieldError { field, label, issue });
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of the offending fields, in input order
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.field).collect()
    }
}

fn describe_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|err| match &err.issue {
            FieldIssue::Missing => format!("{} ({}) is missing", err.field, err.label),
            FieldIssue::NotNumeric(raw) => format!("{} ({}) is not a number: {:?}", err.field, err.label, raw),
            FieldIssue::UnknownOption(raw) => {
                format!("{} ({}) has unknown option: {:?}", err.field, err.label, raw)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Reference data unavailable ({resource}): {reason}")]
    ReferenceDataUnavailable { resource: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("AI backend error: {0}")]
    Backend(String),

    #[error("Prompt template error: {0}")]
    Template(String),
}

impl Error {
    pub fn reference_unavailable(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::ReferenceDataUnavailable {
            resource: resource.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
