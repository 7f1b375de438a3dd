//! Analysis Service - run-up & pole analysis use case
//!
//! 1. Validate the raw measurement (all fields, all-or-nothing)
//! 2. Load both reference tables
//! 3. Run the analysis engine
//! 4. Render localized messages next to the numeric result

use serde::Serialize;
use tracing::info;

use vaultcoach_domain::model::{AnalysisResult, MeasurementInput};
use vaultcoach_domain::repository::ReferenceDataRepository;
use vaultcoach_domain::service::analyze;
use vaultcoach_types::{Locale, Result};

use crate::messages::Messages;

/// Human-readable texts for one analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMessages {
    pub recommendation: String,
    pub start_adjustment: Option<String>,
    pub tech_feedback: String,
    pub grip_direction: Option<String>,
}

impl ReportMessages {
    pub fn render(result: &AnalysisResult, locale: Locale) -> Self {
        let m = Messages::for_locale(locale);
        Self {
            recommendation: m.recommendation(&result.recommendation),
            start_adjustment: result.start_adjustment.as_ref().map(|a| m.start_adjustment(a)),
            tech_feedback: m.tech_feedback(&result.tech_feedback),
            grip_direction: result
                .grip_adjustment
                .as_ref()
                .map(|g| m.grip_direction(g.direction).to_string()),
        }
    }
}

/// Result of one analysis request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub locale: Locale,
    /// Input as received
    pub received_data: MeasurementInput,
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub messages: ReportMessages,
}

/// Main entry point: analyze one jump
pub fn analyze_run_up<R>(input: &MeasurementInput, repository: &R, locale: Locale) -> Result<AnalysisReport>
where
    R: ReferenceDataRepository + ?Sized,
{
    info!(%locale, "analysis request received");

    let measurement = input.validate()?;
    let tables = repository.load_tables()?;
    info!(
        poles = tables.poles.len(),
        mid_marks = tables.mid_marks.len(),
        "reference tables loaded"
    );

    let result = analyze(&measurement, &tables)?;
    let messages = ReportMessages::render(&result, locale);

    Ok(AnalysisReport {
        locale,
        received_data: input.clone(),
        result,
        messages,
    })
}
