//! Domain model types

pub mod analysis;
pub mod measurement;
pub mod reference;

pub use analysis::{
    AnalysisResult, GripAdjustment, GripDirection, PoleRecommendation, PoleSpec, StartAdjustment,
    StartDirection, TechnicalFeedback,
};
pub use measurement::{
    AthleteMeasurement, FieldValue, LandingPoint, MeasurementInput, PoleBend, RunupSpeed,
};
pub use reference::{MidMarkRow, PoleResistanceRow, ReferenceTables};
