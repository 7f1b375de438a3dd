//! Reference table rows

use serde::{Deserialize, Serialize};

/// One row of the pole resistance table (pole_resistance.csv)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoleResistanceRow {
    pub length_ft: f64,
    pub weight_lbs: f64,
    /// Precomputed in the table; not re-derived at runtime
    pub resistance_index: f64,
}

/// One row of the mid-mark chart (dj_mid_chart.csv)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MidMarkRow {
    pub grip_cm: f64,
    pub takeoff_cm: f64,
    pub mid_mark_m: f64,
}

/// Both reference tables, in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub poles: Vec<PoleResistanceRow>,
    pub mid_marks: Vec<MidMarkRow>,
}

impl ReferenceTables {
    pub fn new(poles: Vec<PoleResistanceRow>, mid_marks: Vec<MidMarkRow>) -> Self {
        Self { poles, mid_marks }
    }
}
