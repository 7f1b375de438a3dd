//! Analysis result types

use serde::{Deserialize, Serialize};

/// A pole identified by length and stiffness rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoleSpec {
    pub length_ft: f64,
    pub weight_lbs: f64,
}

/// Outcome of the pole decision procedure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PoleRecommendation {
    /// Bend was normal; no table search performed
    KeepCurrent,
    /// Closest resistance index inside the ±1ft / ±15lbs window
    Recommended {
        pole: PoleSpec,
        resistance_index: f64,
        target_resistance_index: f64,
    },
    /// Window was empty; keep the current pole
    NoSuitablePole { target_resistance_index: f64 },
}

impl PoleRecommendation {
    pub fn recommended_pole(&self) -> Option<PoleSpec> {
        match self {
            PoleRecommendation::Recommended { pole, .. } => Some(*pole),
            _ => None,
        }
    }
}

/// グリップ調整の方向
///
/// `Higher` moves the numeric distance-from-top *down* (toward the tip).
/// The label follows the coaching convention used on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GripDirection {
    Higher,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GripAdjustment {
    pub direction: GripDirection,
    pub amount_cm: f64,
    pub new_grip_position_cm: f64,
    pub new_grip_fists: i64,
}

/// スタート位置の移動方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartDirection {
    /// Away from the box (athlete took off short)
    Back,
    /// Toward the box (athlete overshot)
    Forward,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAdjustment {
    pub direction: StartDirection,
    pub amount_cm: i64,
}

/// One sentence of categorical technical feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TechnicalFeedback {
    /// Pole probably too stiff
    PoleBendLess,
    /// Pole probably too soft
    PoleBendLarge,
    /// Under-rotation
    LandingFront,
    /// Over-rotation
    LandingBack,
    /// Balanced jump
    LandingCenter,
    RunupSlow,
    RunupGood,
}

/// Output of one analysis pass. Numbers are rounded for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub effective_lbs: f64,
    pub resistance_index: f64,
    pub takeoff_physical_m: f64,
    pub ideal_takeoff_m: f64,
    pub recommended_mid_mark_m: f64,
    pub current_mid_mark_m: f64,
    pub mid_mark_difference_cm: f64,
    pub current_grip_position_cm: f64,
    pub current_grip_fists: i64,
    pub new_pole_grip_from_top_cm: Option<f64>,
    pub new_pole_grip_fists: Option<i64>,
    pub grip_adjustment: Option<GripAdjustment>,
    pub start_adjustment: Option<StartAdjustment>,
    /// Empty means "no technical feedback"
    pub tech_feedback: Vec<TechnicalFeedback>,
    pub new_pole: Option<PoleSpec>,
    pub recommendation: PoleRecommendation,
}
