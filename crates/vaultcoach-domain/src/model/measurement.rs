//! Athlete measurement record and its raw request form

use serde::{Deserialize, Serialize};
use vaultcoach_types::{FieldIssue, ValidationError};

/// 湾曲 - how much the pole flexed during the vault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoleBend {
    /// 少
    Less,
    /// 普通
    Normal,
    /// 大
    Large,
}

/// 着地点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandingPoint {
    /// 手前
    Front,
    /// 中央
    Center,
    /// 奥
    Back,
}

/// 助走スピード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunupSpeed {
    /// 遅い
    Slow,
    /// 普通
    Normal,
    /// 良い
    Good,
}

impl PoleBend {
    /// Accepts the Japanese form labels and English names
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim() {
            "少" => Some(Self::Less),
            "普通" => Some(Self::Normal),
            "大" => Some(Self::Large),
            other => match other.to_ascii_lowercase().as_str() {
                "less" => Some(Self::Less),
                "normal" => Some(Self::Normal),
                "large" => Some(Self::Large),
                _ => None,
            },
        }
    }
}

impl LandingPoint {
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim() {
            "手前" => Some(Self::Front),
            "中央" => Some(Self::Center),
            "奥" => Some(Self::Back),
            other => match other.to_ascii_lowercase().as_str() {
                "front" => Some(Self::Front),
                "center" => Some(Self::Center),
                "back" => Some(Self::Back),
                _ => None,
            },
        }
    }
}

impl RunupSpeed {
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim() {
            "遅い" => Some(Self::Slow),
            "普通" => Some(Self::Normal),
            "良い" => Some(Self::Good),
            other => match other.to_ascii_lowercase().as_str() {
                "slow" => Some(Self::Slow),
                "normal" => Some(Self::Normal),
                "good" => Some(Self::Good),
                _ => None,
            },
        }
    }
}

/// Validated measurement consumed by the analysis engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteMeasurement {
    /// 使用ポール長 (ft)
    pub pole_length_ft: f64,
    /// 使用ポール硬さ (lbs)
    pub pole_weight_lbs: f64,
    /// グリップ位置 - distance from the pole top (cm)
    pub grip_position_cm: f64,
    /// 踏切位置のズレ (m); positive = took off short
    pub takeoff_offset_m: f64,
    /// 6歩前中間マーク (m)
    pub mid_mark_m: f64,
    pub pole_bend: PoleBend,
    pub landing_point: LandingPoint,
    pub runup_speed: RunupSpeed,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A request field as it arrives: JSON number, free text, or anything else
/// (kept so validation can name the field instead of failing in serde)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl FieldValue {
    fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.trim().is_empty())
    }

    fn raw(&self) -> String {
        match self {
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Other(v) => v.to_string(),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

/// Raw analysis request (form body). Every field is optional until validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementInput {
    pub pole_length: Option<FieldValue>,
    pub pole_weight: Option<FieldValue>,
    pub grip_position: Option<FieldValue>,
    pub takeoff_offset: Option<FieldValue>,
    pub mid_mark: Option<FieldValue>,
    pub pole_bend: Option<FieldValue>,
    pub landing_point: Option<FieldValue>,
    pub runup_speed: Option<FieldValue>,
    pub notes: Option<String>,
}

impl MeasurementInput {
    /// Overlay every field that is set in `other`
    pub fn merge(&mut self, other: MeasurementInput) {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        overlay!(
            pole_length,
            pole_weight,
            grip_position,
            takeoff_offset,
            mid_mark,
            pole_bend,
            landing_point,
            runup_speed,
            notes
        );
    }

    /// Validate every field, collecting all problems before failing
    pub fn validate(&self) -> Result<AthleteMeasurement, ValidationError> {
        let mut errors = ValidationError::default();

        let pole_length = number(&mut errors, "poleLength", "使用ポール長", &self.pole_length, false);
        let pole_weight = number(&mut errors, "poleWeight", "使用ポール硬さ", &self.pole_weight, false);
        let grip = number(&mut errors, "gripPosition", "グリップ位置", &self.grip_position, false);
        let offset = number(&mut errors, "takeoffOffset", "踏切位置のズレ", &self.takeoff_offset, true);
        let mid_mark = number(&mut errors, "midMark", "6歩前中間マーク", &self.mid_mark, false);
        let bend = option(&mut errors, "poleBend", "湾曲", &self.pole_bend, PoleBend::from_label);
        let landing = option(&mut errors, "landingPoint", "着地点", &self.landing_point, LandingPoint::from_label);
        let speed = option(&mut errors, "runupSpeed", "助走スピード", &self.runup_speed, RunupSpeed::from_label);

        match (pole_length, pole_weight, grip, offset, mid_mark, bend, landing, speed) {
            (
                Some(pole_length_ft),
                Some(pole_weight_lbs),
                Some(grip_position_cm),
                Some(takeoff_offset_m),
                Some(mid_mark_m),
                Some(pole_bend),
                Some(landing_point),
                Some(runup_speed),
            ) if errors.is_empty() => Ok(AthleteMeasurement {
                pole_length_ft,
                pole_weight_lbs,
                grip_position_cm,
                takeoff_offset_m,
                mid_mark_m,
                pole_bend,
                landing_point,
                runup_speed,
                notes: self.notes.clone().filter(|n| !n.trim().is_empty()),
            }),
            _ => Err(errors),
        }
    }
}

fn number(
    errors: &mut ValidationError,
    field: &'static str,
    label: &'static str,
    value: &Option<FieldValue>,
    strip_inner_whitespace: bool,
) -> Option<f64> {
    let value = match value {
        Some(v) if !v.is_blank() => v,
        _ => {
            errors.push(field, label, FieldIssue::Missing);
            return None;
        }
    };
    let parsed = match value {
        FieldValue::Number(n) => Some(*n),
        FieldValue::Text(s) => {
            let cleaned: String = if strip_inner_whitespace {
                s.chars().filter(|c| !c.is_whitespace()).collect()
            } else {
                s.trim().to_string()
            };
            cleaned.parse::<f64>().ok()
        }
        FieldValue::Other(_) => None,
    };
    match parsed {
        Some(n) if n.is_finite() => Some(n),
        _ => {
            errors.push(field, label, FieldIssue::NotNumeric(value.raw()));
            None
        }
    }
}

fn option<T>(
    errors: &mut ValidationError,
    field: &'static str,
    label: &'static str,
    value: &Option<FieldValue>,
    parse: fn(&str) -> Option<T>,
) -> Option<T> {
    let value = match value {
        Some(v) if !v.is_blank() => v,
        _ => {
            errors.push(field, label, FieldIssue::Missing);
            return None;
        }
    };
    let parsed = match value {
        FieldValue::Text(s) => parse(s),
        FieldValue::Number(_) | FieldValue::Other(_) => None,
    };
    if parsed.is_none() {
        errors.push(field, label, FieldIssue::UnknownOption(value.raw().trim().to_string()));
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_input() -> MeasurementInput {
        MeasurementInput {
            pole_length: Some(14.0.into()),
            pole_weight: Some("150".into()),
            grip_position: Some(50.0.into()),
            takeoff_offset: Some("+ 0.2".into()),
            mid_mark: Some("13.5".into()),
            pole_bend: Some("普通".into()),
            landing_point: Some("中央".into()),
            runup_speed: Some("良い".into()),
            notes: None,
        }
    }

    #[test]
    fn test_validate_accepts_numbers_and_strings() {
        let m = full_input().validate().unwrap();
        assert_eq!(m.pole_length_ft, 14.0);
        assert_eq!(m.pole_weight_lbs, 150.0);
        assert!((m.takeoff_offset_m - 0.2).abs() < 1e-12);
        assert_eq!(m.pole_bend, PoleBend::Normal);
        assert_eq!(m.landing_point, LandingPoint::Center);
        assert_eq!(m.runup_speed, RunupSpeed::Good);
    }

    #[test]
    fn test_validate_negative_offset_with_spaces() {
        let mut input = full_input();
        input.takeoff_offset = Some(" - 0.15 ".into());
        let m = input.validate().unwrap();
        assert!((m.takeoff_offset_m + 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut input = full_input();
        input.pole_length = None;
        input.grip_position = Some("abc".into());
        input.runup_speed = Some(" very fast ".into());

        let err = input.validate().unwrap_err();
        assert_eq!(err.field_names(), vec!["poleLength", "gripPosition", "runupSpeed"]);
        assert_eq!(err.fields[0].issue, FieldIssue::Missing);
        assert_eq!(err.fields[1].issue, FieldIssue::NotNumeric("abc".to_string()));
        assert_eq!(err.fields[2].issue, FieldIssue::UnknownOption("very fast".to_string()));
    }

    #[test]
    fn test_blank_string_is_missing() {
        let mut input = full_input();
        input.mid_mark = Some("   ".into());
        input.pole_bend = Some("".into());
        let err = input.validate().unwrap_err();
        assert_eq!(err.field_names(), vec!["midMark", "poleBend"]);
        assert!(err.fields.iter().all(|f| f.issue == FieldIssue::Missing));
    }

    #[test]
    fn test_non_finite_number_rejected() {
        let mut input = full_input();
        input.pole_weight = Some("NaN".into());
        let err = input.validate().unwrap_err();
        assert_eq!(err.field_names(), vec!["poleWeight"]);
    }

    #[test]
    fn test_english_labels() {
        assert_eq!(PoleBend::from_label("LARGE"), Some(PoleBend::Large));
        assert_eq!(LandingPoint::from_label("back"), Some(LandingPoint::Back));
        assert_eq!(RunupSpeed::from_label("Slow"), Some(RunupSpeed::Slow));
        assert_eq!(RunupSpeed::from_label("普通"), Some(RunupSpeed::Normal));
        assert_eq!(PoleBend::from_label("medium"), None);
    }

    #[test]
    fn test_merge_overrides_only_set_fields() {
        let mut base = full_input();
        base.merge(MeasurementInput {
            grip_position: Some(60.0.into()),
            notes: Some("windy".to_string()),
            ..Default::default()
        });
        let m = base.validate().unwrap();
        assert_eq!(m.grip_position_cm, 60.0);
        assert_eq!(m.pole_weight_lbs, 150.0);
        assert_eq!(m.notes.as_deref(), Some("windy"));
    }

    #[test]
    fn test_input_deserializes_mixed_json() {
        let json = r#"{"poleLength":"14","poleWeight":150,"gripPosition":"50",
            "takeoffOffset":"-0.1","midMark":13.5,"poleBend":"大",
            "landingPoint":"奥","runupSpeed":"遅い","notes":"雨"}"#;
        let input: MeasurementInput = serde_json::from_str(json).unwrap();
        let m = input.validate().unwrap();
        assert_eq!(m.pole_bend, PoleBend::Large);
        assert_eq!(m.landing_point, LandingPoint::Back);
        assert_eq!(m.runup_speed, RunupSpeed::Slow);
        assert_eq!(m.notes.as_deref(), Some("雨"));
    }

    #[test]
    fn test_wrong_json_types_are_named_fields() {
        let json = r#"{"poleLength":"14","poleWeight":true,"gripPosition":[50],
            "takeoffOffset":"0","midMark":{"m":13.5},"poleBend":1,
            "landingPoint":false,"runupSpeed":"良い"}"#;
        let input: MeasurementInput = serde_json::from_str(json).unwrap();

        let err = input.validate().unwrap_err();
        assert_eq!(
            err.field_names(),
            vec!["poleWeight", "gripPosition", "midMark", "poleBend", "landingPoint"]
        );
        assert_eq!(err.fields[0].issue, FieldIssue::NotNumeric("true".to_string()));
        assert_eq!(err.fields[1].issue, FieldIssue::NotNumeric("[50]".to_string()));
        assert_eq!(err.fields[3].issue, FieldIssue::UnknownOption("1".to_string()));
        assert_eq!(err.fields[4].issue, FieldIssue::UnknownOption("false".to_string()));
    }

    #[test]
    fn test_json_null_counts_as_missing() {
        let json = r#"{"poleLength":null,"poleWeight":150,"gripPosition":50,
            "takeoffOffset":0,"midMark":13.5,"poleBend":null,
            "landingPoint":"中央","runupSpeed":"良い"}"#;
        let input: MeasurementInput = serde_json::from_str(json).unwrap();

        let err = input.validate().unwrap_err();
        assert_eq!(err.field_names(), vec!["poleLength", "poleBend"]);
        assert!(err.fields.iter().all(|f| f.issue == FieldIssue::Missing));
    }
}
