//! Run-up & pole analysis engine
//!
//! Turns one [`AthleteMeasurement`] plus the two reference tables into an
//! [`AnalysisResult`]. Deterministic and free of I/O; tables are passed in.

use tracing::debug;

use crate::model::{
    AnalysisResult, AthleteMeasurement, GripAdjustment, GripDirection, LandingPoint, MidMarkRow,
    PoleBend, PoleRecommendation, PoleResistanceRow, PoleSpec, ReferenceTables, RunupSpeed,
    StartAdjustment, StartDirection, TechnicalFeedback,
};
use vaultcoach_types::{Error, Result};

/// Effective stiffness gained per cm of grip (lbs/cm)
const GRIP_LBS_PER_CM: f64 = 0.656;
/// Baseline pole length for the resistance index (ft)
const RI_BASE_LENGTH_FT: f64 = 14.0;
/// Resistance index per foot of extra length
const RI_PER_FOOT: f64 = 20.0;
/// Resistance index shift when the bend is off
const RI_BEND_STEP: f64 = 10.0;
/// Search window around the current pole
const POLE_LENGTH_WINDOW_FT: f64 = 1.0;
const POLE_WEIGHT_WINDOW_LBS: f64 = 15.0;

/// Reference takeoff distance (m)
pub const IDEAL_TAKEOFF_M: f64 = 3.30;
const TAKEOFF_MIN_M: f64 = 3.00;
const TAKEOFF_MAX_M: f64 = 4.10;

/// Mid-mark correction range and the offset that saturates it
const MID_MARK_ADJUST_MIN_M: f64 = 0.05;
const MID_MARK_ADJUST_MAX_M: f64 = 0.20;
const MID_MARK_SATURATION_OFFSET_M: f64 = 0.30;
const MID_MARK_STEP_M: f64 = 0.05;

const GRIP_ADJUST_CM: f64 = 20.0;
const CM_PER_FIST: f64 = 10.0;

/// Run the full analysis
///
/// Fails with `ReferenceDataUnavailable` if either table is empty.
/// Out-of-range numeric input never fails: it is clamped or degrades to
/// a "no suitable pole" outcome.
pub fn analyze(m: &AthleteMeasurement, tables: &ReferenceTables) -> Result<AnalysisResult> {
    if tables.poles.is_empty() {
        return Err(Error::reference_unavailable("pole_resistance", "table has no usable rows"));
    }
    if tables.mid_marks.is_empty() {
        return Err(Error::reference_unavailable("dj_mid_chart", "table has no usable rows"));
    }

    let effective = effective_lbs(m.pole_weight_lbs, m.grip_position_cm);
    let ri = resistance_index(m.pole_length_ft, m.pole_weight_lbs);
    debug!(effective_lbs = effective, resistance_index = ri, "stiffness computed");

    let current_pole = PoleSpec {
        length_ft: m.pole_length_ft,
        weight_lbs: m.pole_weight_lbs,
    };
    let recommendation = recommend_pole(current_pole, ri, m.pole_bend, &tables.poles);
    debug!(?recommendation, "pole decision");

    let takeoff = takeoff_physical(m.takeoff_offset_m);
    let mid_mark = recommend_mid_mark(takeoff, m.takeoff_offset_m, &tables.mid_marks)
        .ok_or_else(|| Error::reference_unavailable("dj_mid_chart", "no matching takeoff row"))?;
    let difference_cm = (mid_mark - m.mid_mark_m) * 100.0;
    debug!(takeoff_physical = takeoff, recommended_mid_mark = mid_mark, "mid mark computed");

    let start = start_adjustment(m.takeoff_offset_m);
    let feedback = technical_feedback(m.pole_bend, m.landing_point, m.runup_speed);
    let grip_adjustment = grip_adjustment(m.pole_bend, m.grip_position_cm);

    let new_pole = recommendation.recommended_pole();
    let new_pole_grip = new_pole
        .filter(|pole| *pole != current_pole)
        .map(|_| new_pole_grip_from_top(m.grip_position_cm));
    debug!(?start, ?feedback, ?grip_adjustment, "coaching adjustments");

    Ok(AnalysisResult {
        effective_lbs: round_to(effective, 2),
        resistance_index: round_to(ri, 2),
        takeoff_physical_m: round_to(takeoff, 2),
        ideal_takeoff_m: IDEAL_TAKEOFF_M,
        recommended_mid_mark_m: round_to(mid_mark, 2),
        current_mid_mark_m: round_to(m.mid_mark_m, 2),
        mid_mark_difference_cm: round_to(difference_cm, 1),
        current_grip_position_cm: round_to(m.grip_position_cm, 1),
        current_grip_fists: fists(m.grip_position_cm),
        new_pole_grip_from_top_cm: new_pole_grip.map(|(cm, _)| round_to(cm, 1)),
        new_pole_grip_fists: new_pole_grip.map(|(_, f)| f),
        grip_adjustment,
        start_adjustment: start,
        tech_feedback: feedback,
        new_pole,
        recommendation,
    })
}

/// Effective_lbs = PoleWeight_lbs + Grip_cm × 0.656
pub fn effective_lbs(pole_weight_lbs: f64, grip_position_cm: f64) -> f64 {
    pole_weight_lbs + grip_position_cm * GRIP_LBS_PER_CM
}

/// RI = PoleWeight + 20 × (PoleLength − 14)
pub fn resistance_index(pole_length_ft: f64, pole_weight_lbs: f64) -> f64 {
    pole_weight_lbs + RI_PER_FOOT * (pole_length_ft - RI_BASE_LENGTH_FT)
}

/// Pick a pole from the table based on the reported bend
///
/// Too little bend means the pole is too stiff, so the target RI drops by
/// 10; too much bend raises it by 10. Only poles within ±1ft and ±15lbs
/// of the current pole are considered. Ties keep the first row in table
/// order.
pub fn recommend_pole(
    current: PoleSpec,
    current_ri: f64,
    bend: PoleBend,
    poles: &[PoleResistanceRow],
) -> PoleRecommendation {
    let target = match bend {
        PoleBend::Normal => return PoleRecommendation::KeepCurrent,
        PoleBend::Less => current_ri - RI_BEND_STEP,
        PoleBend::Large => current_ri + RI_BEND_STEP,
    };

    let mut closest: Option<(&PoleResistanceRow, f64)> = None;
    for pole in poles.iter().filter(|p| {
        (p.length_ft - current.length_ft).abs() <= POLE_LENGTH_WINDOW_FT
            && (p.weight_lbs - current.weight_lbs).abs() <= POLE_WEIGHT_WINDOW_LBS
    }) {
        let diff = (pole.resistance_index - target).abs();
        if closest.map_or(true, |(_, best)| diff < best) {
            closest = Some((pole, diff));
        }
    }

    match closest {
        Some((pole, _)) => PoleRecommendation::Recommended {
            pole: PoleSpec {
                length_ft: pole.length_ft,
                weight_lbs: pole.weight_lbs,
            },
            resistance_index: pole.resistance_index,
            target_resistance_index: target,
        },
        None => PoleRecommendation::NoSuitablePole {
            target_resistance_index: target,
        },
    }
}

/// takeoff_physical = clamp(3.30 + offset, 3.00, 4.10)
pub fn takeoff_physical(takeoff_offset_m: f64) -> f64 {
    (IDEAL_TAKEOFF_M + takeoff_offset_m).clamp(TAKEOFF_MIN_M, TAKEOFF_MAX_M)
}

/// Row whose takeoff distance is closest to `takeoff_cm` (first wins on ties)
pub fn closest_mid_mark_row(rows: &[MidMarkRow], takeoff_cm: f64) -> Option<&MidMarkRow> {
    let mut closest: Option<(&MidMarkRow, f64)> = None;
    for row in rows {
        let diff = (row.takeoff_cm - takeoff_cm).abs();
        if closest.map_or(true, |(_, best)| diff < best) {
            closest = Some((row, diff));
        }
    }
    closest.map(|(row, _)| row)
}

/// Signed mid-mark correction for a takeoff offset
///
/// Magnitude runs linearly from 0.05m to 0.20m and saturates at an offset
/// of 0.30m. Positive offset (short takeoff) moves the mark out.
pub fn mid_mark_correction(takeoff_offset_m: f64) -> f64 {
    if takeoff_offset_m == 0.0 {
        return 0.0;
    }
    let factor = (takeoff_offset_m.abs() / MID_MARK_SATURATION_OFFSET_M).min(1.0);
    let magnitude = MID_MARK_ADJUST_MIN_M + (MID_MARK_ADJUST_MAX_M - MID_MARK_ADJUST_MIN_M) * factor;
    magnitude.copysign(takeoff_offset_m)
}

/// Chart baseline plus correction, rounded to the nearest 0.05m
pub fn recommend_mid_mark(
    takeoff_physical_m: f64,
    takeoff_offset_m: f64,
    chart: &[MidMarkRow],
) -> Option<f64> {
    let row = closest_mid_mark_row(chart, takeoff_physical_m * 100.0)?;
    debug!(?row, "closest takeoff row");
    let adjusted = row.mid_mark_m + mid_mark_correction(takeoff_offset_m);
    Some(round_to_step(adjusted, MID_MARK_STEP_M))
}

/// Start position shift derived from the raw offset
///
/// < 5cm: none. 5-10cm: 5cm. Otherwise nearest 10cm.
pub fn start_adjustment(takeoff_offset_m: f64) -> Option<StartAdjustment> {
    let offset_cm = (takeoff_offset_m * 100.0).abs();
    let amount_cm = if offset_cm < 5.0 {
        return None;
    } else if offset_cm < 10.0 {
        5
    } else {
        ((offset_cm / 10.0).round() * 10.0) as i64
    };
    let direction = if takeoff_offset_m > 0.0 {
        StartDirection::Back
    } else {
        StartDirection::Forward
    };
    Some(StartAdjustment { direction, amount_cm })
}

/// Categorical feedback from bend, landing and run-up speed
///
/// Landing is only considered when the bend is normal.
pub fn technical_feedback(
    bend: PoleBend,
    landing: LandingPoint,
    speed: RunupSpeed,
) -> Vec<TechnicalFeedback> {
    let mut feedback = Vec::new();
    match bend {
        PoleBend::Less => feedback.push(TechnicalFeedback::PoleBendLess),
        PoleBend::Large => feedback.push(TechnicalFeedback::PoleBendLarge),
        PoleBend::Normal => feedback.push(match landing {
            LandingPoint::Front => TechnicalFeedback::LandingFront,
            LandingPoint::Back => TechnicalFeedback::LandingBack,
            LandingPoint::Center => TechnicalFeedback::LandingCenter,
        }),
    }
    match speed {
        RunupSpeed::Slow => feedback.push(TechnicalFeedback::RunupSlow),
        RunupSpeed::Good => feedback.push(TechnicalFeedback::RunupGood),
        RunupSpeed::Normal => {}
    }
    feedback
}

/// Grip change when staying on the current pole
pub fn grip_adjustment(bend: PoleBend, grip_position_cm: f64) -> Option<GripAdjustment> {
    let (direction, new_grip) = match bend {
        PoleBend::Normal => return None,
        PoleBend::Less => (GripDirection::Higher, (grip_position_cm - GRIP_ADJUST_CM).max(0.0)),
        PoleBend::Large => (GripDirection::Lower, grip_position_cm + GRIP_ADJUST_CM),
    };
    Some(GripAdjustment {
        direction,
        amount_cm: GRIP_ADJUST_CM,
        new_grip_position_cm: new_grip,
        new_grip_fists: fists(new_grip),
    })
}

/// Grip-from-top on a newly recommended pole: the current grip, unchanged
pub fn new_pole_grip_from_top(grip_position_cm: f64) -> (f64, i64) {
    (grip_position_cm, fists(grip_position_cm))
}

/// Grip distance in ~10cm fist widths
pub fn fists(grip_cm: f64) -> i64 {
    (grip_cm / CM_PER_FIST).round() as i64
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

fn round_to_step(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}
