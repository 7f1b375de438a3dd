//! Localized analysis messages (ja / en)

use vaultcoach_domain::model::{
    GripDirection, PoleRecommendation, PoleSpec, StartAdjustment, StartDirection, TechnicalFeedback,
};
use vaultcoach_types::Locale;

/// Message catalogue for one language
#[derive(Debug)]
pub struct Messages {
    pub keep_pole: &'static str,
    recommended_pole: &'static str,
    pub no_pole_found: &'static str,
    start_back: &'static str,
    start_forward: &'static str,
    pub pole_bend_less: &'static str,
    pub pole_bend_large: &'static str,
    pub landing_front: &'static str,
    pub landing_back: &'static str,
    pub landing_center: &'static str,
    pub runup_slow: &'static str,
    pub runup_good: &'static str,
    pub no_tech_feedback: &'static str,
    pub grip_higher: &'static str,
    pub grip_lower: &'static str,
}

static JA: Messages = Messages {
    keep_pole: "現在のポールを維持することを推奨します",
    recommended_pole: "推奨ポール: {l}ft, {w}lbs",
    no_pole_found: "条件に合うポールが見つかりませんでした（±1ft、±15lbs以内）。現在のポールを維持してください。",
    start_back: "スタート位置：{cm}cm 後ろへ",
    start_forward: "スタート位置：{cm}cm 前へ",
    pole_bend_less: "ポールのしなりが少ないため、ポールが硬すぎる可能性があります。柔らかいポールを使用するか、グリップ位置を高くすることを検討してください。",
    pole_bend_large: "ポールのしなりが大きいため、ポールが柔らかすぎる可能性があります。硬いポールを使用するか、グリップ位置を低くすることを検討してください。",
    landing_front: "着地点が手前のため、回転が不足している可能性があります。スタンダードを前に移動するか、少し柔らかいポールを使用することを検討してください。",
    landing_back: "着地点が奥のため、回転しすぎている可能性があります。スタンダードを後ろに移動するか、少し硬いポールを使用することを検討してください。",
    landing_center: "着地点が中央で、ジャンプがバランスよくできています。",
    runup_slow: "助走スピードが遅いため、助走スピードを向上させることで、より良い結果が得られる可能性があります。",
    runup_good: "助走スピードは良好です。",
    no_tech_feedback: "技術的なフィードバックはありません。",
    grip_higher: "高く",
    grip_lower: "低く",
};

static EN: Messages = Messages {
    keep_pole: "We recommend keeping your current pole.",
    recommended_pole: "Recommended pole: {l}ft, {w}lbs",
    no_pole_found: "No suitable pole found within constraints (±1ft, ±15lbs). Please keep your current pole.",
    start_back: "Start position: {cm}cm back",
    start_forward: "Start position: {cm}cm forward",
    pole_bend_less: "Pole bend is small; the pole may be too stiff. Consider a softer pole or a higher grip.",
    pole_bend_large: "Pole bend is large; the pole may be too soft. Consider a stiffer pole or a lower grip.",
    landing_front: "Landing is short; you may be under-rotating. Consider moving the standard forward or using a slightly softer pole.",
    landing_back: "Landing is long; you may be over-rotating. Consider moving the standard back or using a slightly stiffer pole.",
    landing_center: "Landing is centered and the jump is well balanced.",
    runup_slow: "Run-up speed is slow; improving it may lead to better results.",
    runup_good: "Run-up speed is good.",
    no_tech_feedback: "No technical feedback.",
    grip_higher: "higher",
    grip_lower: "lower",
};

impl Messages {
    pub fn for_locale(locale: Locale) -> &'static Messages {
        match locale {
            Locale::Ja => &JA,
            Locale::En => &EN,
        }
    }

    pub fn recommended_pole(&self, pole: PoleSpec) -> String {
        self.recommended_pole
            .replace("{l}", &pole.length_ft.to_string())
            .replace("{w}", &pole.weight_lbs.to_string())
    }

    pub fn recommendation(&self, recommendation: &PoleRecommendation) -> String {
        match recommendation {
            PoleRecommendation::KeepCurrent => self.keep_pole.to_string(),
            PoleRecommendation::Recommended { pole, .. } => self.recommended_pole(*pole),
            PoleRecommendation::NoSuitablePole { .. } => self.no_pole_found.to_string(),
        }
    }

    pub fn start_adjustment(&self, adjustment: &StartAdjustment) -> String {
        let template = match adjustment.direction {
            StartDirection::Back => self.start_back,
            StartDirection::Forward => self.start_forward,
        };
        template.replace("{cm}", &adjustment.amount_cm.to_string())
    }

    pub fn feedback(&self, feedback: TechnicalFeedback) -> &'static str {
        match feedback {
            TechnicalFeedback::PoleBendLess => self.pole_bend_less,
            TechnicalFeedback::PoleBendLarge => self.pole_bend_large,
            TechnicalFeedback::LandingFront => self.landing_front,
            TechnicalFeedback::LandingBack => self.landing_back,
            TechnicalFeedback::LandingCenter => self.landing_center,
            TechnicalFeedback::RunupSlow => self.runup_slow,
            TechnicalFeedback::RunupGood => self.runup_good,
        }
    }

    /// Feedback sentences joined with a space
    pub fn tech_feedback(&self, feedback: &[TechnicalFeedback]) -> String {
        if feedback.is_empty() {
            return self.no_tech_feedback.to_string();
        }
        feedback
            .iter()
            .map(|f| self.feedback(*f))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn grip_direction(&self, direction: GripDirection) -> &'static str {
        match direction {
            GripDirection::Higher => self.grip_higher,
            GripDirection::Lower => self.grip_lower,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommended_pole_formats_like_js_numbers() {
        let pole = PoleSpec {
            length_ft: 13.0,
            weight_lbs: 160.0,
        };
        assert_eq!(Messages::for_locale(Locale::Ja).recommended_pole(pole), "推奨ポール: 13ft, 160lbs");

        let fractional = PoleSpec {
            length_ft: 10.7,
            weight_lbs: 95.0,
        };
        assert_eq!(
            Messages::for_locale(Locale::En).recommended_pole(fractional),
            "Recommended pole: 10.7ft, 95lbs"
        );
    }

    #[test]
    fn test_recommendation_variants() {
        let en = Messages::for_locale(Locale::En);
        assert_eq!(en.recommendation(&PoleRecommendation::KeepCurrent), en.keep_pole);
        assert_eq!(
            en.recommendation(&PoleRecommendation::NoSuitablePole {
                target_resistance_index: 140.0
            }),
            en.no_pole_found
        );
    }

    #[test]
    fn test_start_adjustment_text() {
        let ja = Messages::for_locale(Locale::Ja);
        let back = StartAdjustment {
            direction: StartDirection::Back,
            amount_cm: 20,
        };
        assert_eq!(ja.start_adjustment(&back), "スタート位置：20cm 後ろへ");

        let forward = StartAdjustment {
            direction: StartDirection::Forward,
            amount_cm: 5,
        };
        assert_eq!(
            Messages::for_locale(Locale::En).start_adjustment(&forward),
            "Start position: 5cm forward"
        );
    }

    #[test]
    fn test_tech_feedback_joined() {
        let en = Messages::for_locale(Locale::En);
        assert_eq!(en.tech_feedback(&[]), "No technical feedback.");
        assert_eq!(
            en.tech_feedback(&[TechnicalFeedback::LandingCenter, TechnicalFeedback::RunupGood]),
            "Landing is centered and the jump is well balanced. Run-up speed is good."
        );
    }

    #[test]
    fn test_grip_direction_labels() {
        assert_eq!(Messages::for_locale(Locale::Ja).grip_direction(GripDirection::Higher), "高く");
        assert_eq!(Messages::for_locale(Locale::En).grip_direction(GripDirection::Lower), "lower");
    }
}
