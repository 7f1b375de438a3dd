//! Skill level classification by personal best

use serde::{Deserialize, Serialize};

/// 習熟度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    /// 〜300cm
    Beginner,
    /// 301〜450cm
    Intermediate,
    /// 451cm〜
    Advanced,
}

impl SkillLevel {
    pub fn from_best_record(best_cm: u32) -> Self {
        match best_cm {
            0..=300 => SkillLevel::Beginner,
            301..=450 => SkillLevel::Intermediate,
            _ => SkillLevel::Advanced,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }
}
