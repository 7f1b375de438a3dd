//! Pole-vault technique knowledge base
//!
//! Nine phases (最終ボウタカ.docx), the glossary (ボウタカAI用語集.xlsx),
//! the phase × skill construal table and the skill-level profiles. The
//! data is compiled in from `data/knowledge_base.json`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use vaultcoach_types::{Error, Result};

use crate::skill::SkillLevel;

const EMBEDDED_KNOWLEDGE_BASE: &str = include_str!("../data/knowledge_base.json");

/// One row of the construal (局面習熟度調整表) table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstrualEntry {
    /// e.g. "初心者", "中・上級者"
    pub level_label: String,
    pub strategy: String,
    pub guidance: String,
}

/// Guided question button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedPrompt {
    pub label: String,
    pub label_en: String,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub id: u8,
    pub name: String,
    pub term_ja: String,
    pub term_en: String,
    pub definition: String,
    pub cue_check: String,
    pub common_error: String,
    pub fix_hint: String,
    pub drill: String,
    pub additional_notes: String,
    pub terminology_rules: String,
    pub source_title: String,
    pub source_url: String,
    pub video_url: String,
    pub construal: Vec<ConstrualEntry>,
    #[serde(default)]
    pub suggested_prompts: HashMap<SkillLevel, Vec<SuggestedPrompt>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub phase: String,
    pub phase_order: u8,
    pub term_ja: String,
    pub term_en: String,
    pub definition: String,
    pub checkpoint: String,
    pub common_error: String,
    pub related_phase: String,
}

/// Coaching profile for one skill level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub level: SkillLevel,
    pub label: String,
    pub label_en: String,
    pub range: String,
    pub strategy: String,
    pub strategy_en: String,
    pub construal_adjustment: String,
    pub construal_adjustment_en: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub phases: Vec<Phase>,
    pub glossary: Vec<GlossaryEntry>,
    pub skill_levels: Vec<SkillProfile>,
}

impl KnowledgeBase {
    /// Parse the compiled-in knowledge base
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_KNOWLEDGE_BASE)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let kb: KnowledgeBase = serde_json::from_str(json)
            .map_err(|e| Error::Template(format!("knowledge base: {}", e)))?;
        for level in [SkillLevel::Beginner, SkillLevel::Intermediate, SkillLevel::Advanced] {
            if !kb.skill_levels.iter().any(|p| p.level == level) {
                return Err(Error::Template(format!(
                    "knowledge base: missing skill profile '{}'",
                    level.key()
                )));
            }
        }
        Ok(kb)
    }

    pub fn phase(&self, id: u8) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// Selected phases in knowledge-base order; unknown ids are ignored
    pub fn phases_for(&self, ids: &[u8]) -> Vec<&Phase> {
        self.phases.iter().filter(|p| ids.contains(&p.id)).collect()
    }

    /// Glossary entries whose phase (or related phase) appears in a selected phase name
    pub fn related_glossary(&self, phases: &[&Phase]) -> Vec<&GlossaryEntry> {
        self.glossary
            .iter()
            .filter(|g| {
                phases
                    .iter()
                    .any(|p| p.name.contains(&g.phase) || p.name.contains(&g.related_phase))
            })
            .collect()
    }

    pub fn skill_profile(&self, level: SkillLevel) -> Option<&SkillProfile> {
        self.skill_levels.iter().find(|p| p.level == level)
    }

    /// Pick the construal row that fits the athlete's level
    pub fn construal_guidance<'a>(&self, phase: &'a Phase, level: SkillLevel) -> Option<&'a ConstrualEntry> {
        let entries = &phase.construal;
        let second = || entries.get(1).or_else(|| entries.first());
        match level {
            SkillLevel::Beginner => entries
                .iter()
                .find(|e| e.level_label == "初心者")
                .or_else(|| entries.first()),
            SkillLevel::Advanced => entries
                .iter()
                .find(|e| e.level_label == "上級者")
                .or_else(|| entries.iter().find(|e| e.level_label.contains("上級")))
                .or_else(second),
            SkillLevel::Intermediate => entries
                .iter()
                .find(|e| e.level_label.contains('中'))
                .or_else(second),
        }
    }

    /// Three guided questions for a phase and level, or generic ones
    pub fn suggested_prompts(&self, phase_id: u8, level: SkillLevel) -> Vec<SuggestedPrompt> {
        self.phase(phase_id)
            .and_then(|p| p.suggested_prompts.get(&level))
            .filter(|prompts| !prompts.is_empty())
            .cloned()
            .unwrap_or_else(generic_prompts)
    }
}

fn generic_prompts() -> Vec<SuggestedPrompt> {
    [
        ("この局面のポイントは？", "Key points of this phase?", "この局面で最も重要なポイントを教えてください。"),
        ("よくある失敗は？", "Common mistakes?", "この局面でよくある失敗パターンとその修正方法を教えてください。"),
        ("おすすめドリルは？", "Recommended drills?", "この局面の改善に最も効果的なドリルを教えてください。"),
    ]
    .into_iter()
    .map(|(label, label_en, prompt)| SuggestedPrompt {
        label: label.to_string(),
        label_en: label_en.to_string(),
        prompt: prompt.to_string(),
    })
    .collect()
}
