//! System prompt assembly
//!
//! The prose lives in `data/prompt_templates.toml`, one table per locale.
//! This module only picks the blocks and fills their `{placeholders}`.

use serde::Deserialize;
use tracing::debug;
use vaultcoach_types::{Error, Locale, Result};

use crate::knowledge::{KnowledgeBase, Phase};
use crate::skill::SkillLevel;

const EMBEDDED_TEMPLATES: &str = include_str!("../data/prompt_templates.toml");

/// Field labels used in the per-phase technical data
#[derive(Debug, Clone, Deserialize)]
pub struct FieldLabels {
    pub definition: String,
    pub checkpoints: String,
    pub common_errors: String,
    pub fix_hints: String,
    pub drills: String,
    pub notes: String,
    pub check: String,
    pub error: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LevelRules {
    pub beginner: String,
    pub intermediate: String,
    pub advanced: String,
}

impl LevelRules {
    pub fn for_level(&self, level: SkillLevel) -> &str {
        match level {
            SkillLevel::Beginner => &self.beginner,
            SkillLevel::Intermediate => &self.intermediate,
            SkillLevel::Advanced => &self.advanced,
        }
    }
}

/// Prompt prose for one locale
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleTemplates {
    pub language_instruction: String,
    pub role: String,
    pub profile: String,
    pub construal_priority: String,
    pub construal_rules: String,
    pub data: String,
    pub format: String,
    pub auto_advice: String,
    pub labels: FieldLabels,
    pub level_rules: LevelRules,
}

impl LocaleTemplates {
    fn check_placeholders(&self, locale: &str) -> Result<()> {
        let required: [(&str, &str, &[&str]); 6] = [
            ("role", self.role.as_str(), &["language_instruction"]),
            ("profile", self.profile.as_str(), &["best_cm", "best_display", "level_label", "range", "strategy"]),
            ("construal_priority", self.construal_priority.as_str(), &["guidances"]),
            ("construal_rules", self.construal_rules.as_str(), &["adjustment"]),
            ("data", self.data.as_str(), &["phases", "glossary", "urls"]),
            ("auto_advice", self.auto_advice.as_str(), &["phase_label", "phase_names"]),
        ];
        for (block, text, keys) in required {
            for key in keys {
                if !text.contains(&format!("{{{}}}", key)) {
                    return Err(Error::Template(format!(
                        "[{}] {}: missing placeholder {{{}}}",
                        locale, block, key
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptTemplates {
    pub ja: LocaleTemplates,
    pub en: LocaleTemplates,
}

impl PromptTemplates {
    /// Parse the compiled-in templates
    pub fn embedded() -> Result<Self> {
        Self::from_toml(EMBEDDED_TEMPLATES)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let templates: PromptTemplates =
            toml::from_str(text).map_err(|e| Error::Template(format!("prompt templates: {}", e)))?;
        templates.ja.check_placeholders("ja")?;
        templates.en.check_placeholders("en")?;
        Ok(templates)
    }

    pub fn for_locale(&self, locale: Locale) -> &LocaleTemplates {
        match locale {
            Locale::Ja => &self.ja,
            Locale::En => &self.en,
        }
    }
}

/// Replace each `{key}` in `template` in one pass. Inserted values are not
/// scanned again; unknown `{...}` runs are kept as written.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let value = tail.find('}').and_then(|end| {
            let key = &tail[1..end];
            values.iter().find(|(k, _)| *k == key).map(|(_, v)| (*v, end))
        });
        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// 420 -> "4m20"
pub fn format_best_record(best_cm: u32) -> String {
    format!("{}m{:02}", best_cm / 100, best_cm % 100)
}

fn phase_context(phase: &Phase, labels: &FieldLabels) -> String {
    format!(
        "【{}】({})\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}",
        phase.name,
        phase.term_en,
        labels.definition,
        phase.definition,
        labels.checkpoints,
        phase.cue_check,
        labels.common_errors,
        phase.common_error,
        labels.fix_hints,
        phase.fix_hint,
        labels.drills,
        phase.drill,
        labels.notes,
        phase.additional_notes,
    )
}

/// Assemble the ACT system prompt for the selected phases and athlete
pub fn build_system_prompt(
    kb: &KnowledgeBase,
    templates: &PromptTemplates,
    phase_ids: &[u8],
    best_record_cm: u32,
    locale: Locale,
) -> Result<String> {
    let t = templates.for_locale(locale);
    let level = SkillLevel::from_best_record(best_record_cm);
    let profile = kb.skill_profile(level).ok_or_else(|| {
        Error::Template(format!("knowledge base: missing skill profile '{}'", level.key()))
    })?;
    let phases = kb.phases_for(phase_ids);
    let glossary = kb.related_glossary(&phases);
    debug!(
        level = level.key(),
        phases = phases.len(),
        glossary = glossary.len(),
        %locale,
        "building system prompt"
    );

    let guidances = phases
        .iter()
        .filter_map(|p| {
            kb.construal_guidance(p, level).map(|entry| {
                format!(
                    "{} ({}) → Strategy: {} / Guidance: {}",
                    p.name, p.term_en, entry.strategy, entry.guidance
                )
            })
        })
        .collect::<Vec<_>>()
        .join("\n");

    let urls = phases
        .iter()
        .map(|p| format!("{} ({}) → Video: {} / Article: {}", p.name, p.term_en, p.video_url, p.source_url))
        .collect::<Vec<_>>()
        .join("\n");

    let phase_data = phases
        .iter()
        .map(|p| phase_context(p, &t.labels))
        .collect::<Vec<_>>()
        .join("\n\n");

    let glossary_lines = glossary
        .iter()
        .map(|g| {
            format!(
                "- {} ({}): {} [{}: {}] [{}: {}]",
                g.term_ja, g.term_en, g.definition, t.labels.check, g.checkpoint, t.labels.error, g.common_error
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let (level_label, strategy, adjustment) = if locale.is_en() {
        (profile.label_en.as_str(), profile.strategy_en.as_str(), profile.construal_adjustment_en.as_str())
    } else {
        (profile.label.as_str(), profile.strategy.as_str(), profile.construal_adjustment.as_str())
    };
    let best_cm = best_record_cm.to_string();
    let best_display = format_best_record(best_record_cm);

    let blocks = [
        fill(&t.role, &[("language_instruction", t.language_instruction.as_str())]),
        fill(
            &t.profile,
            &[
                ("best_cm", best_cm.as_str()),
                ("best_display", best_display.as_str()),
                ("level_label", level_label),
                ("range", profile.range.as_str()),
                ("strategy", strategy),
            ],
        ),
        fill(&t.construal_priority, &[("guidances", guidances.as_str())]),
        fill(&t.construal_rules, &[("adjustment", adjustment)]),
        t.level_rules.for_level(level).to_string(),
        fill(&t.data, &[("phases", phase_data.as_str()), ("glossary", glossary_lines.as_str()), ("urls", urls.as_str())]),
        t.format.clone(),
    ];

    Ok(blocks.join("\n\n"))
}

/// Opening user message when a phase group is picked without a question
pub fn build_auto_advice_prompt(
    kb: &KnowledgeBase,
    templates: &PromptTemplates,
    phase_label: &str,
    phase_ids: &[u8],
    locale: Locale,
) -> String {
    let t = templates.for_locale(locale);
    let phases = kb.phases_for(phase_ids);
    let phase_names = if locale.is_en() {
        phases.iter().map(|p| p.term_en.as_str()).collect::<Vec<_>>().join(" / ")
    } else {
        phases.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join("・")
    };
    fill(&t.auto_advice, &[("phase_label", phase_label), ("phase_names", phase_names.as_str())])
}
