//! ACT (AI Construal Tuner) coaching
//!
//! Builds a skill-level-aware system prompt from a compiled-in knowledge
//! base of the nine vault phases, then forwards the conversation to an
//! LLM backend.

pub mod backend;
pub mod coach;
pub mod knowledge;
pub mod prompts;
pub mod skill;

pub use backend::{AiBackend, ChatCompletion, ChatMessage, ChatRole, OpenAiBackend, OpenAiConfig};
pub use coach::{Coach, CoachRequest};
pub use knowledge::{ConstrualEntry, GlossaryEntry, KnowledgeBase, Phase, SkillProfile, SuggestedPrompt};
pub use prompts::PromptTemplates;
pub use skill::SkillLevel;
