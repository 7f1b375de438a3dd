//! Coaching conversation: request validation and completion assembly

use serde::{Deserialize, Serialize};
use tracing::info;
use vaultcoach_types::{Error, Locale, Result};

use crate::backend::{
    AiBackend, ChatCompletion, ChatMessage, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
use crate::knowledge::KnowledgeBase;
use crate::prompts::{build_auto_advice_prompt, build_system_prompt, PromptTemplates};
use crate::skill::SkillLevel;

/// One turn of the ACT chat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachRequest {
    /// Prior conversation (user/assistant turns)
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub selected_phase_ids: Vec<u8>,
    pub best_record_cm: u32,
    #[serde(default)]
    pub locale: Locale,
    /// Phase group label used when the conversation is empty
    #[serde(default)]
    pub phase_label: Option<String>,
}

impl CoachRequest {
    pub fn new(selected_phase_ids: Vec<u8>, best_record_cm: u32) -> Self {
        Self {
            selected_phase_ids,
            best_record_cm,
            ..Default::default()
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_phase_label(mut self, label: Option<String>) -> Self {
        self.phase_label = label;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.selected_phase_ids.is_empty() {
            return Err(Error::InvalidRequest("局面が選択されていません".to_string()));
        }
        if self.best_record_cm == 0 {
            return Err(Error::InvalidRequest("ベスト記録が無効です".to_string()));
        }
        Ok(())
    }

    pub fn skill_level(&self) -> SkillLevel {
        SkillLevel::from_best_record(self.best_record_cm)
    }
}

/// Builds completions from the knowledge base and forwards them to a backend
pub struct Coach {
    kb: KnowledgeBase,
    templates: PromptTemplates,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl Coach {
    pub fn new(kb: KnowledgeBase, templates: PromptTemplates) -> Self {
        Self {
            kb,
            templates,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Coach over the compiled-in knowledge base and templates
    pub fn embedded() -> Result<Self> {
        Ok(Self::new(KnowledgeBase::embedded()?, PromptTemplates::embedded()?))
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(m) = model {
            self.model = m;
        }
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Validate the request and assemble `[system, ...messages]`
    pub fn prepare(&self, request: &CoachRequest) -> Result<ChatCompletion> {
        request.validate()?;

        let system = build_system_prompt(
            &self.kb,
            &self.templates,
            &request.selected_phase_ids,
            request.best_record_cm,
            request.locale,
        )?;

        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        messages.push(ChatMessage::system(system));
        if request.messages.is_empty() {
            let label = request
                .phase_label
                .clone()
                .unwrap_or_else(|| self.default_phase_label(request));
            messages.push(ChatMessage::user(build_auto_advice_prompt(
                &self.kb,
                &self.templates,
                &label,
                &request.selected_phase_ids,
                request.locale,
            )));
        } else {
            messages.extend(request.messages.iter().cloned());
        }

        Ok(ChatCompletion {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        })
    }

    /// Ask the backend for the assistant's reply
    pub fn advise(&self, backend: &dyn AiBackend, request: &CoachRequest) -> Result<String> {
        let completion = self.prepare(request)?;
        info!(
            level = request.skill_level().key(),
            phases = ?request.selected_phase_ids,
            model = %completion.model,
            "requesting coaching advice"
        );
        backend.complete(&completion)
    }

    /// Name of the first selected phase in the request's language
    fn default_phase_label(&self, request: &CoachRequest) -> String {
        self.kb
            .phases_for(&request.selected_phase_ids)
            .first()
            .map(|p| {
                if request.locale.is_en() {
                    p.term_en.clone()
                } else {
                    p.name.clone()
                }
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::backend::ChatRole;

    /// Records the completion it was given and replies with a fixed text
    struct FakeBackend {
        reply: Option<String>,
        seen: RefCell<Option<ChatCompletion>>,
    }

    impl FakeBackend {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                seen: RefCell::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                seen: RefCell::new(None),
            }
        }
    }

    impl AiBackend for FakeBackend {
        fn complete(&self, request: &ChatCompletion) -> Result<String> {
            *self.seen.borrow_mut() = Some(request.clone());
            self.reply
                .clone()
                .ok_or_else(|| Error::Backend("OpenAI API Error: 500: boom".to_string()))
        }
    }

    fn coach() -> Coach {
        Coach::embedded().unwrap()
    }

    // ========================================
    // Validation
    // ========================================

    #[test]
    fn test_empty_phase_selection_rejected() {
        let err = coach().prepare(&CoachRequest::new(vec![], 420)).unwrap_err();
        match err {
            Error::InvalidRequest(msg) => assert_eq!(msg, "局面が選択されていません"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_zero_best_record_rejected() {
        let err = coach().prepare(&CoachRequest::new(vec![1], 0)).unwrap_err();
        match err {
            Error::InvalidRequest(msg) => assert_eq!(msg, "ベスト記録が無効です"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_backend_not_called_for_invalid_request() {
        let backend = FakeBackend::replying("unused");
        assert!(coach().advise(&backend, &CoachRequest::new(vec![], 420)).is_err());
        assert!(backend.seen.borrow().is_none());
    }

    // ========================================
    // Completion assembly
    // ========================================

    #[test]
    fn test_system_message_prepended() {
        let request = CoachRequest::new(vec![2], 420)
            .with_message(ChatMessage::user("ドロップが遅れます"))
            .with_message(ChatMessage::assistant("..."))
            .with_message(ChatMessage::user("どうすれば？"));
        let completion = coach().prepare(&request).unwrap();

        assert_eq!(completion.messages.len(), 4);
        assert_eq!(completion.messages[0].role, ChatRole::System);
        assert!(completion.messages[0].content.contains("### 中級者向け特別ルール"));
        assert_eq!(completion.messages[1].content, "ドロップが遅れます");
        assert_eq!(completion.messages[3].content, "どうすれば？");
        assert_eq!(completion.model, "gpt-4o-mini");
        assert!((completion.temperature - 0.7).abs() < 1e-6);
        assert_eq!(completion.max_tokens, 1500);
    }

    #[test]
    fn test_empty_conversation_uses_auto_advice() {
        let request = CoachRequest::new(vec![1, 2], 300).with_phase_label(Some("助走".to_string()));
        let completion = coach().prepare(&request).unwrap();

        assert_eq!(completion.messages.len(), 2);
        assert_eq!(completion.messages[1].role, ChatRole::User);
        assert!(completion.messages[1].content.starts_with("選手が「助走」局面"));
    }

    #[test]
    fn test_auto_advice_label_defaults_to_first_phase() {
        let coach = coach();
        let request = CoachRequest::new(vec![1], 480).with_locale(Locale::En);
        let completion = coach.prepare(&request).unwrap();
        let term_en = &coach.knowledge_base().phase(1).unwrap().term_en;

        assert!(completion.messages[1]
            .content
            .starts_with(&format!("The athlete selected the \"{}\" phase", term_en)));
        assert!(completion.messages[0].content.contains("### Advanced Special Rules"));
    }

    #[test]
    fn test_model_override() {
        let completion = coach()
            .with_model(Some("gpt-4o".to_string()))
            .with_max_tokens(800)
            .prepare(&CoachRequest::new(vec![5], 420))
            .unwrap();
        assert_eq!(completion.model, "gpt-4o");
        assert_eq!(completion.max_tokens, 800);

        let unchanged = coach().with_model(None).prepare(&CoachRequest::new(vec![5], 420)).unwrap();
        assert_eq!(unchanged.model, "gpt-4o-mini");
    }

    // ========================================
    // Backend round trip
    // ========================================

    #[test]
    fn test_advise_returns_backend_reply() {
        let backend = FakeBackend::replying("**【イメージ】**\n...");
        let reply = coach().advise(&backend, &CoachRequest::new(vec![7], 350)).unwrap();

        assert!(reply.starts_with("**【イメージ】**"));
        let seen = backend.seen.borrow();
        let seen = seen.as_ref().unwrap();
        assert_eq!(seen.messages[0].role, ChatRole::System);
    }

    #[test]
    fn test_advise_propagates_backend_error() {
        let err = coach()
            .advise(&FakeBackend::failing(), &CoachRequest::new(vec![7], 350))
            .unwrap_err();
        assert!(err.to_string().contains("OpenAI API Error: 500"));
    }

    #[test]
    fn test_request_json_shape() {
        let request: CoachRequest = serde_json::from_str(
            r#"{"messages":[{"role":"user","content":"hi"}],"selectedPhaseIds":[1,3],"bestRecordCm":410,"locale":"en"}"#,
        )
        .unwrap();
        assert_eq!(request.selected_phase_ids, vec![1, 3]);
        assert_eq!(request.locale, Locale::En);
        assert_eq!(request.skill_level(), SkillLevel::Intermediate);
        assert!(request.phase_label.is_none());
    }
}
