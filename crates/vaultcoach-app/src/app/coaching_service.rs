//! Coaching Service - ACT chat use case
//!
//! The API key comes from the environment and is checked before any
//! network I/O.

use std::time::Duration;

use tracing::info;

use vaultcoach_act::{AiBackend, ChatCompletion, Coach, CoachRequest, OpenAiBackend, OpenAiConfig};
use vaultcoach_types::{ConfigError, Result};

use crate::config::Config;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Read the API key from `OPENAI_API_KEY`
pub fn api_key_from_env() -> Result<String> {
    require_api_key(std::env::var(API_KEY_ENV).ok())
}

fn require_api_key(value: Option<String>) -> Result<String> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(ConfigError::MissingEnv(API_KEY_ENV.to_string()).into()),
    }
}

/// Coach configured from the model settings in `config`
pub fn build_coach(config: &Config) -> Result<Coach> {
    Ok(Coach::embedded()?
        .with_model(Some(config.model.clone()))
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_tokens))
}

/// Assemble the completion without sending it
pub fn preview_advice(config: &Config, request: &CoachRequest) -> Result<ChatCompletion> {
    build_coach(config)?.prepare(request)
}

/// Validate, then ask OpenAI for advice
pub fn request_advice(config: &Config, request: &CoachRequest) -> Result<String> {
    let coach = build_coach(config)?;
    request.validate()?;
    let api_key = api_key_from_env()?;
    let backend = OpenAiBackend::new(backend_config(config, api_key));
    advise_with(&coach, &backend, request)
}

fn backend_config(config: &Config, api_key: String) -> OpenAiConfig {
    OpenAiConfig::new(api_key)
        .with_base_url(Some(config.api_base_url.clone()))
        .with_timeout(Duration::from_secs(config.timeout_secs))
}

fn advise_with(coach: &Coach, backend: &dyn AiBackend, request: &CoachRequest) -> Result<String> {
    let reply = coach.advise(backend, request)?;
    info!(chars = reply.chars().count(), "coaching advice received");
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultcoach_act::ChatMessage;
    use vaultcoach_types::{Error, Locale};

    struct EchoBackend;

    impl AiBackend for EchoBackend {
        fn complete(&self, request: &ChatCompletion) -> Result<String> {
            Ok(format!("{} messages via {}", request.messages.len(), request.model))
        }
    }

    #[test]
    fn test_missing_or_blank_key_is_config_error() {
        for value in [None, Some(String::new()), Some("   ".to_string())] {
            let err = require_api_key(value).unwrap_err();
            match err {
                Error::Config(ConfigError::MissingEnv(name)) => assert_eq!(name, "OPENAI_API_KEY"),
                other => panic!("unexpected error: {:?}", other),
            }
        }
        assert_eq!(require_api_key(Some(" sk-abc ".to_string())).unwrap(), "sk-abc");
    }

    #[test]
    fn test_preview_uses_config_settings() {
        let config = Config {
            model: "gpt-4o".to_string(),
            temperature: 0.2,
            max_tokens: 900,
            ..Config::default()
        };
        let request = CoachRequest::new(vec![4], 460).with_locale(Locale::En);
        let completion = preview_advice(&config, &request).unwrap();

        assert_eq!(completion.model, "gpt-4o");
        assert!((completion.temperature - 0.2).abs() < 1e-6);
        assert_eq!(completion.max_tokens, 900);
        assert_eq!(completion.messages.len(), 2);
    }

    #[test]
    fn test_backend_config_from_settings() {
        let config = Config {
            api_base_url: "http://localhost:8080/v1".to_string(),
            timeout_secs: 5,
            ..Config::default()
        };
        let backend = backend_config(&config, "sk-test".to_string());
        assert_eq!(backend.api_key, "sk-test");
        assert_eq!(backend.base_url, "http://localhost:8080/v1");
        assert_eq!(backend.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_request_reported_before_key_lookup() {
        let config = Config::default();
        let err = request_advice(&config, &CoachRequest::new(vec![], 420)).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn test_advise_with_fake_backend() {
        let config = Config::default();
        let coach = build_coach(&config).unwrap();
        let request = CoachRequest::new(vec![1, 2], 380).with_message(ChatMessage::user("中間マークが合いません"));

        let reply = advise_with(&coach, &EchoBackend, &request).unwrap();
        assert_eq!(reply, "2 messages via gpt-4o-mini");
    }
}
