//! Configuration management for vaultcoach
//!
//! Config stored at: ~/.config/vaultcoach/config.json

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vaultcoach_act::backend::{
    DEFAULT_API_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};
use vaultcoach_infra::CsvReferenceRepository;
use vaultcoach_types::{ConfigError, Locale, OutputFormat, Result};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Language for messages and coaching prompts (ja, en)
    #[serde(default)]
    pub locale: Locale,

    /// Default output format (table, json)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Reference table directory override
    #[serde(default)]
    pub reference_dir: Option<PathBuf>,

    /// Chat model for coaching
    #[serde(default = "default_model")]
    pub model: String,

    /// OpenAI-compatible API root
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// HTTP timeout for one coaching request (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            output_format: OutputFormat::default(),
            reference_dir: None,
            model: default_model(),
            api_base_url: default_api_base_url(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("vaultcoach");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Directory holding the reference CSVs
    pub fn reference_dir(&self) -> PathBuf {
        self.reference_dir
            .clone()
            .unwrap_or_else(CsvReferenceRepository::default_dir)
    }

    /// Load config from the default location, or defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Vaultcoach Configuration")?;
        writeln!(f, "========================")?;
        writeln!(f)?;
        writeln!(f, "Locale:         {}", self.locale)?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f, "Reference dir:  {}", self.reference_dir().display())?;
        writeln!(f, "Model:          {}", self.model)?;
        writeln!(f, "API base URL:   {}", self.api_base_url)?;
        writeln!(f, "Temperature:    {}", self.temperature)?;
        writeln!(f, "Max tokens:     {}", self.max_tokens)?;
        writeln!(f, "Timeout:        {}s", self.timeout_secs)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.locale, Locale::Ja);
        assert_eq!(config.reference_dir(), PathBuf::from("data").join("reference"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"locale":"en","reference_dir":"/srv/tables"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.reference_dir(), PathBuf::from("/srv/tables"));
        assert_eq!(config.max_tokens, 1500);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            output_format: OutputFormat::Json,
            model: "gpt-4o".to_string(),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err,
            vaultcoach_types::Error::Config(ConfigError::ParseError(_))
        ));
    }
}
