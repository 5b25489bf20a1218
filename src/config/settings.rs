//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::tutor::CefrLevel;

use super::AppPaths;

// ---------------------------------------------------------------------------
// LlmConfig
// ---------------------------------------------------------------------------

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Settings for the chat-completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the API endpoint (`{base_url}/v1/chat/completions`).
    ///
    /// - Groq default: `https://api.groq.com/openai`
    /// - OpenAI: `https://api.openai.com`
    pub base_url: String,
    /// API key.  `None` means fall back to the `GROQ_API_KEY` environment
    /// variable; an explicitly configured key wins over the environment.
    pub api_key: Option<String>,
    /// Model identifier sent to the API (e.g. `"llama-3.3-70b-versatile"`).
    pub model: String,
    /// Sampling temperature (0.0 – 1.0).
    pub temperature: f32,
    /// Maximum seconds to wait for a completion before timing out.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai".into(),
            api_key: None,
            model: "llama-3.3-70b-versatile".into(),
            temperature: 0.7,
            timeout_secs: 30,
        }
    }
}

impl LlmConfig {
    /// The API key to use for this session: the configured value when set
    /// and non-empty, otherwise the `GROQ_API_KEY` environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => Some(key.to_string()),
            _ => std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
        }
    }
}

// ---------------------------------------------------------------------------
// TutorConfig
// ---------------------------------------------------------------------------

/// Settings for the tutoring session itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Level used when the CLI is started without one.
    pub default_level: CefrLevel,
    /// Topic handed to the conversational flow when none is given.
    pub default_topic: String,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            default_level: CefrLevel::A1,
            default_topic: "Daily conversation".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use sprachheld::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Completion endpoint settings.
    pub llm: LlmConfig,
    /// Tutoring session settings.
    pub tutor: TutorConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
