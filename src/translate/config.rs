//! Translation provider configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// LLM API flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI chat completions.
    #[default]
    OpenAi,
    /// Google Generative Language `generateContent`.
    Gemini,
    /// Local Ollama through its OpenAI-compatible endpoint.
    Ollama,
}

impl Provider {
    #[must_use]
    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Gemini => "gemini-2.0-flash-exp",
            Self::Ollama => "llama3.2",
        }
    }

    #[must_use]
    pub fn default_api_base(self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Self::Ollama => "http://localhost:11434/v1",
        }
    }

    /// Whether requests fail without an API key.
    #[must_use]
    pub fn requires_api_key(self) -> bool {
        self == Self::Gemini
    }

    /// Environment variable the CLI reads the key from.
    #[must_use]
    pub fn api_key_env(self) -> Option<&'static str> {
        match self {
            Self::OpenAi => Some("OPENAI_API_KEY"),
            Self::Gemini => Some("GEMINI_API_KEY"),
            Self::Ollama => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Ollama => "ollama",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            "ollama" => Ok(Self::Ollama),
            other => Err(format!("unknown provider '{other}' (expected openai, gemini or ollama)")),
        }
    }
}

/// Settings for one translation job.
///
/// The API key is never serialized, so the effective configuration can be
/// logged as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationConfig {
    pub provider: Provider,
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub target_language: String,
    /// Maximum characters per request.
    pub chunk_size: usize,
    /// Read timeout per request, in seconds.
    pub timeout_secs: u64,
}

impl TranslationConfig {
    /// Defaults for `provider`.
    #[must_use]
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            api_key: None,
            api_base: provider.default_api_base().to_string(),
            model: provider.default_model().to_string(),
            temperature: 0.3,
            max_tokens: None,
            target_language: "Chinese".to_string(),
            chunk_size: 3000,
            timeout_secs: 120,
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_target_language(mut self, language: impl Into<String>) -> Self {
        self.target_language = language.into();
        self
    }

    /// Pretty JSON of the configuration, without the key.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("<unserializable config: {e}>"))
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self::new(Provider::default())
    }
}
