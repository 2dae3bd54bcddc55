//! Enrichment provider configuration and selection.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-haiku-20241022";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";

/// Text-generation provider used for enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LLMProvider {
    OpenAI,
    Anthropic,
    Groq,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Groq => write!(f, "groq"),
        }
    }
}

/// A provider the config resolved to, with the model and key to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProvider {
    pub provider: LLMProvider,
    pub model: String,
    pub api_key: String,
}

/// Stored enrichment configuration (`llm-config.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    /// `auto`, `openai`, `anthropic`, `groq`, or `none`.
    #[serde(default = "default_preferred")]
    pub preferred_provider: String,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub anthropic_api_key: Option<String>,
    #[serde(default)]
    pub groq_api_key: Option<String>,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,
    #[serde(default = "default_groq_model")]
    pub groq_model: String,
}

fn default_preferred() -> String {
    "auto".into()
}
fn default_openai_model() -> String {
    DEFAULT_OPENAI_MODEL.into()
}
fn default_anthropic_model() -> String {
    DEFAULT_ANTHROPIC_MODEL.into()
}
fn default_groq_model() -> String {
    DEFAULT_GROQ_MODEL.into()
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            preferred_provider: default_preferred(),
            openai_api_key: None,
            anthropic_api_key: None,
            groq_api_key: None,
            openai_model: default_openai_model(),
            anthropic_model: default_anthropic_model(),
            groq_model: default_groq_model(),
        }
    }
}

impl LLMConfig {
    /// Load config from file, falling back to env vars and defaults.
    ///
    /// A missing file is normal. A malformed file is logged and ignored.
    pub fn load(config_path: &Path) -> Self {
        let mut config = Self::read_file(config_path).unwrap_or_default();

        if config.openai_api_key.is_none() {
            config.openai_api_key = non_empty_env("OPENAI_API_KEY");
        }
        if config.anthropic_api_key.is_none() {
            config.anthropic_api_key = non_empty_env("ANTHROPIC_API_KEY");
        }
        if config.groq_api_key.is_none() {
            config.groq_api_key = non_empty_env("GROQ_API_KEY");
        }

        config
    }

    fn read_file(config_path: &Path) -> Option<Self> {
        let raw = std::fs::read_to_string(config_path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(config) => {
                info!("Loaded enrichment config from {}", config_path.display());
                Some(config)
            }
            Err(e) => {
                warn!("Ignoring malformed {}: {}", config_path.display(), e);
                None
            }
        }
    }

    /// Resolve which provider, model, and key to use.
    ///
    /// An explicit preference only resolves if that provider has a key. In
    /// auto mode the order is Anthropic, then Groq, then OpenAI.
    pub fn resolve_provider(&self) -> Option<ResolvedProvider> {
        let pick = |provider: LLMProvider| {
            let (key, model) = match provider {
                LLMProvider::OpenAI => (&self.openai_api_key, &self.openai_model),
                LLMProvider::Anthropic => (&self.anthropic_api_key, &self.anthropic_model),
                LLMProvider::Groq => (&self.groq_api_key, &self.groq_model),
            };
            key.as_ref().map(|k| ResolvedProvider {
                provider,
                model: model.clone(),
                api_key: k.clone(),
            })
        };

        match self.preferred_provider.as_str() {
            "auto" => pick(LLMProvider::Anthropic)
                .or_else(|| pick(LLMProvider::Groq))
                .or_else(|| pick(LLMProvider::OpenAI)),
            "openai" => pick(LLMProvider::OpenAI),
            "anthropic" => pick(LLMProvider::Anthropic),
            "groq" => pick(LLMProvider::Groq),
            _ => None,
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
