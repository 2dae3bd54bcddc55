//! Enrichment providers.
//!
//! OpenAI and Groq share the chat-completions format. Anthropic uses the
//! Messages API. Calls are single non-streaming requests.

use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use statuslens_analyze::text::truncate_chars;
use statuslens_analyze::AnalysisRecord;

use crate::config::{LLMConfig, LLMProvider, ResolvedProvider};
use crate::error::EnrichError;

/// Characters of report text sent to the provider.
pub const MAX_PROMPT_CHARS: usize = 1500;
const MAX_TOKENS: usize = 300;
const TEMPERATURE: f64 = 0.3;

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";

const SYSTEM_PROMPT: &str = "You write short executive conclusions for team status reports. \
Reply with two or three plain sentences: overall state, the main risk if any, and the next step.";

/// What an enricher sees: truncated text plus the analyzer's hints.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichmentRequest {
    pub text: String,
    pub sentiment: String,
    pub urgency: String,
    pub topics: Vec<String>,
}

impl EnrichmentRequest {
    pub fn new(text: &str, record: &AnalysisRecord) -> Self {
        Self {
            text: truncate_chars(text, MAX_PROMPT_CHARS),
            sentiment: record.sentiment.label.to_string(),
            urgency: record.urgency.to_string(),
            topics: record.topics.clone(),
        }
    }

    fn prompt(&self) -> String {
        format!(
            "Sentiment: {}\nUrgency: {}\nTopics: {}\n\nReport:\n{}",
            self.sentiment,
            self.urgency,
            if self.topics.is_empty() {
                "none".to_string()
            } else {
                self.topics.join(", ")
            },
            self.text
        )
    }
}

/// A best-effort source of prose conclusions.
pub trait Enricher: Send + Sync {
    fn name(&self) -> &str;

    fn is_enabled(&self) -> bool {
        true
    }

    fn enrich(&self, request: EnrichmentRequest) -> BoxFuture<'_, Result<String, EnrichError>>;
}

/// Enricher used when no provider is configured. Always fails fast.
pub struct DisabledEnricher;

impl Enricher for DisabledEnricher {
    fn name(&self) -> &str {
        "disabled"
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn enrich(&self, _request: EnrichmentRequest) -> BoxFuture<'_, Result<String, EnrichError>> {
        async { Err(EnrichError::Disabled) }.boxed()
    }
}

/// Enricher backed by a hosted LLM API.
pub struct LlmEnricher {
    client: Client,
    resolved: ResolvedProvider,
}

impl LlmEnricher {
    pub fn new(resolved: ResolvedProvider, timeout: Duration) -> Result<Self, EnrichError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()?;
        Ok(Self { client, resolved })
    }

    /// Build from config. `None` when no provider resolves.
    pub fn from_config(config: &LLMConfig, timeout: Duration) -> Result<Option<Self>, EnrichError> {
        match config.resolve_provider() {
            Some(resolved) => Ok(Some(Self::new(resolved, timeout)?)),
            None => Ok(None),
        }
    }

    pub fn provider(&self) -> LLMProvider {
        self.resolved.provider
    }

    async fn call(&self, request: EnrichmentRequest) -> Result<String, EnrichError> {
        let prompt = request.prompt();
        let ResolvedProvider {
            provider,
            model,
            api_key,
        } = &self.resolved;
        debug!("Requesting conclusion from {} with model {}", provider, model);

        let builder = match provider {
            LLMProvider::OpenAI | LLMProvider::Groq => {
                let url = if *provider == LLMProvider::Groq { GROQ_URL } else { OPENAI_URL };
                self.client
                    .post(url)
                    .header("Authorization", format!("Bearer {}", api_key))
                    .json(&json!({
                        "model": model,
                        "messages": [
                            {"role": "system", "content": SYSTEM_PROMPT},
                            {"role": "user", "content": prompt},
                        ],
                        "temperature": TEMPERATURE,
                        "max_tokens": MAX_TOKENS,
                    }))
            }
            LLMProvider::Anthropic => self
                .client
                .post(ANTHROPIC_URL)
                .header("x-api-key", api_key)
                .header("anthropic-version", "2023-06-01")
                .json(&json!({
                    "model": model,
                    "system": SYSTEM_PROMPT,
                    "messages": [{"role": "user", "content": prompt}],
                    "temperature": TEMPERATURE,
                    "max_tokens": MAX_TOKENS,
                })),
        };

        let response = builder.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichError::Status { status, body });
        }

        let body: Value = response.json().await?;
        extract_content(*provider, &body).ok_or(EnrichError::EmptyResponse)
    }
}

impl Enricher for LlmEnricher {
    fn name(&self) -> &str {
        &self.resolved.model
    }

    fn enrich(&self, request: EnrichmentRequest) -> BoxFuture<'_, Result<String, EnrichError>> {
        self.call(request).boxed()
    }
}

/// Pull the generated text out of a provider response. Blank text is `None`.
pub fn extract_content(provider: LLMProvider, body: &Value) -> Option<String> {
    let text = match provider {
        LLMProvider::OpenAI | LLMProvider::Groq => body["choices"][0]["message"]["content"].as_str(),
        LLMProvider::Anthropic => body["content"]
            .as_array()?
            .iter()
            .find(|block| block["type"] == "text")
            .and_then(|block| block["text"].as_str()),
    }?;
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statuslens_analyze::analyze;

    #[test]
    fn test_request_truncates_and_carries_hints() {
        let text = "Deploy went well. ".repeat(200);
        let record = analyze(&text);
        let request = EnrichmentRequest::new(&text, &record);
        assert!(request.text.chars().count() <= MAX_PROMPT_CHARS + 3);
        assert_eq!(request.sentiment, record.sentiment.label.to_string());
        assert!(request.prompt().contains("Topics: deploy"));
    }

    #[test]
    fn test_extract_openai_content() {
        let body = json!({"choices": [{"message": {"content": "  All good.  "}}]});
        assert_eq!(extract_content(LLMProvider::Groq, &body).as_deref(), Some("All good."));
        let blank = json!({"choices": [{"message": {"content": "   "}}]});
        assert!(extract_content(LLMProvider::OpenAI, &blank).is_none());
    }

    #[test]
    fn test_extract_anthropic_content() {
        let body = json!({"content": [{"type": "text", "text": "Stable week."}]});
        assert_eq!(
            extract_content(LLMProvider::Anthropic, &body).as_deref(),
            Some("Stable week.")
        );
        assert!(extract_content(LLMProvider::Anthropic, &json!({"content": []})).is_none());
    }

    #[tokio::test]
    async fn test_disabled_enricher_fails() {
        let request = EnrichmentRequest::new("x", &analyze("x"));
        let err = DisabledEnricher.enrich(request).await.unwrap_err();
        assert!(matches!(err, EnrichError::Disabled));
        assert!(!DisabledEnricher.is_enabled());
    }

    #[test]
    fn test_from_config_without_keys() {
        let enricher = LlmEnricher::from_config(&LLMConfig::default(), Duration::from_secs(1)).unwrap();
        assert!(enricher.is_none());
    }
}
