//! StatusLens Conclude: prose conclusions for analyzed reports.
//!
//! One bounded call to an external LLM (OpenAI/Anthropic/Groq) when a provider
//! is configured. Any failure, including a missing provider, falls back to a
//! canned narrative picked from sentiment and urgency.

pub mod config;
pub mod error;
pub mod generator;
pub mod providers;

pub use config::{LLMConfig, LLMProvider};
pub use error::EnrichError;
pub use generator::{fallback_narrative, ConclusionGenerator, ConclusionRecord, GeneratedBy};
pub use providers::{DisabledEnricher, Enricher, EnrichmentRequest, LlmEnricher};
