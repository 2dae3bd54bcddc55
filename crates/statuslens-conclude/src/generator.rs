//! Conclusion generation with a deterministic local fallback.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use statuslens_analyze::{AnalysisRecord, SentimentLabel, Urgency};

use crate::error::EnrichError;
use crate::providers::{DisabledEnricher, Enricher, EnrichmentRequest};

pub const GOOD_PROGRESS: &str = "Good progress this period: work is moving forward as planned \
with no urgent issues reported. Keep the current pace and continue tracking open items.";

pub const ATTENTION_NEEDED: &str = "Attention needed: the report flags problems or urgent items. \
Review the listed issues with the team and assign owners for the blockers as soon as possible.";

pub const STABLE_OPERATIONS: &str = "Stable operations: activity is steady with no major wins or \
setbacks called out. Continue routine monitoring and follow up on the planned items.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratedBy {
    ExternalService,
    Fallback,
}

/// Prose conclusion for one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConclusionRecord {
    pub narrative: String,
    pub generated_by: GeneratedBy,
    pub timestamp: DateTime<Utc>,
}

/// Canned narrative chosen only by sentiment and urgency.
pub fn fallback_narrative(record: &AnalysisRecord) -> &'static str {
    let label = record.sentiment.label;
    let urgency = record.urgency;
    if label == SentimentLabel::Positive && urgency == Urgency::Low {
        GOOD_PROGRESS
    } else if label == SentimentLabel::Negative || urgency == Urgency::High {
        ATTENTION_NEEDED
    } else {
        STABLE_OPERATIONS
    }
}

/// Tries one bounded enrichment call, else falls back. Never fails.
#[derive(Clone)]
pub struct ConclusionGenerator {
    enricher: Arc<dyn Enricher>,
    timeout: Duration,
}

impl ConclusionGenerator {
    pub fn new(enricher: Arc<dyn Enricher>, timeout: Duration) -> Self {
        Self { enricher, timeout }
    }

    /// Generator that always uses the fallback.
    pub fn disabled() -> Self {
        Self::new(Arc::new(DisabledEnricher), Duration::ZERO)
    }

    pub fn enrichment_enabled(&self) -> bool {
        self.enricher.is_enabled()
    }

    pub async fn conclude(&self, text: &str, record: &AnalysisRecord) -> ConclusionRecord {
        match self.try_enrich(text, record).await {
            Ok(narrative) => {
                debug!("Conclusion generated by {}", self.enricher.name());
                ConclusionRecord {
                    narrative,
                    generated_by: GeneratedBy::ExternalService,
                    timestamp: Utc::now(),
                }
            }
            Err(e) => {
                if !matches!(e, EnrichError::Disabled) {
                    warn!("Enrichment via {} failed, using fallback: {}", self.enricher.name(), e);
                }
                ConclusionRecord {
                    narrative: fallback_narrative(record).to_string(),
                    generated_by: GeneratedBy::Fallback,
                    timestamp: Utc::now(),
                }
            }
        }
    }

    async fn try_enrich(&self, text: &str, record: &AnalysisRecord) -> Result<String, EnrichError> {
        if !self.enricher.is_enabled() {
            return Err(EnrichError::Disabled);
        }
        let request = EnrichmentRequest::new(text, record);
        let narrative = tokio::time::timeout(self.timeout, self.enricher.enrich(request))
            .await
            .map_err(|_| EnrichError::Timeout(self.timeout))??;

        let narrative = narrative.trim();
        if narrative.is_empty() {
            return Err(EnrichError::EmptyResponse);
        }
        Ok(narrative.to_string())
    }
}
