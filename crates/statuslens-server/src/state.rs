//! Shared application state.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{info, warn};

use statuslens_analyze::AnalyzerOptions;
use statuslens_conclude::{ConclusionGenerator, EnrichError, LLMConfig, LlmEnricher};
use statuslens_core::{Result, StatusLensConfig};
use statuslens_store::ReportStore;
use statuslens_template::{Template, TemplateStore};

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: StatusLensConfig,
    pub store: ReportStore,
    pub templates: TemplateStore,
    pub conclusions: ConclusionGenerator,
    pub analyzer: AnalyzerOptions,
    /// Serializes writes of the template snapshot file.
    persist_lock: Mutex<()>,
}

impl AppState {
    pub fn new(config: StatusLensConfig, store: ReportStore, conclusions: ConclusionGenerator) -> Self {
        let templates = Self::load_templates(&config.data_paths.templates_file);
        let analyzer = AnalyzerOptions {
            summary_fallback_chars: config.summary_chars,
        };

        Self {
            config,
            store,
            templates,
            conclusions,
            analyzer,
            persist_lock: Mutex::new(()),
        }
    }

    /// Open the report store and configure enrichment from `llm-config.json`.
    pub fn open(config: StatusLensConfig) -> Result<Self> {
        let store = ReportStore::open(&config.data_paths.reports)?;

        let llm_config = LLMConfig::load(&config.data_paths.llm_config_file);
        let conclusions = Self::conclusions_from(
            LlmEnricher::from_config(&llm_config, config.enrich_timeout()),
            config.enrich_timeout(),
        );

        Ok(Self::new(config, store, conclusions))
    }

    /// Enrichment is best-effort: a client that cannot be built degrades to
    /// the local fallback instead of failing startup.
    fn conclusions_from(
        enricher: std::result::Result<Option<LlmEnricher>, EnrichError>,
        timeout: Duration,
    ) -> ConclusionGenerator {
        match enricher {
            Ok(Some(enricher)) => {
                info!(
                    "Conclusion enrichment via {} (timeout {}s)",
                    enricher.provider(),
                    timeout.as_secs()
                );
                ConclusionGenerator::new(Arc::new(enricher), timeout)
            }
            Ok(None) => {
                info!("No enrichment provider configured, conclusions use the local fallback");
                ConclusionGenerator::disabled()
            }
            Err(e) => {
                warn!("Enrichment client unavailable, conclusions use the local fallback: {}", e);
                ConclusionGenerator::disabled()
            }
        }
    }

    fn load_templates(path: &Path) -> TemplateStore {
        let templates: Vec<Template> = match std::fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                warn!("Ignoring unreadable template snapshot {}: {}", path.display(), e);
                Vec::new()
            }),
            Err(_) => Vec::new(),
        };
        if !templates.is_empty() {
            info!("Loaded {} department templates", templates.len());
        }
        TemplateStore::from_snapshot(templates)
    }

    /// Write every template to `templates.json`.
    pub fn save_templates(&self) -> Result<()> {
        let _guard = self.persist_lock.lock();
        let data = serde_json::to_string_pretty(&self.templates.all())?;
        std::fs::write(&self.config.data_paths.templates_file, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statuslens_template::analyze_report_structure;
    use tempfile::TempDir;

    fn state(dir: &Path) -> AppState {
        let config = StatusLensConfig::with_defaults(dir).unwrap();
        let store = ReportStore::open(&config.data_paths.reports).unwrap();
        AppState::new(config, store, ConclusionGenerator::disabled())
    }

    #[test]
    fn test_templates_survive_restart() {
        let dir = TempDir::new().unwrap();
        {
            let state = state(dir.path());
            state
                .templates
                .save("Eng", analyze_report_structure("Plans:\n- ship", "Eng"));
            state.save_templates().unwrap();
        }

        let state = state(dir.path());
        let restored = state.templates.get("Eng").unwrap();
        assert_eq!(restored.usage_count, 1);
        assert!(restored.section_headers.contains("Plans:"));
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let dir = TempDir::new().unwrap();
        let config = StatusLensConfig::with_defaults(dir.path()).unwrap();
        std::fs::write(&config.data_paths.templates_file, "[{").unwrap();
        assert!(state(dir.path()).templates.is_empty());
    }

    #[test]
    fn test_enricher_build_failure_falls_back() {
        let timeout = Duration::from_secs(1);
        let failed = AppState::conclusions_from(Err(EnrichError::Request("tls init".into())), timeout);
        assert!(!failed.enrichment_enabled());
        assert!(!AppState::conclusions_from(Ok(None), timeout).enrichment_enabled());
    }

    #[test]
    fn test_open_without_provider_keys() {
        let dir = TempDir::new().unwrap();
        let config = StatusLensConfig::with_defaults(dir.path()).unwrap();
        let state = AppState::open(config).unwrap();
        assert!(state.templates.is_empty());
    }
}
