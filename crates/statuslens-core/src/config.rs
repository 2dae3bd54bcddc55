//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8000;
/// Default bound on a single enrichment call.
pub const DEFAULT_ENRICH_TIMEOUT_SECS: u64 = 15;
/// Default character budget for the summary fallback.
pub const DEFAULT_SUMMARY_CHARS: usize = 100;

/// Paths to all StatusLens data files and directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Report database directory (`data/reports/`).
    pub reports: PathBuf,
    /// Learned template snapshot (`data/templates.json`).
    pub templates_file: PathBuf,
    /// Enrichment provider configuration (`data/llm-config.json`).
    pub llm_config_file: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            reports: root.join("reports"),
            templates_file: root.join("templates.json"),
            llm_config_file: root.join("llm-config.json"),
            root,
        };
        paths.ensure_dirs()?;
        debug!("Data directory ready at {}", paths.root.display());
        Ok(paths)
    }

    fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(&self.reports)?;
        Ok(())
    }
}

/// Top-level StatusLens configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusLensConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// Upper bound for one enrichment round trip, in seconds.
    pub enrich_timeout_secs: u64,
    /// How many characters of raw text the summary falls back to.
    pub summary_chars: usize,
}

impl StatusLensConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> Result<Self> {
        let port = env_parse("PORT")?.unwrap_or(DEFAULT_PORT);
        let enrich_timeout_secs =
            env_parse("STATUSLENS_ENRICH_TIMEOUT_SECS")?.unwrap_or(DEFAULT_ENRICH_TIMEOUT_SECS);
        let summary_chars =
            env_parse("STATUSLENS_SUMMARY_CHARS")?.unwrap_or(DEFAULT_SUMMARY_CHARS);

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self {
            port,
            data_paths,
            enrich_timeout_secs,
            summary_chars,
        })
    }

    /// Configuration with defaults for everything but the data directory.
    pub fn with_defaults(data_dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            port: DEFAULT_PORT,
            data_paths: DataPaths::new(data_dir)?,
            enrich_timeout_secs: DEFAULT_ENRICH_TIMEOUT_SECS,
            summary_chars: DEFAULT_SUMMARY_CHARS,
        })
    }

    pub fn enrich_timeout(&self) -> Duration {
        Duration::from_secs(self.enrich_timeout_secs)
    }
}

/// Parse an optional env var; a present-but-malformed value is a config error.
fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
            warn!("Rejecting {}={:?}", key, raw);
            Error::Config(format!("{} has an invalid value: {:?}", key, raw))
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_data_paths_layout() {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::new(dir.path().join("data")).unwrap();
        assert!(paths.reports.is_dir());
        assert_eq!(paths.templates_file.file_name().unwrap(), "templates.json");
        assert_eq!(paths.llm_config_file.file_name().unwrap(), "llm-config.json");
    }

    #[test]
    fn test_defaults() {
        let dir = TempDir::new().unwrap();
        let config = StatusLensConfig::with_defaults(dir.path()).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.enrich_timeout(), Duration::from_secs(DEFAULT_ENRICH_TIMEOUT_SECS));
        assert_eq!(config.summary_chars, DEFAULT_SUMMARY_CHARS);
    }

    #[test]
    fn test_env_parse_rejects_malformed_value() {
        std::env::set_var("STATUSLENS_TEST_BAD_PORT", "eighty");
        std::env::set_var("STATUSLENS_TEST_GOOD_PORT", " 9000 ");
        assert!(matches!(
            env_parse::<u16>("STATUSLENS_TEST_BAD_PORT"),
            Err(Error::Config(_))
        ));
        assert_eq!(env_parse::<u16>("STATUSLENS_TEST_GOOD_PORT").unwrap(), Some(9000));
        assert_eq!(env_parse::<u16>("STATUSLENS_TEST_UNSET_PORT").unwrap(), None);
    }
}
