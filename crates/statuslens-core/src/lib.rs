//! StatusLens Core: shared error type, configuration, and data directory layout.

pub mod config;
pub mod error;

pub use config::{DataPaths, StatusLensConfig};
pub use error::{Error, Result};
