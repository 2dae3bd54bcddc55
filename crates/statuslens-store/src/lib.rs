//! StatusLens Store: SQLite record store for uploaded reports.

pub mod schema;
pub mod sqlite;
pub mod types;

pub use sqlite::{content_hash, ReportStore};
pub use types::*;
