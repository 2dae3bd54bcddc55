//! StatusLens Ingest: turn uploaded files into plain text.

pub mod file;

pub use file::{flatten, FileType};
