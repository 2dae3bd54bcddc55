//! StatusLens Template: per-department report structure learning.
//!
//! Infers a structural fingerprint (section headers, bullet style, date
//! notation) from uploaded reports, merges fingerprints per department, and
//! validates or partitions later reports against the learned template.

pub mod extract;
pub mod guide;
pub mod inference;
pub mod patterns;
pub mod store;
pub mod types;
pub mod validate;

pub use extract::{extract_structured_data, ReportMetadata, StructuredReport};
pub use guide::generate_template_guide;
pub use inference::analyze_report_structure;
pub use store::TemplateStore;
pub use types::{BulletStyle, DateFormat, SectionKind, Template};
pub use validate::{validate_report, ValidationVerdict};
