//! File type detection and text flattening for uploads.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Source lines of a CSV kept in the flattened text (header included).
pub const CSV_PREVIEW_LINES: usize = 10;

/// Upload types, detected from the filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Excel,
    Csv,
    Text,
    Pdf,
    Word,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "xlsx" | "xls" => Self::Excel,
            "csv" => Self::Csv,
            "txt" => Self::Text,
            "pdf" => Self::Pdf,
            "docx" | "doc" => Self::Word,
            _ => Self::Unknown,
        }
    }

    pub fn from_filename(filename: &str) -> Self {
        match filename.rsplit_once('.') {
            Some((_, ext)) => Self::from_extension(ext),
            None => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excel => "excel",
            Self::Csv => "csv",
            Self::Text => "text",
            Self::Pdf => "pdf",
            Self::Word => "word",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flatten an upload to text. Never fails; undecodable input degrades to
/// lossy text or a placeholder line.
pub fn flatten(filename: &str, bytes: &[u8]) -> String {
    let file_type = FileType::from_filename(filename);
    debug!("Flattening {} ({}, {} bytes)", filename, file_type, bytes.len());

    match file_type {
        FileType::Csv => flatten_csv(&String::from_utf8_lossy(bytes)),
        FileType::Excel => {
            warn!("Spreadsheet decoding not available: {}", filename);
            format!("Excel content (unsupported: {})", filename)
        }
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn flatten_csv(content: &str) -> String {
    let mut lines = content
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
        .take(CSV_PREVIEW_LINES);

    let header = match lines.next() {
        Some(h) => h,
        None => return String::new(),
    };

    let mut out = vec![format!("Headers: {}", join_cells(header)), "-".repeat(40)];
    out.extend(lines.map(join_cells));
    out.join("\n")
}

fn join_cells(line: &str) -> String {
    split_record(line)
        .iter()
        .map(|cell| cell.trim())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Split one CSV record. Commas inside double quotes stay in the cell and
/// `""` inside quotes is a literal quote.
fn split_record(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                cell.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(std::mem::take(&mut cell)),
            _ => cell.push(c),
        }
    }
    cells.push(cell);
    cells
}
