//! Summary line selection.

use crate::text::truncate_chars;

/// Longest a selected summary line may be before it is cut.
pub const SUMMARY_LINE_CHARS: usize = 150;
/// A line must be longer than this to be considered a summary.
const MIN_LINE_CHARS: usize = 30;
/// Lines starting with these are treated as markup, not prose.
const MARKUP_PREFIXES: &[char] = &['=', '-', '#', '*'];

/// First prose line longer than 30 chars, else the first `fallback_chars` of the text.
pub fn summarize(text: &str, fallback_chars: usize) -> String {
    let chosen = text.lines().map(str::trim).find(|line| {
        line.chars().count() > MIN_LINE_CHARS && !line.starts_with(MARKUP_PREFIXES)
    });

    match chosen {
        Some(line) => truncate_chars(line, SUMMARY_LINE_CHARS),
        None => truncate_chars(text.trim(), fallback_chars),
    }
}
