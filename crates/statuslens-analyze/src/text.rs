//! Tokenization helpers shared by the analysis passes.

/// Split text into sentences at `.`, `!` or `?` followed by whitespace.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if (b == b'.' || b == b'!' || b == b'?')
            && i + 1 < bytes.len()
            && bytes[i + 1].is_ascii_whitespace()
        {
            let s = text[start..=i].trim();
            if !s.is_empty() {
                sentences.push(s);
            }
            start = i + 1;
        }
    }
    let s = text[start..].trim();
    if !s.is_empty() {
        sentences.push(s);
    }
    sentences
}

/// Whitespace tokens with surrounding punctuation trimmed. Expects lowercased input.
pub fn words(text_lower: &str) -> impl Iterator<Item = &str> {
    text_lower
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
}

/// Truncate to `max_chars` characters, appending `...` when anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let s = split_sentences("Done. Next up? Yes! trailing");
        assert_eq!(s, vec!["Done.", "Next up?", "Yes!", "trailing"]);
    }

    #[test]
    fn test_decimal_is_not_a_boundary() {
        assert_eq!(split_sentences("Uptime was 99.9 percent."), vec!["Uptime was 99.9 percent."]);
    }

    #[test]
    fn test_words_trim_punctuation() {
        let w: Vec<&str> = words("fixed the bug, (finally) -- done.").collect();
        assert_eq!(w, vec!["fixed", "the", "bug", "finally", "done"]);
    }

    #[test]
    fn test_truncate_chars_is_char_safe() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo...");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("exact", 5), "exact");
    }
}
