//! Topic extraction: project vocabulary first, word frequency as fallback.

use std::collections::HashMap;

use crate::lexicon::{PROJECT_VOCABULARY, STOP_WORDS};
use crate::text::words;

/// Up to `max` topics for lowercased text.
///
/// Vocabulary terms are matched by substring over the whole text, in vocabulary
/// order. When none match, the most frequent alphabetic non-stop-words longer
/// than three characters are used; equal counts keep first-occurrence order.
pub fn extract_topics(text_lower: &str, max: usize) -> Vec<String> {
    let vocab: Vec<String> = PROJECT_VOCABULARY
        .iter()
        .filter(|term| text_lower.contains(**term))
        .take(max)
        .map(|term| term.to_string())
        .collect();
    if !vocab.is_empty() {
        return vocab;
    }
    frequent_words(text_lower, max)
}

fn frequent_words(text_lower: &str, max: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for word in words(text_lower) {
        if word.chars().count() <= 3
            || !word.chars().all(char::is_alphabetic)
            || STOP_WORDS.contains(word)
        {
            continue;
        }
        let count = counts.entry(word).or_insert(0);
        if *count == 0 {
            first_seen.push(word);
        }
        *count += 1;
    }

    // Stable sort keeps first-occurrence order among equal counts.
    first_seen.sort_by(|a, b| counts[b].cmp(&counts[a]));
    first_seen.into_iter().take(max).map(String::from).collect()
}
