//! Fixed keyword vocabularies used by the analyzer.
//!
//! These lists are data, not configuration: they never change at runtime.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Words counted as positive sentiment; also marks accomplishment sentences.
pub const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "success", "completed", "fixed", "working",
    "improved", "finished", "achieved", "positive", "better", "fast", "efficient",
    "solved", "deployed", "resolved", "launched",
];

/// Words counted as negative sentiment; also marks problem sentences.
pub const NEGATIVE_WORDS: &[&str] = &[
    "bad", "poor", "failed", "issue", "problem", "error", "broken", "slow",
    "delayed", "blocked", "blocking", "stuck", "negative", "worse", "difficult",
    "challenge", "risk", "concern", "bug", "crash", "down", "outage",
];

/// Words that mark a sentence as an action item.
pub const ACTION_WORDS: &[&str] = &[
    "need", "must", "should", "will", "plan", "next", "tomorrow", "schedule", "assign",
];

/// Substrings that raise urgency to high.
pub const URGENT_WORDS: &[&str] = &[
    "urgent", "immediate", "asap", "critical", "emergency", "important",
];

/// Project vocabulary, scanned in this order for topics.
pub const PROJECT_VOCABULARY: &[&str] = &[
    "bug", "feature", "deploy", "test", "meeting", "report", "database", "api",
    "system", "user", "client", "team", "project", "code", "software", "hardware",
    "network", "security", "performance", "update", "version", "release",
];

/// English stop words excluded from the frequency-based topic fallback.
const STOP_WORD_LIST: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your",
    "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she", "her",
    "hers", "herself", "it", "its", "itself", "they", "them", "their", "theirs",
    "themselves", "what", "which", "who", "whom", "this", "that", "these", "those",
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if",
    "or", "because", "as", "until", "while", "of", "at", "by", "for", "with",
    "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where",
    "why", "how", "all", "any", "both", "each", "few", "more", "most", "other",
    "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too",
    "very", "can", "will", "just", "should", "now", "also", "would", "could",
];

pub static POSITIVE: Lazy<HashSet<&'static str>> =
    Lazy::new(|| POSITIVE_WORDS.iter().copied().collect());
pub static NEGATIVE: Lazy<HashSet<&'static str>> =
    Lazy::new(|| NEGATIVE_WORDS.iter().copied().collect());
pub static ACTION: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ACTION_WORDS.iter().copied().collect());
pub static STOP_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORD_LIST.iter().copied().collect());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicons_are_lowercase() {
        for list in [POSITIVE_WORDS, NEGATIVE_WORDS, ACTION_WORDS, URGENT_WORDS, PROJECT_VOCABULARY] {
            for word in list {
                assert_eq!(*word, word.to_lowercase());
            }
        }
    }

    #[test]
    fn test_sentiment_sets_disjoint() {
        assert!(POSITIVE.is_disjoint(&NEGATIVE));
    }
}
