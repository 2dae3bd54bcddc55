//! Accomplishment / problem / action-item sentence extraction.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::lexicon::{ACTION, NEGATIVE, POSITIVE};
use crate::text::{split_sentences, words};

/// Sentences shorter than this (after trimming) are ignored.
const MIN_SENTENCE_CHARS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Highlights {
    pub accomplishments: Vec<String>,
    pub problems: Vec<String>,
    pub action_items: Vec<String>,
}

/// Walk lines, then sentences within each line, in document order.
///
/// A sentence can land in more than one list. Each list stops at `max`.
pub fn extract_highlights(text: &str, max: usize) -> Highlights {
    let mut out = Highlights::default();

    for line in text.lines() {
        for sentence in split_sentences(line) {
            if sentence.chars().count() <= MIN_SENTENCE_CHARS {
                continue;
            }
            let lower = sentence.to_lowercase();
            let tokens: HashSet<&str> = words(&lower).collect();

            push_if(&mut out.accomplishments, sentence, max, || {
                tokens.iter().any(|t| POSITIVE.contains(t))
            });
            push_if(&mut out.problems, sentence, max, || {
                tokens.iter().any(|t| NEGATIVE.contains(t))
            });
            push_if(&mut out.action_items, sentence, max, || {
                tokens.iter().any(|t| ACTION.contains(t))
            });
        }
    }

    out
}

fn push_if(list: &mut Vec<String>, sentence: &str, max: usize, hit: impl FnOnce() -> bool) {
    if list.len() < max && hit() {
        list.push(sentence.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentences_on_one_line() {
        let h = extract_highlights(
            "Completed the deployment. There was a critical bug blocking release. We must schedule a fix tomorrow.",
            3,
        );
        assert_eq!(h.accomplishments, vec!["Completed the deployment."]);
        assert_eq!(h.problems, vec!["There was a critical bug blocking release."]);
        assert_eq!(h.action_items, vec!["We must schedule a fix tomorrow."]);
    }

    #[test]
    fn test_capped_and_ordered() {
        let text = "Fixed login page.\nFixed signup page.\nFixed reset page.\nFixed admin page.";
        let h = extract_highlights(text, 3);
        assert_eq!(
            h.accomplishments,
            vec!["Fixed login page.", "Fixed signup page.", "Fixed reset page."]
        );
    }

    #[test]
    fn test_short_sentences_ignored() {
        let h = extract_highlights("Bug fixed.", 3);
        assert!(h.accomplishments.is_empty());
        assert!(h.problems.is_empty());
    }
}
