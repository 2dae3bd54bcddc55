//! Lexicon-count sentiment and urgency classification.

use serde::{Deserialize, Serialize};

use crate::lexicon::{NEGATIVE, POSITIVE, URGENT_WORDS};
use crate::text::words;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// Sentiment verdict with the raw counts it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    /// Signed share of the winning side, rounded to two decimals. Zero on ties.
    pub score: f64,
    pub positive_word_count: usize,
    pub negative_word_count: usize,
}

impl Default for Sentiment {
    fn default() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: 0.0,
            positive_word_count: 0,
            negative_word_count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Count lexicon hits per token and derive the label.
pub fn score_sentiment(text_lower: &str) -> Sentiment {
    let mut pos = 0usize;
    let mut neg = 0usize;
    for word in words(text_lower) {
        if POSITIVE.contains(word) {
            pos += 1;
        } else if NEGATIVE.contains(word) {
            neg += 1;
        }
    }

    let total = (pos + neg) as f64;
    let (label, score) = if pos > neg {
        (SentimentLabel::Positive, round2(pos as f64 / total))
    } else if neg > pos {
        (SentimentLabel::Negative, -round2(neg as f64 / total))
    } else {
        (SentimentLabel::Neutral, 0.0)
    };

    Sentiment {
        label,
        score,
        positive_word_count: pos,
        negative_word_count: neg,
    }
}

/// High on any urgent substring, medium on any negative word, else low.
pub fn classify_urgency(text_lower: &str, negative_word_count: usize) -> Urgency {
    if URGENT_WORDS.iter().any(|w| text_lower.contains(w)) {
        Urgency::High
    } else if negative_word_count > 0 {
        Urgency::Medium
    } else {
        Urgency::Low
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive() {
        let s = score_sentiment("deployed the build and fixed two crashes. great week");
        assert_eq!(s.label, SentimentLabel::Positive);
        assert_eq!(s.positive_word_count, 3);
        assert_eq!(s.negative_word_count, 0);
        assert_eq!(s.score, 1.0);
    }

    #[test]
    fn test_negative_score_is_signed() {
        let s = score_sentiment("the build failed. error in the bug tracker. good news later");
        assert_eq!(s.label, SentimentLabel::Negative);
        assert_eq!(s.negative_word_count, 3);
        assert_eq!(s.positive_word_count, 1);
        assert_eq!(s.score, -0.75);
    }

    #[test]
    fn test_tie_is_neutral() {
        let s = score_sentiment("good progress but one bug");
        assert_eq!(s.label, SentimentLabel::Neutral);
        assert_eq!(s.score, 0.0);
        assert_eq!(s.positive_word_count, 1);
        assert_eq!(s.negative_word_count, 1);
    }

    #[test]
    fn test_membership_not_substring() {
        // "download" contains "down" but is not the token "down".
        let s = score_sentiment("the download page was rebuilt");
        assert_eq!(s.negative_word_count, 0);
    }

    #[test]
    fn test_urgency_levels() {
        assert_eq!(classify_urgency("this is critical", 0), Urgency::High);
        assert_eq!(classify_urgency("needs attention asap", 3), Urgency::High);
        assert_eq!(classify_urgency("one bug left", 1), Urgency::Medium);
        assert_eq!(classify_urgency("all quiet", 0), Urgency::Low);
    }
}
