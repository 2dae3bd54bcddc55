//! StatusLens Analyze: heuristic status-report analysis.
//!
//! Extracts sentiment, topics, urgency, a summary line, and accomplishment /
//! problem / action-item sentences using fixed keyword lexicons. Every pass is
//! deterministic and total: empty or garbled text yields an empty, neutral
//! record instead of an error.

pub mod highlights;
pub mod lexicon;
pub mod sentiment;
pub mod summary;
pub mod text;
pub mod topics;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use highlights::Highlights;
pub use sentiment::{Sentiment, SentimentLabel, Urgency};

/// Topics kept per record.
pub const MAX_TOPICS: usize = 5;
/// Sentences kept per highlight list.
pub const MAX_HIGHLIGHTS: usize = 3;

/// Caller-tunable analyzer knobs.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzerOptions {
    /// Characters of raw text used as summary when no line qualifies.
    pub summary_fallback_chars: usize,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            summary_fallback_chars: 100,
        }
    }
}

/// Structured analysis of one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub sentiment: Sentiment,
    pub topics: Vec<String>,
    pub summary: String,
    pub urgency: Urgency,
    pub accomplishments: Vec<String>,
    pub problems: Vec<String>,
    pub action_items: Vec<String>,
    pub word_count: usize,
    pub sentence_count: usize,
}

/// Analyze text with default options.
pub fn analyze(text: &str) -> AnalysisRecord {
    analyze_with(text, &AnalyzerOptions::default())
}

/// Run every analysis pass over `text`.
pub fn analyze_with(text: &str, options: &AnalyzerOptions) -> AnalysisRecord {
    let text_lower = text.to_lowercase();

    let sentiment = sentiment::score_sentiment(&text_lower);
    let urgency = sentiment::classify_urgency(&text_lower, sentiment.negative_word_count);
    let topics = topics::extract_topics(&text_lower, MAX_TOPICS);
    let summary = summary::summarize(text, options.summary_fallback_chars);
    let Highlights {
        accomplishments,
        problems,
        action_items,
    } = highlights::extract_highlights(text, MAX_HIGHLIGHTS);

    let word_count = text.split_whitespace().count();
    let sentence_count = text.lines().map(|l| text::split_sentences(l).len()).sum();

    debug!(
        "Analyzed {} words: sentiment={}, urgency={}, topics={}",
        word_count,
        sentiment.label,
        urgency,
        topics.len()
    );

    AnalysisRecord {
        sentiment,
        topics,
        summary,
        urgency,
        accomplishments,
        problems,
        action_items,
        word_count,
        sentence_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPLOY_REPORT: &str = "Completed the deployment. There was a critical bug blocking release. \
                                 We must schedule a fix tomorrow.";

    #[test]
    fn test_empty_text() {
        let record = analyze("");
        assert_eq!(record.word_count, 0);
        assert_eq!(record.sentence_count, 0);
        assert_eq!(record.sentiment, Sentiment::default());
        assert_eq!(record.urgency, Urgency::Low);
        assert!(record.summary.is_empty());
        assert!(record.topics.is_empty());
        assert!(record.accomplishments.is_empty());
        assert!(record.problems.is_empty());
        assert!(record.action_items.is_empty());
    }

    #[test]
    fn test_deploy_scenario() {
        let record = analyze(DEPLOY_REPORT);
        assert!(record.sentiment.positive_word_count >= 1);
        assert!(record.sentiment.negative_word_count >= 1);
        assert_eq!(record.urgency, Urgency::High);
        assert_eq!(record.accomplishments[0], "Completed the deployment.");
        assert_eq!(record.problems[0], "There was a critical bug blocking release.");
        assert_eq!(record.action_items[0], "We must schedule a fix tomorrow.");
        assert_eq!(record.sentence_count, 3);
        assert!(record.topics.contains(&"bug".to_string()));
    }

    #[test]
    fn test_label_follows_counts() {
        for text in [
            "good great excellent",
            "bad poor failed",
            "good bad",
            "nothing to see",
            "fixed it, but it crashed. error, error, slow",
        ] {
            let s = analyze(text).sentiment;
            let (p, n) = (s.positive_word_count, s.negative_word_count);
            match s.label {
                SentimentLabel::Positive => assert!(p > n && s.score > 0.0),
                SentimentLabel::Negative => assert!(n > p && s.score < 0.0),
                SentimentLabel::Neutral => assert!(p == n && s.score == 0.0),
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let text = "Team sync. Finished the migration; slow queries remain. Plan: index tuning next.";
        let a = serde_json::to_string(&analyze(text)).unwrap();
        let b = serde_json::to_string(&analyze(text)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_summary_fallback_length_is_configurable() {
        let options = AnalyzerOptions {
            summary_fallback_chars: 4,
        };
        assert_eq!(analyze_with("tiny note", &options).summary, "tiny...");
    }
}
