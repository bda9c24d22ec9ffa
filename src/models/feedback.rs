use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Like/dislike signal left by a user about a set of suggestions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Like,
    Dislike,
}

impl Verdict {
    /// Acknowledgement shown back to the user
    pub fn acknowledgement(&self) -> &'static str {
        match self {
            Verdict::Like => "Great! We'll try to suggest more like this.",
            Verdict::Dislike => "Sorry about that! We'll improve our suggestions next time.",
        }
    }
}

/// A recorded feedback signal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackEntry {
    pub verdict: Verdict,
    /// Query the suggestions were produced for, if known
    pub query: Option<String>,
    /// Title the suggestions were produced for, if known
    pub title: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Aggregate counts over all recorded feedback
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FeedbackSummary {
    pub likes: usize,
    pub dislikes: usize,
}
