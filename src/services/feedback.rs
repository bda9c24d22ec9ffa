use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{FeedbackEntry, FeedbackSummary, Verdict};

/// In-memory log of like/dislike signals
///
/// Signals are kept for the life of the process only and never feed back
/// into search or recommendation ranking.
#[derive(Debug, Clone, Default)]
pub struct FeedbackCollector {
    entries: Arc<RwLock<Vec<FeedbackEntry>>>,
}

impl FeedbackCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a signal and returns the stored entry
    pub async fn record(
        &self,
        verdict: Verdict,
        query: Option<String>,
        title: Option<String>,
    ) -> FeedbackEntry {
        let entry = FeedbackEntry {
            verdict,
            query,
            title,
            recorded_at: Utc::now(),
        };

        self.entries.write().await.push(entry.clone());
        tracing::info!(verdict = ?entry.verdict, "Feedback recorded");
        entry
    }

    pub async fn summary(&self) -> FeedbackSummary {
        let entries = self.entries.read().await;
        entries
            .iter()
            .fold(FeedbackSummary::default(), |mut summary, entry| {
                match entry.verdict {
                    Verdict::Like => summary.likes += 1,
                    Verdict::Dislike => summary.dislikes += 1,
                }
                summary
            })
    }
}
