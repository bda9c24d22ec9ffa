use std::sync::Arc;

use crate::{context::Context, services::FeedbackCollector};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Immutable catalog and index, read without locking
    pub context: Arc<Context>,
    pub feedback: FeedbackCollector,
}

impl AppState {
    pub fn new(context: Context) -> Self {
        Self {
            context: Arc::new(context),
            feedback: FeedbackCollector::new(),
        }
    }
}
