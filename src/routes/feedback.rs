use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{FeedbackSummary, Verdict},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub verdict: Verdict,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub verdict: Verdict,
    pub message: &'static str,
}

/// Handler recording a like/dislike signal
pub async fn submit(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(request): Json<FeedbackRequest>,
) -> AppResult<(StatusCode, Json<FeedbackResponse>)> {
    let entry = state
        .feedback
        .record(request.verdict, request.query, request.title)
        .await;

    tracing::info!(
        request_id = %request_id,
        verdict = ?entry.verdict,
        "Feedback submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(FeedbackResponse {
            verdict: entry.verdict,
            message: entry.verdict.acknowledgement(),
        }),
    ))
}

/// Handler returning like/dislike counts
pub async fn summary(State(state): State<AppState>) -> Json<FeedbackSummary> {
    Json(state.feedback.summary().await)
}
