use axum::{extract::State, Json};
use poe_forum_core::ForumResponse;
use std::sync::Arc;

use crate::state::AppState;

/// Retrieve all threads from the configured forum boards
///
/// Sources that cannot be fetched in time are skipped, so an upstream outage
/// yields an empty list rather than an error.
#[utoipa::path(
    get,
    path = "/api/forum",
    responses(
        (status = 200, description = "Threads from every reachable board, newest first", body = ForumResponse),
        (status = 500, description = "Aggregation failed", body = crate::error::ErrorResponse)
    ),
    tag = "forum"
)]
pub async fn get_forum_threads(State(state): State<Arc<AppState>>) -> Json<ForumResponse> {
    Json(state.aggregator.collect().await)
}
