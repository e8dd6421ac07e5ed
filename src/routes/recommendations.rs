use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{middleware::request_id::RequestId, models::Title, routes::AppState};

/// Handler for recommendations derived from the current watchlist
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
) -> Json<Vec<Title>> {
    let watchlist = state.watchlist.entries().await;

    tracing::info!(
        request_id = %request_id,
        watchlist_len = watchlist.len(),
        "Processing recommendation request"
    );

    Json(state.recommendations.recommend(&watchlist).await)
}
