use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{MediaKind, Page, Title, WatchlistEntry},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub id: u64,
    pub kind: MediaKind,
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub in_watchlist: bool,
    pub entries: Vec<WatchlistEntry>,
}

pub async fn entries(State(state): State<Arc<AppState>>) -> Json<Vec<WatchlistEntry>> {
    Json(state.watchlist.entries().await)
}

/// Handler for adding or removing a title
pub async fn toggle(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ToggleRequest>,
) -> AppResult<Json<ToggleResponse>> {
    let in_watchlist = state
        .watchlist
        .toggle(request.id, request.kind, &request.title)
        .await?;

    tracing::info!(
        request_id = %request_id,
        id = request.id,
        kind = %request.kind,
        in_watchlist,
        "Watchlist updated"
    );

    Ok(Json(ToggleResponse {
        in_watchlist,
        entries: state.watchlist.entries().await,
    }))
}

/// Handler for the watchlist tab: current details of every saved title
pub async fn titles(State(state): State<Arc<AppState>>) -> Json<Page<Title>> {
    Json(state.watchlist.titles(&state.catalog).await)
}
