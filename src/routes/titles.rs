use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{page_window, DetailedTitle, GenreCatalog, MediaKind, Page, PageLink, Title},
    routes::AppState,
};

/// Shortest query that switches browsing from the category listing to search
const MIN_SEARCH_CHARS: usize = 3;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_category")]
    category: String,
    page: Option<u32>,
    genre: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    query: String,
    page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    #[serde(default = "default_category")]
    category: String,
    query: Option<String>,
    page: Option<u32>,
    genre: Option<String>,
}

/// A listing page plus the links of its pagination control
#[derive(Debug, Serialize)]
pub struct BrowseResponse {
    #[serde(flatten)]
    pub page: Page<Title>,
    pub pages: Vec<PageLink>,
}

fn default_category() -> String {
    "trending".to_string()
}

fn page_number(page: Option<u32>) -> u32 {
    page.unwrap_or(1).max(1)
}

/// Parses the genre filter; an empty value means "all genres"
fn genre_filter(genre: Option<&str>) -> AppResult<Option<u64>> {
    match genre.map(str::trim).filter(|g| !g.is_empty()) {
        None => Ok(None),
        Some(g) => g
            .parse()
            .map(Some)
            .map_err(|_| AppError::InvalidInput(format!("Invalid genre: {}", g))),
    }
}

pub async fn genres(State(state): State<Arc<AppState>>) -> Json<GenreCatalog> {
    Json(state.catalog.genres().await)
}

/// Handler for category listings
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<Page<Title>>> {
    let genre = genre_filter(params.genre.as_deref())?;
    let page = state
        .catalog
        .by_type(&params.category, page_number(params.page), genre)
        .await?;
    Ok(Json(page))
}

/// Handler for title search
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Page<Title>>> {
    let page = state
        .catalog
        .search(&params.query, page_number(params.page))
        .await?;
    Ok(Json(page))
}

/// Handler for the browse view: search once the query is long enough,
/// otherwise the category listing
pub async fn browse(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<BrowseQuery>,
) -> AppResult<Json<BrowseResponse>> {
    let page_no = page_number(params.page);
    let query = params.query.as_deref().map(str::trim).unwrap_or_default();

    let page = if query.chars().count() >= MIN_SEARCH_CHARS {
        tracing::info!(request_id = %request_id, query = %query, "Browsing search results");
        state.catalog.search(query, page_no).await?
    } else {
        let genre = genre_filter(params.genre.as_deref())?;
        tracing::info!(
            request_id = %request_id,
            category = %params.category,
            genre = ?genre,
            "Browsing listing"
        );
        state.catalog.by_type(&params.category, page_no, genre).await?
    };

    let pages = page_window(page.page, page.total_pages);
    Ok(Json(BrowseResponse { page, pages }))
}

pub async fn details(
    State(state): State<Arc<AppState>>,
    Path((kind, id)): Path<(String, u64)>,
) -> AppResult<Json<Title>> {
    let kind: MediaKind = kind.parse()?;
    Ok(Json(state.catalog.details(id, kind).await?))
}

/// Handler for the merged detail view
pub async fn full_details(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path((kind, id)): Path<(String, u64)>,
) -> AppResult<Json<DetailedTitle>> {
    let kind: MediaKind = kind.parse()?;

    tracing::info!(request_id = %request_id, id, kind = %kind, "Loading full details");

    let detailed = state.catalog.full_details(id, kind).await?;
    Ok(Json(detailed))
}
