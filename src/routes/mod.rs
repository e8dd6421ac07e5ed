use axum::{
    http::StatusCode,
    middleware::from_fn,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    db::LocalStore,
    error::AppResult,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{
        catalog::CatalogService,
        client::ApiClient,
        gateway::Gateway,
        providers::{OmdbEndpoints, TmdbEndpoints},
        recommendations::RecommendationService,
        watchlist::WatchlistService,
    },
};

pub mod recommendations;
pub mod titles;
pub mod watchlist;

/// Services shared by all handlers
pub struct AppState {
    pub catalog: CatalogService,
    pub recommendations: RecommendationService,
    pub watchlist: WatchlistService,
}

impl AppState {
    /// Wires the services over one cache and one request queue
    ///
    /// Starts the queue runner, so this must run inside a Tokio runtime.
    pub async fn new(
        gateway: Arc<dyn Gateway>,
        config: &Config,
        store: LocalStore,
    ) -> AppResult<Self> {
        let client = ApiClient::new(gateway, config.cache_ttl(), config.request_delay());
        let catalog = CatalogService::new(
            client,
            TmdbEndpoints::new(config.tmdb_api_url.as_str()),
            OmdbEndpoints::new(config.omdb_api_url.as_str(), config.omdb_api_key.as_str()),
        );
        let recommendations = RecommendationService::new(catalog.clone());
        let watchlist = WatchlistService::load(store).await?;

        Ok(Self {
            catalog,
            recommendations,
            watchlist,
        })
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/genres", get(titles::genres))
        .route("/titles", get(titles::list))
        .route("/titles/:kind/:id", get(titles::details))
        .route("/titles/:kind/:id/full", get(titles::full_details))
        .route("/search", get(titles::search))
        .route("/browse", get(titles::browse))
        .route("/watchlist", get(watchlist::entries))
        .route("/watchlist/toggle", post(watchlist::toggle))
        .route("/watchlist/titles", get(watchlist::titles))
        .route("/recommendations", get(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
