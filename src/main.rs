use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use watchdeck::{
    config::Config,
    db::LocalStore,
    routes::{create_router, AppState},
    services::HttpGateway,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    let gateway = Arc::new(HttpGateway::new(config.tmdb_host()?, config.tmdb_token.as_str()));
    let store = LocalStore::new(config.store_path.clone());

    let state = AppState::new(gateway, &config, store)
        .await
        .context("Failed to initialize application state")?;
    let app = create_router(Arc::new(state));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        addr = %addr,
        store = %config.store_path.display(),
        cache_ttl_secs = config.cache_ttl_secs,
        request_delay_ms = config.request_delay_ms,
        "Server listening"
    );

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
