use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    db::LocalStore,
    error::AppResult,
    models::{MediaKind, Page, Title, Watchlist, WatchlistEntry},
    services::catalog::CatalogService,
};

/// Store key of the saved collection
pub const WATCHLIST_KEY: &str = "movieWatchlist";

/// The user's watchlist, mirrored to the local store on every change
pub struct WatchlistService {
    store: LocalStore,
    watchlist: RwLock<Watchlist>,
}

impl WatchlistService {
    /// Reads the saved collection once; a missing key starts an empty list
    pub async fn load(store: LocalStore) -> AppResult<Self> {
        let entries: Vec<WatchlistEntry> = store.get(WATCHLIST_KEY).await?.unwrap_or_default();
        let watchlist = Watchlist::from_entries(entries);

        tracing::info!(
            path = %store.path().display(),
            entries = watchlist.len(),
            "Watchlist loaded"
        );

        Ok(Self {
            store,
            watchlist: RwLock::new(watchlist),
        })
    }

    pub async fn entries(&self) -> Vec<WatchlistEntry> {
        self.watchlist.read().await.entries().to_vec()
    }

    /// Adds or removes the title and persists the whole collection
    ///
    /// Returns whether the title is on the watchlist afterwards. The in-memory
    /// change is rolled back if persisting fails.
    pub async fn toggle(&self, id: u64, kind: MediaKind, display_name: &str) -> AppResult<bool> {
        let mut watchlist = self.watchlist.write().await;
        let previous = watchlist.clone();

        let added = watchlist.toggle(id, kind, display_name, Utc::now());
        if let Err(e) = self.store.set(WATCHLIST_KEY, &*watchlist).await {
            *watchlist = previous;
            return Err(e);
        }

        tracing::info!(id, kind = %kind, added, "Watchlist toggled");
        Ok(added)
    }

    /// Current details of every saved title; entries that fail to load are skipped
    pub async fn titles(&self, catalog: &CatalogService) -> Page<Title> {
        let entries = self.entries().await;
        let mut titles = Vec::with_capacity(entries.len());

        for entry in &entries {
            match catalog.details(entry.id, entry.kind).await {
                Ok(title) => titles.push(title),
                Err(e) => {
                    tracing::warn!(id = entry.id, kind = %entry.kind, error = %e, "Error loading item");
                }
            }
        }

        Page::single(titles)
    }
}
