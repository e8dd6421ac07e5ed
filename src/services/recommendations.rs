use tracing::instrument;

use crate::{
    error::AppResult,
    models::{MediaKind, Title, TmdbPage, WatchlistEntry},
    services::catalog::CatalogService,
};

/// Watchlist entries used to derive genre affinity
const RECENT_ENTRIES: usize = 5;
const MAX_GENRES: usize = 3;
const PER_KIND_LIMIT: usize = 6;
const MAX_RECOMMENDATIONS: usize = 8;

/// Generates watch recommendations from the genres of recently watchlisted titles
///
/// The genres of the last few watchlist entries are collected in discovery
/// order, the first few are combined into a single discovery filter, and the
/// most popular movies and shows matching all of them are returned, minus
/// anything already on the watchlist.
#[derive(Clone)]
pub struct RecommendationService {
    catalog: CatalogService,
}

impl RecommendationService {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }

    /// Never fails; any error yields an empty list
    #[instrument(skip_all, fields(watchlist_len = watchlist.len()))]
    pub async fn recommend(&self, watchlist: &[WatchlistEntry]) -> Vec<Title> {
        if watchlist.is_empty() {
            return Vec::new();
        }

        match self.try_recommend(watchlist).await {
            Ok(titles) => {
                tracing::info!(count = titles.len(), "Recommendations generated");
                titles
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error getting recommendations");
                Vec::new()
            }
        }
    }

    async fn try_recommend(&self, watchlist: &[WatchlistEntry]) -> AppResult<Vec<Title>> {
        let genre_ids = self.affinity_genres(watchlist).await;
        if genre_ids.is_empty() {
            return Ok(Vec::new());
        }

        let filter = genre_ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        tracing::debug!(genres = %filter, "Discovering by genre");

        let endpoints = self.catalog.endpoints();
        let movie_url = endpoints.discover_by_genres(MediaKind::Movie, &filter)?;
        let tv_url = endpoints.discover_by_genres(MediaKind::Show, &filter)?;

        let client = self.catalog.client();
        let (movies, shows) = tokio::try_join!(
            client.get::<TmdbPage>(&movie_url),
            client.get::<TmdbPage>(&tv_url),
        )?;

        let on_watchlist = |title: &Title| watchlist.iter().any(|e| e.is(title.id, title.kind));
        let unseen = |page: TmdbPage, kind: MediaKind| -> Vec<Title> {
            page.into_page(Some(kind))
                .results
                .into_iter()
                .filter(|t| !on_watchlist(t))
                .take(PER_KIND_LIMIT)
                .collect()
        };

        let mut titles = unseen(movies, MediaKind::Movie);
        titles.extend(unseen(shows, MediaKind::Show));
        titles.truncate(MAX_RECOMMENDATIONS);

        Ok(titles)
    }

    /// First distinct genre ids of the most recent entries, in discovery order
    ///
    /// Entries whose details cannot be fetched are skipped.
    async fn affinity_genres(&self, watchlist: &[WatchlistEntry]) -> Vec<u64> {
        let recent = &watchlist[watchlist.len().saturating_sub(RECENT_ENTRIES)..];
        let mut genre_ids: Vec<u64> = Vec::new();

        for entry in recent {
            match self.catalog.raw_details(entry.id, entry.kind).await {
                Ok(details) => {
                    for id in details.genre_ids() {
                        if !genre_ids.contains(&id) {
                            genre_ids.push(id);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        id = entry.id,
                        kind = %entry.kind,
                        error = %e,
                        "Error loading item for recommendations"
                    );
                }
            }
        }

        genre_ids.truncate(MAX_GENRES);
        genre_ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::{
        client::test_client,
        gateway::MockGateway,
        providers::{OmdbEndpoints, TmdbEndpoints},
    };
    use chrono::Utc;
    use serde_json::{json, Value};

    fn service(gateway: MockGateway) -> RecommendationService {
        RecommendationService::new(CatalogService::new(
            test_client(gateway),
            TmdbEndpoints::new("https://api.themoviedb.org/3"),
            OmdbEndpoints::new("https://www.omdbapi.com", "key"),
        ))
    }

    fn entry(id: u64, kind: MediaKind) -> WatchlistEntry {
        WatchlistEntry {
            id,
            kind,
            display_name: format!("Title {id}"),
            added_at: Utc::now(),
        }
    }

    fn listing(ids: std::ops::Range<u64>, name_field: &str) -> Value {
        let results: Vec<Value> = ids
            .map(|id| json!({"id": id, name_field: format!("Candidate {id}")}))
            .collect();
        json!({"page": 1, "total_pages": 1, "results": results})
    }

    #[tokio::test]
    async fn test_empty_watchlist_makes_no_call() {
        let recs = service(MockGateway::new()).recommend(&[]).await;
        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn test_excludes_watchlisted_titles() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_get_json()
            .withf(|url| url.ends_with("/movie/5"))
            .returning(|_| Ok(json!({"id": 5, "title": "Seen", "genres": [{"id": 28, "name": "Action"}]})));
        gateway
            .expect_get_json()
            .withf(|url| url.contains("/discover/movie?with_genres=28&"))
            .times(1)
            .returning(|_| Ok(listing(4..8, "title")));
        gateway
            .expect_get_json()
            .withf(|url| url.contains("/discover/tv?with_genres=28&"))
            .times(1)
            .returning(|_| Ok(listing(5..6, "name")));

        let recs = service(gateway)
            .recommend(&[entry(5, MediaKind::Movie)])
            .await;

        // Movie 5 is excluded; show 5 shares the id but not the kind
        assert!(!recs.iter().any(|t| t.is(5, MediaKind::Movie)));
        assert!(recs.iter().any(|t| t.is(5, MediaKind::Show)));
        assert_eq!(recs.len(), 4);
    }

    #[tokio::test]
    async fn test_truncation_six_movies_then_two_shows() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_get_json()
            .withf(|url| url.ends_with("/tv/1"))
            .returning(|_| Ok(json!({"id": 1, "name": "Show", "genres": [{"id": 18, "name": "Drama"}]})));
        gateway
            .expect_get_json()
            .withf(|url| url.contains("/discover/movie?"))
            .returning(|_| Ok(listing(100..110, "title")));
        gateway
            .expect_get_json()
            .withf(|url| url.contains("/discover/tv?"))
            .returning(|_| Ok(listing(200..210, "name")));

        let recs = service(gateway).recommend(&[entry(1, MediaKind::Show)]).await;

        assert_eq!(recs.len(), 8);
        assert!(recs[..6].iter().all(|t| t.kind == MediaKind::Movie));
        assert!(recs[6..].iter().all(|t| t.kind == MediaKind::Show));
        assert_eq!(recs[0].id, 100);
        assert_eq!(recs[6].id, 200);
    }

    #[tokio::test]
    async fn test_uses_last_five_entries_and_first_three_genres() {
        let mut gateway = MockGateway::new();
        // Entry 1 is the oldest of six and must not be looked up
        gateway
            .expect_get_json()
            .withf(|url| url.ends_with("/movie/1"))
            .times(0)
            .returning(|_| Ok(json!({"id": 1})));
        gateway
            .expect_get_json()
            .withf(|url| url.ends_with("/movie/2"))
            .returning(|_| {
                Ok(json!({"id": 2, "genres": [{"id": 35, "name": "Comedy"}, {"id": 18, "name": "Drama"}]}))
            });
        gateway
            .expect_get_json()
            .withf(|url| url.ends_with("/movie/3"))
            .returning(|_| Err(AppError::Upstream { status: 404 }));
        gateway
            .expect_get_json()
            .withf(|url| {
                url.ends_with("/movie/4") || url.ends_with("/movie/5") || url.ends_with("/movie/6")
            })
            .returning(|_| {
                Ok(json!({"genres": [{"id": 18, "name": "Drama"}, {"id": 80, "name": "Crime"}, {"id": 99, "name": "Documentary"}], "id": 0}))
            });
        gateway
            .expect_get_json()
            .withf(|url| url.contains("/discover/") && url.contains("with_genres=35%2C18%2C80&"))
            .returning(|_| Ok(listing(50..52, "title")));

        let watchlist: Vec<_> = (1..=6).map(|id| entry(id, MediaKind::Movie)).collect();
        let recs = service(gateway).recommend(&watchlist).await;

        // Any unexpected lookup would fail the whole routine
        assert_eq!(recs.len(), 4);
    }

    #[tokio::test]
    async fn test_all_lookups_failing_yields_empty() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_get_json()
            .withf(|url| !url.contains("/discover/"))
            .returning(|_| Err(AppError::Upstream { status: 500 }));

        let recs = service(gateway)
            .recommend(&[entry(1, MediaKind::Movie), entry(2, MediaKind::Show)])
            .await;

        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn test_discovery_failure_yields_empty() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_get_json()
            .withf(|url| url.ends_with("/movie/9"))
            .returning(|_| Ok(json!({"id": 9, "genres": [{"id": 28, "name": "Action"}]})));
        gateway
            .expect_get_json()
            .withf(|url| url.contains("/discover/"))
            .returning(|_| Err(AppError::Upstream { status: 503 }));

        let recs = service(gateway).recommend(&[entry(9, MediaKind::Movie)]).await;
        assert!(recs.is_empty());
    }
}
