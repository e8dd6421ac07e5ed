use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{
        CastMember, ContentCategory, DetailedTitle, GenreCatalog, MediaKind, OmdbTitle, Page,
        Rating, Title, TmdbCredits, TmdbDetails, TmdbExternalIds, TmdbGenreList, TmdbPage,
    },
    services::{
        client::ApiClient,
        providers::{OmdbEndpoints, TmdbEndpoints},
    },
};

/// Source label of the primary rating
pub const PRIMARY_RATING_SOURCE: &str = "TMDB";

/// Content aggregator: listings, search and merged detail views
#[derive(Clone)]
pub struct CatalogService {
    client: ApiClient,
    tmdb: TmdbEndpoints,
    omdb: OmdbEndpoints,
}

impl CatalogService {
    pub fn new(client: ApiClient, tmdb: TmdbEndpoints, omdb: OmdbEndpoints) -> Self {
        Self { client, tmdb, omdb }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn endpoints(&self) -> &TmdbEndpoints {
        &self.tmdb
    }

    /// Movie and show genre lists; empty lists if either lookup fails
    pub async fn genres(&self) -> GenreCatalog {
        match self.try_genres().await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(error = %e, "Error loading genres");
                GenreCatalog::default()
            }
        }
    }

    async fn try_genres(&self) -> AppResult<GenreCatalog> {
        let movie_url = self.tmdb.genre_list(MediaKind::Movie)?;
        let tv_url = self.tmdb.genre_list(MediaKind::Show)?;

        let (movie, tv) = tokio::try_join!(
            self.client.get::<TmdbGenreList>(&movie_url),
            self.client.get::<TmdbGenreList>(&tv_url),
        )?;

        Ok(GenreCatalog {
            movie: movie.genres,
            tv: tv.genres,
        })
    }

    /// One page of a listing; `genre_id` filters movies and shows only
    #[instrument(skip(self))]
    pub async fn by_type(
        &self,
        category: &str,
        page: u32,
        genre_id: Option<u64>,
    ) -> AppResult<Page<Title>> {
        let category: ContentCategory = category.parse()?;

        let (url, kind) = match category {
            ContentCategory::Trending => (self.tmdb.trending(page)?, None),
            ContentCategory::Movies => (
                self.tmdb.discover(MediaKind::Movie, page, genre_id)?,
                Some(MediaKind::Movie),
            ),
            ContentCategory::Shows => (
                self.tmdb.discover(MediaKind::Show, page, genre_id)?,
                Some(MediaKind::Show),
            ),
        };

        let listing: TmdbPage = self.client.get(&url).await?;
        let page = listing.into_page(kind);

        tracing::info!(
            results = page.results.len(),
            total_pages = page.total_pages,
            "Listing loaded"
        );

        Ok(page)
    }

    /// Multi-type text search
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, page: u32) -> AppResult<Page<Title>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = self.tmdb.search_multi(query, page)?;
        let listing: TmdbPage = self.client.get(&url).await?;
        let page = listing.into_page(None);

        tracing::info!(query = %query, results = page.results.len(), "Search completed");

        Ok(page)
    }

    /// Single title, primary metadata only
    pub async fn details(&self, id: u64, kind: MediaKind) -> AppResult<Title> {
        let details = self.raw_details(id, kind).await?;
        Ok(details.to_title(kind))
    }

    pub(crate) async fn raw_details(&self, id: u64, kind: MediaKind) -> AppResult<TmdbDetails> {
        let url = self.tmdb.details(kind, id)?;
        self.client.get(&url).await
    }

    /// Detail view merged from primary metadata, credits and secondary ratings
    ///
    /// Failures of the metadata or credits lookups are returned; the secondary
    /// ratings lookup only ever contributes ratings or nothing.
    #[instrument(skip(self))]
    pub async fn full_details(&self, id: u64, kind: MediaKind) -> AppResult<DetailedTitle> {
        let credits_url = self.tmdb.credits(kind, id)?;

        let (details, credits, secondary) = tokio::join!(
            self.raw_details(id, kind),
            self.client.get::<TmdbCredits>(&credits_url),
            self.secondary_ratings(id, kind),
        );
        let details = details?;
        let credits = credits?;

        let mut ratings = Vec::new();
        if let Some(primary) = primary_rating(&details) {
            ratings.push(primary);
        }
        ratings.extend(secondary);

        Ok(DetailedTitle {
            title: details.to_title(kind),
            runtime_minutes: details.runtime_minutes(),
            genres: details.genres,
            cast: credits.cast.into_iter().map(CastMember::from).collect(),
            ratings,
        })
    }

    /// OMDB ratings via the title's IMDB id; empty on any failure
    async fn secondary_ratings(&self, id: u64, kind: MediaKind) -> Vec<Rating> {
        match self.try_secondary_ratings(id, kind).await {
            Ok(ratings) => ratings,
            Err(e) => {
                tracing::warn!(id, kind = %kind, error = %e, "Error fetching OMDB data");
                Vec::new()
            }
        }
    }

    async fn try_secondary_ratings(&self, id: u64, kind: MediaKind) -> AppResult<Vec<Rating>> {
        let external_ids: TmdbExternalIds =
            self.client.get(&self.tmdb.external_ids(kind, id)?).await?;

        let Some(imdb_id) = external_ids.imdb_id.filter(|i| !i.is_empty()) else {
            return Ok(Vec::new());
        };

        let omdb: OmdbTitle = self.client.get(&self.omdb.by_imdb_id(&imdb_id)?).await?;
        Ok(omdb.ratings.into_iter().map(Rating::from).collect())
    }
}

/// Primary rating formatted as `X.X/10`; absent when the title has no votes
fn primary_rating(details: &TmdbDetails) -> Option<Rating> {
    details
        .vote_average
        .filter(|v| *v > 0.0)
        .map(|v| Rating::new(PRIMARY_RATING_SOURCE, format!("{}/10", one_decimal(v))))
}

/// `v` with one decimal; exact ties round away from zero
fn one_decimal(v: f64) -> String {
    // Only quarter values (x.25, x.75) sit exactly halfway between tenths
    let quarters = v * 4.0;
    if quarters.fract() == 0.0 && quarters.abs() % 2.0 == 1.0 {
        return format!("{:.1}", (v * 10.0).round() / 10.0);
    }
    format!("{:.1}", v)
}
