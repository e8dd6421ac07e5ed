use serde::Deserialize;

pub mod page;
pub mod title;
pub mod watchlist;

pub use page::{page_window, Page, PageLink, MAX_PAGES};
pub use title::{
    CastMember, ContentCategory, DetailedTitle, Genre, GenreCatalog, MediaKind, Rating, Title,
};
pub use watchlist::{Watchlist, WatchlistEntry};

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

fn image_url(size: &str, path: Option<String>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{IMAGE_BASE}/{size}{p}"))
}

fn year_of(date: Option<&str>) -> Option<i32> {
    date.and_then(|d| d.get(..4)).and_then(|y| y.parse().ok())
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response of `/genre/{kind}/list`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbGenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Paginated listing from trending, discover and search endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<TmdbListItem>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

impl TmdbPage {
    /// Converts the listing, tagging each item with its kind
    ///
    /// `kind` is the kind implied by the endpoint; mixed listings pass `None`
    /// and rely on the per-item `media_type` label. Items of any other media
    /// type (people) are dropped.
    pub fn into_page(self, kind: Option<MediaKind>) -> Page<Title> {
        let results = self
            .results
            .into_iter()
            .filter_map(|item| {
                let kind = kind.or_else(|| item.labelled_kind())?;
                Some(item.into_title(kind))
            })
            .collect();
        Page::new(self.page, results, self.total_pages, self.total_results)
    }
}

/// Title as it appears in a listing
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbListItem {
    pub id: u64,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

impl TmdbListItem {
    fn labelled_kind(&self) -> Option<MediaKind> {
        match self.media_type.as_deref() {
            Some("movie") => Some(MediaKind::Movie),
            Some("tv") => Some(MediaKind::Show),
            Some(_) => None,
            // Unlabelled: movies carry `title`, shows carry `name`
            None if self.title.is_some() => Some(MediaKind::Movie),
            None if self.name.is_some() => Some(MediaKind::Show),
            None => None,
        }
    }

    pub fn into_title(self, kind: MediaKind) -> Title {
        let date = match kind {
            MediaKind::Movie => self.release_date.as_deref(),
            MediaKind::Show => self.first_air_date.as_deref(),
        };
        let release_year = year_of(date);

        Title {
            id: self.id,
            kind,
            display_name: self.title.or(self.name).unwrap_or_default(),
            release_year,
            overview: self.overview.unwrap_or_default(),
            genre_ids: self.genre_ids,
            rating_average: self.vote_average.unwrap_or_default(),
            poster_url: image_url("w500", self.poster_path),
            backdrop_url: image_url("w1280", self.backdrop_path),
        }
    }
}

/// Response of `/{kind}/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbDetails {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
}

impl TmdbDetails {
    pub fn runtime_minutes(&self) -> Option<u32> {
        self.runtime
            .filter(|r| *r > 0)
            .or_else(|| self.episode_run_time.first().copied())
    }

    pub fn genre_ids(&self) -> Vec<u64> {
        self.genres.iter().map(|g| g.id).collect()
    }

    pub fn to_title(&self, kind: MediaKind) -> Title {
        let date = match kind {
            MediaKind::Movie => self.release_date.as_deref(),
            MediaKind::Show => self.first_air_date.as_deref(),
        };

        Title {
            id: self.id,
            kind,
            display_name: self
                .title
                .clone()
                .or_else(|| self.name.clone())
                .unwrap_or_default(),
            release_year: year_of(date),
            overview: self.overview.clone().unwrap_or_default(),
            genre_ids: self.genre_ids(),
            rating_average: self.vote_average.unwrap_or_default(),
            poster_url: image_url("w500", self.poster_path.clone()),
            backdrop_url: image_url("w1280", self.backdrop_path.clone()),
        }
    }
}

/// Response of `/{kind}/{id}/credits`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

impl From<TmdbCastMember> for CastMember {
    fn from(member: TmdbCastMember) -> Self {
        CastMember {
            id: member.id,
            name: member.name,
            character: member.character,
            profile_url: image_url("w185", member.profile_path),
        }
    }
}

/// Response of `/{kind}/{id}/external_ids`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbExternalIds {
    #[serde(default)]
    pub imdb_id: Option<String>,
}

// ============================================================================
// OMDB API Types
// ============================================================================

/// OMDB title lookup; only the ratings are used
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OmdbTitle {
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<OmdbRating>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OmdbRating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl From<OmdbRating> for Rating {
    fn from(rating: OmdbRating) -> Self {
        Rating::new(rating.source, rating.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mixed_listing_uses_media_type_label() {
        let page: TmdbPage = serde_json::from_value(json!({
            "page": 1,
            "total_pages": 1000,
            "total_results": 20000,
            "results": [
                {"id": 1, "media_type": "movie", "title": "Dune", "release_date": "2021-09-15"},
                {"id": 2, "media_type": "tv", "name": "Severance", "first_air_date": "2022-02-17"},
                {"id": 3, "media_type": "person", "name": "Keanu Reeves"}
            ]
        }))
        .unwrap();

        let page = page.into_page(None);
        assert_eq!(page.total_pages, MAX_PAGES);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].kind, MediaKind::Movie);
        assert_eq!(page.results[0].release_year, Some(2021));
        assert_eq!(page.results[1].kind, MediaKind::Show);
        assert_eq!(page.results[1].display_name, "Severance");
        assert_eq!(page.results[1].release_year, Some(2022));
    }

    #[test]
    fn test_unlabelled_item_falls_back_to_field_shape() {
        let item: TmdbListItem =
            serde_json::from_value(json!({"id": 7, "name": "The Wire"})).unwrap();
        assert_eq!(item.labelled_kind(), Some(MediaKind::Show));
    }

    #[test]
    fn test_endpoint_kind_wins_over_label() {
        let page: TmdbPage = serde_json::from_value(json!({
            "results": [{"id": 4, "name": "Dark"}]
        }))
        .unwrap();
        let page = page.into_page(Some(MediaKind::Show));
        assert_eq!(page.results[0].kind, MediaKind::Show);
    }

    #[test]
    fn test_image_urls_expanded() {
        let item: TmdbListItem = serde_json::from_value(json!({
            "id": 603,
            "title": "The Matrix",
            "poster_path": "/p.jpg",
            "backdrop_path": "/b.jpg"
        }))
        .unwrap();
        let title = item.into_title(MediaKind::Movie);
        assert_eq!(
            title.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/p.jpg")
        );
        assert_eq!(
            title.backdrop_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w1280/b.jpg")
        );
    }

    #[test]
    fn test_details_runtime_for_show() {
        let details: TmdbDetails = serde_json::from_value(json!({
            "id": 1399,
            "name": "Game of Thrones",
            "episode_run_time": [60, 55],
            "genres": [{"id": 18, "name": "Drama"}]
        }))
        .unwrap();
        assert_eq!(details.runtime_minutes(), Some(60));
        assert_eq!(details.genre_ids(), vec![18]);
        assert_eq!(details.to_title(MediaKind::Show).display_name, "Game of Thrones");
    }

    #[test]
    fn test_cast_member_profile_url() {
        let member: TmdbCastMember = serde_json::from_value(json!({
            "id": 6384,
            "name": "Keanu Reeves",
            "character": "Neo",
            "profile_path": "/k.jpg"
        }))
        .unwrap();
        let member = CastMember::from(member);
        assert_eq!(
            member.profile_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w185/k.jpg")
        );
    }

    #[test]
    fn test_omdb_ratings_deserialization() {
        let omdb: OmdbTitle = serde_json::from_value(json!({
            "Title": "Inception",
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "8.8/10"},
                {"Source": "Rotten Tomatoes", "Value": "87%"}
            ]
        }))
        .unwrap();
        assert_eq!(omdb.ratings.len(), 2);
        assert_eq!(omdb.ratings[1].value, "87%");

        let missing: OmdbTitle =
            serde_json::from_value(json!({"Response": "False", "Error": "Incorrect IMDb ID."}))
                .unwrap();
        assert!(missing.ratings.is_empty());
    }
}
