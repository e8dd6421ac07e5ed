/// TMDB endpoint builder
///
/// Produces the full request URLs (query string included) that double as cache
/// keys, so the same logical request always maps to the same string.
///
/// Endpoints:
/// - `/genre/{kind}/list`
/// - `/trending/all/week`
/// - `/discover/{kind}` sorted by popularity, optionally genre-filtered
/// - `/search/multi`
/// - `/{kind}/{id}`, `/{kind}/{id}/credits`, `/{kind}/{id}/external_ids`
use reqwest::Url;

use crate::{
    error::{AppError, AppResult},
    models::MediaKind,
};

const LANGUAGE: &str = "en-US";
const SORT_BY_POPULARITY: &str = "popularity.desc";

#[derive(Debug, Clone)]
pub struct TmdbEndpoints {
    api_url: String,
}

impl TmdbEndpoints {
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn build(&self, path: &str, params: &[(&str, String)]) -> AppResult<String> {
        let url = format!("{}{}", self.api_url, path);
        if params.is_empty() {
            return Ok(url);
        }
        Url::parse_with_params(&url, params)
            .map(String::from)
            .map_err(|e| AppError::Internal(format!("Invalid TMDB URL {}: {}", url, e)))
    }

    pub fn genre_list(&self, kind: MediaKind) -> AppResult<String> {
        self.build(&format!("/genre/{}/list", kind.path_segment()), &[])
    }

    pub fn trending(&self, page: u32) -> AppResult<String> {
        self.build(
            "/trending/all/week",
            &[("page", page.to_string()), ("language", LANGUAGE.to_string())],
        )
    }

    pub fn discover(&self, kind: MediaKind, page: u32, genre_id: Option<u64>) -> AppResult<String> {
        let mut params = vec![("page", page.to_string()), ("language", LANGUAGE.to_string())];
        if let Some(genre_id) = genre_id {
            params.push(("with_genres", genre_id.to_string()));
        }
        params.push(("sort_by", SORT_BY_POPULARITY.to_string()));

        self.build(&format!("/discover/{}", kind.path_segment()), &params)
    }

    /// First page of popular titles matching all of `genre_ids` (comma-joined)
    pub fn discover_by_genres(&self, kind: MediaKind, genre_ids: &str) -> AppResult<String> {
        self.build(
            &format!("/discover/{}", kind.path_segment()),
            &[
                ("with_genres", genre_ids.to_string()),
                ("sort_by", SORT_BY_POPULARITY.to_string()),
                ("page", "1".to_string()),
            ],
        )
    }

    pub fn search_multi(&self, query: &str, page: u32) -> AppResult<String> {
        self.build(
            "/search/multi",
            &[
                ("query", query.to_string()),
                ("page", page.to_string()),
                ("language", LANGUAGE.to_string()),
            ],
        )
    }

    pub fn details(&self, kind: MediaKind, id: u64) -> AppResult<String> {
        self.build(&format!("/{}/{}", kind.path_segment(), id), &[])
    }

    pub fn credits(&self, kind: MediaKind, id: u64) -> AppResult<String> {
        self.build(&format!("/{}/{}/credits", kind.path_segment(), id), &[])
    }

    pub fn external_ids(&self, kind: MediaKind, id: u64) -> AppResult<String> {
        self.build(&format!("/{}/{}/external_ids", kind.path_segment(), id), &[])
    }
}
