/// OMDB endpoint builder
///
/// Lookups go by IMDB id; the key travels as the `apikey` query parameter.
use reqwest::Url;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct OmdbEndpoints {
    api_url: String,
    api_key: String,
}

impl OmdbEndpoints {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: format!("{}/", api_url.trim_end_matches('/')),
            api_key: api_key.into(),
        }
    }

    pub fn by_imdb_id(&self, imdb_id: &str) -> AppResult<String> {
        Url::parse_with_params(
            &self.api_url,
            &[("i", imdb_id), ("apikey", self.api_key.as_str())],
        )
        .map(String::from)
        .map_err(|e| AppError::Internal(format!("Invalid OMDB URL {}: {}", self.api_url, e)))
    }
}
