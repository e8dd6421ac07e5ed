use reqwest::{header::AUTHORIZATION, Client as HttpClient, RequestBuilder, Url};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Outbound HTTP seam for every upstream call
///
/// Implementations perform one GET and return the parsed JSON body, failing
/// on transport errors and non-success statuses.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    async fn get_json(&self, url: &str) -> AppResult<Value>;
}

/// reqwest-backed gateway
///
/// Attaches the bearer token only to requests whose host is the metadata
/// provider's; every other host (the ratings API) gets no auth header.
#[derive(Clone)]
pub struct HttpGateway {
    http_client: HttpClient,
    bearer_host: String,
    bearer_token: String,
}

impl HttpGateway {
    pub fn new(bearer_host: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            bearer_host: bearer_host.into(),
            bearer_token: bearer_token.into(),
        }
    }

    fn wants_bearer(&self, url: &Url) -> bool {
        url.host_str() == Some(self.bearer_host.as_str())
    }

    /// GET for `url`, with the bearer header when the host calls for it
    fn request(&self, url: &str) -> AppResult<RequestBuilder> {
        let parsed = Url::parse(url)
            .map_err(|e| AppError::Internal(format!("Invalid upstream URL {}: {}", url, e)))?;

        let authorized = self.wants_bearer(&parsed);
        let mut request = self.http_client.get(parsed);
        if authorized {
            request = request.header(AUTHORIZATION, format!("Bearer {}", self.bearer_token));
        }

        tracing::debug!(url = %url, authorized, "Upstream request");
        Ok(request)
    }
}

#[async_trait::async_trait]
impl Gateway for HttpGateway {
    async fn get_json(&self, url: &str) -> AppResult<Value> {
        let response = self.request(url)?.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(url = %url, status = status.as_u16(), "Upstream returned error status");
            return Err(AppError::Upstream {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> HttpGateway {
        HttpGateway::new("api.themoviedb.org", "token")
    }

    #[test]
    fn test_bearer_for_metadata_host() {
        let url = Url::parse("https://api.themoviedb.org/3/movie/603").unwrap();
        assert!(gateway().wants_bearer(&url));
    }

    #[test]
    fn test_no_bearer_for_ratings_host() {
        let url = Url::parse("https://www.omdbapi.com/?i=tt0133093&apikey=k").unwrap();
        assert!(!gateway().wants_bearer(&url));
    }

    #[test]
    fn test_no_bearer_for_lookalike_host() {
        let url = Url::parse("https://api.themoviedb.org.example.com/3/movie/603").unwrap();
        assert!(!gateway().wants_bearer(&url));
    }

    #[test]
    fn test_request_to_metadata_host_carries_bearer() {
        let request = gateway()
            .request("https://api.themoviedb.org/3/movie/603")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.method(), &reqwest::Method::GET);
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer token"
        );
    }

    #[test]
    fn test_request_to_ratings_host_has_no_auth_header() {
        let request = gateway()
            .request("https://www.omdbapi.com/?i=tt0133093&apikey=k")
            .unwrap()
            .build()
            .unwrap();

        assert!(request.headers().get(AUTHORIZATION).is_none());
        assert_eq!(request.url().query(), Some("i=tt0133093&apikey=k"));
    }

    #[tokio::test]
    async fn test_invalid_url_is_internal_error() {
        let result = gateway().get_json("not a url").await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
