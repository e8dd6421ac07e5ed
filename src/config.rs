use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB read access token, sent as a bearer token
    pub tmdb_token: String,

    /// OMDB API key, sent as the `apikey` query parameter
    pub omdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// OMDB API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Local key-value store holding the watchlist
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Freshness window of cached upstream responses, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Pause between two upstream requests, in milliseconds
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_omdb_api_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_store_path() -> PathBuf {
    PathBuf::from("watchdeck.json")
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_request_delay_ms() -> u64 {
    100
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Host part of the TMDB base URL; bearer auth is only sent there
    pub fn tmdb_host(&self) -> anyhow::Result<String> {
        let url = reqwest::Url::parse(&self.tmdb_api_url)?;
        url.host_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("TMDB_API_URL has no host: {}", self.tmdb_api_url))
    }
}
