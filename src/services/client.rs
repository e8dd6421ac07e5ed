use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    cached,
    db::ResponseCache,
    error::{AppError, AppResult},
    services::{gateway::Gateway, request_queue::RequestQueue},
};

/// Front door for upstream reads: fresh cache hits are answered directly,
/// everything else goes through the paced request queue.
#[derive(Clone)]
pub struct ApiClient {
    cache: ResponseCache,
    queue: RequestQueue,
}

impl ApiClient {
    /// Builds the cache and starts the queue runner; needs a Tokio runtime
    pub fn new(gateway: Arc<dyn Gateway>, cache_ttl: Duration, pacing: Duration) -> Self {
        let cache = ResponseCache::new(cache_ttl);
        let queue = RequestQueue::spawn(gateway, cache.clone(), pacing);
        Self { cache, queue }
    }

    /// Raw JSON for `url`
    pub async fn get_json(&self, url: &str) -> AppResult<Value> {
        cached!(self.cache, url, self.queue.enqueue(url.to_string()))
    }

    /// JSON for `url` deserialized into `T`
    ///
    /// A body of the wrong shape counts as an upstream failure.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let payload = self.get_json(url).await?;
        serde_json::from_value(payload).map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Upstream response has unexpected shape");
            AppError::MalformedResponse(e.to_string())
        })
    }
}

#[cfg(test)]
pub(crate) fn test_client(gateway: crate::services::gateway::MockGateway) -> ApiClient {
    ApiClient::new(
        Arc::new(gateway),
        crate::db::cache::DEFAULT_TTL,
        Duration::ZERO,
    )
}
