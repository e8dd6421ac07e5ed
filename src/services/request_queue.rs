use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

use crate::db::ResponseCache;
use crate::error::{AppError, AppResult};
use crate::services::gateway::Gateway;

/// Default pause between two upstream calls (~10 requests per second)
pub const DEFAULT_PACING: Duration = Duration::from_millis(100);

/// One pending upstream call and the caller waiting on it
struct QueuedRequest {
    url: String,
    reply: oneshot::Sender<AppResult<Value>>,
}

/// Handle to the sequential request queue
///
/// Requests are executed one at a time, in the order they were enqueued, with
/// a fixed pause after each upstream call. A failed call only fails its own
/// caller. Dropping a waiting future does not cancel the queued call.
#[derive(Clone)]
pub struct RequestQueue {
    sender: mpsc::UnboundedSender<QueuedRequest>,
}

impl RequestQueue {
    /// Starts the queue runner and returns a handle to it
    ///
    /// The runner stops once every handle has been dropped and the queue is
    /// drained.
    pub fn spawn(gateway: Arc<dyn Gateway>, cache: ResponseCache, pacing: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        let runner = QueueRunner {
            receiver,
            gateway,
            cache,
            pacing,
        };
        tokio::spawn(runner.run());

        Self { sender }
    }

    /// Queues a GET for `url` and waits for its turn to complete
    pub async fn enqueue(&self, url: String) -> AppResult<Value> {
        let (reply, rx) = oneshot::channel();
        self.sender
            .send(QueuedRequest { url, reply })
            .map_err(|_| AppError::Internal("Request queue closed".to_string()))?;
        rx.await
            .map_err(|_| AppError::Internal("Request queue dropped the request".to_string()))?
    }
}

struct QueueRunner {
    receiver: mpsc::UnboundedReceiver<QueuedRequest>,
    gateway: Arc<dyn Gateway>,
    cache: ResponseCache,
    pacing: Duration,
}

impl QueueRunner {
    async fn run(mut self) {
        tracing::info!(pacing = ?self.pacing, "Request queue started");

        while let Some(request) = self.receiver.recv().await {
            self.handle(request).await;
        }

        tracing::info!("Request queue stopped");
    }

    async fn handle(&self, request: QueuedRequest) {
        let QueuedRequest { url, reply } = request;

        // An identical request ahead of this one may have filled the cache
        if let Some(payload) = self.cache.get(&url).await {
            tracing::debug!(url = %url, "Served queued request from cache");
            let _ = reply.send(Ok(payload));
            return;
        }

        let result = self.gateway.get_json(&url).await;
        match &result {
            Ok(payload) => self.cache.put(&url, payload.clone()).await,
            Err(e) => tracing::warn!(
                url = %url,
                upstream = e.is_upstream(),
                error = %e,
                "Queued request failed"
            ),
        }

        if reply.send(result).is_err() {
            tracing::debug!(url = %url, "Caller stopped waiting for queued request");
        }

        tokio::time::sleep(self.pacing).await;
    }
}
