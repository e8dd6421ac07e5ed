/// Serves a fresh cached response or falls through to a fetch.
///
/// Checks `$cache` for a fresh entry under `$key` and returns it as
/// `Ok(value)`. Otherwise awaits `$fetch`, which must resolve to an
/// `AppResult<serde_json::Value>`. Storing the fetched value is left to the
/// fetch path (the request queue writes the cache when a call completes).
///
/// # Arguments
/// * `$cache`: A `ResponseCache`.
/// * `$key`: The full request URL used as cache key.
/// * `$fetch`: Future producing the value when the cache has nothing fresh.
///
/// # Example
/// ```rust,ignore
/// let payload = cached!(self.cache, url, self.queue.enqueue(url.to_string()))?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $fetch:expr) => {{
        match $cache.get($key).await {
            Some(cached) => Ok(cached),
            None => $fetch.await,
        }
    }};
}
