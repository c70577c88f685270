//! In-memory response cache keyed by normalized hostname.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::config::CACHE_MAX_CAPACITY;
use crate::error_handling::ProbeError;
use crate::probe::ProbeResult;

/// Probe results shared across requests for a fixed time-to-live.
///
/// Concurrent misses for the same key wait on a single in-flight probe
/// (`try_get_with`). Failed probes are not stored.
#[derive(Clone)]
pub struct ResponseCache {
    inner: Cache<String, Arc<ProbeResult>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, CACHE_MAX_CAPACITY)
    }

    pub fn with_capacity(ttl: Duration, max_capacity: u64) -> Self {
        log::debug!(
            "Response cache initialized with max capacity: {}, TTL: {}s",
            max_capacity,
            ttl.as_secs()
        );
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Returns the cached result for `key`, or runs `probe` and caches its result.
    ///
    /// # Errors
    ///
    /// The probe's error, shared with every caller that waited on the same
    /// in-flight probe.
    pub async fn get_or_probe<F>(&self, key: &str, probe: F) -> Result<Arc<ProbeResult>, Arc<ProbeError>>
    where
        F: Future<Output = Result<ProbeResult, ProbeError>>,
    {
        self.inner
            .try_get_with(key.to_string(), async {
                log::debug!("Cache miss for {}, probing", key);
                probe.await.map(Arc::new)
            })
            .await
    }

    pub async fn get(&self, key: &str) -> Option<Arc<ProbeResult>> {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: &str, value: ProbeResult) {
        self.inner.insert(key.to_string(), Arc::new(value)).await;
    }

    /// Approximate number of live entries (pending maintenance tasks are run first).
    pub async fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}
