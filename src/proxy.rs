//! Fetch Proxy
//!
//! Serves district data from the persisted cache when a fresh entry exists,
//! otherwise fetches upstream and repopulates the cache.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::cache::{CacheEntry, CacheStats, CacheStore};
use crate::error::{ProxyError, Result};
use crate::models::{DistrictQuery, Source, SourcedPayload};
use crate::params::ParamSet;
use crate::upstream::{non_ok_status, Upstream};

// == Fetch Proxy ==
/// Response-caching proxy in front of the upstream data API.
pub struct FetchProxy {
    store: Arc<CacheStore>,
    upstream: Arc<dyn Upstream>,
    api_key: String,
    ttl: Duration,
    stats: Mutex<CacheStats>,
}

impl FetchProxy {
    pub fn new(
        store: Arc<CacheStore>,
        upstream: Arc<dyn Upstream>,
        api_key: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            upstream,
            api_key: api_key.into(),
            ttl,
            stats: Mutex::new(CacheStats::new()),
        }
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        &self.store
    }

    pub async fn stats(&self) -> CacheStats {
        self.stats.lock().await.clone()
    }

    // == Get District Data ==
    /// Returns district records for a state and financial year.
    ///
    /// Validation failures touch neither the store nor upstream. A fresh
    /// cache entry is returned without an upstream call. On a miss the
    /// upstream body is cached and returned even when its own `status` is
    /// not `"ok"`. A failed upstream call leaves the store unchanged, and a
    /// failed cache write is logged without failing the request.
    pub async fn get_district_data(&self, query: &DistrictQuery) -> Result<SourcedPayload> {
        let query = query.validate()?;
        let params = ParamSet::for_query(&self.api_key, &query);
        let key = params.cache_key();

        if let Some(entry) = self.store.get(&key).await {
            if entry.is_fresh(self.ttl) {
                debug!(
                    "Cache hit for {}/{} (age {}ms)",
                    query.state_name,
                    query.fin_year,
                    entry.age_ms()
                );
                self.stats.lock().await.record_hit();
                return Ok(SourcedPayload::new(Source::Cache, entry.payload));
            }
            debug!("Stale cache entry for {}/{}", query.state_name, query.fin_year);
        }
        self.stats.lock().await.record_miss();

        let payload = self.fetch_upstream(&params).await?;

        if let Some(status) = non_ok_status(&payload) {
            warn!(
                "Upstream returned status {} for {}/{}: {}",
                status,
                query.state_name,
                query.fin_year,
                payload
                    .get("message")
                    .and_then(|m| m.as_str())
                    .unwrap_or("no message")
            );
        }

        if let Err(e) = self.store.put(key, CacheEntry::new(payload.clone())).await {
            error!("Failed to persist cache entry: {}", e);
            self.stats.lock().await.record_store_failure();
        }

        Ok(SourcedPayload::new(Source::Upstream, payload))
    }

    async fn fetch_upstream(&self, params: &ParamSet) -> Result<serde_json::Value> {
        self.stats.lock().await.record_upstream_call();

        match self.upstream.fetch(params).await {
            Ok(payload) => Ok(payload),
            Err(e) => {
                error!("Fetch error: {}", e);
                self.stats.lock().await.record_upstream_failure();
                Err(ProxyError::Upstream(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::current_timestamp_ms;
    use crate::error::UpstreamError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    const TTL: Duration = Duration::from_secs(3600);

    /// Counts calls and answers with a fixed body, or a parse failure.
    struct FakeUpstream {
        calls: AtomicUsize,
        body: Option<Value>,
    }

    impl FakeUpstream {
        fn ok(body: Value) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                body: Some(body),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                body: None,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Upstream for FakeUpstream {
        async fn fetch(&self, _params: &ParamSet) -> std::result::Result<Value, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.body {
                Some(body) => Ok(body.clone()),
                None => Err(serde_json::from_str::<Value>("not json").unwrap_err().into()),
            }
        }
    }

    fn proxy_with(upstream: Arc<FakeUpstream>) -> (FetchProxy, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(CacheStore::new(dir.path().join("cache.json")));
        (FetchProxy::new(store, upstream, "KEY", TTL), dir)
    }

    fn kerala_key() -> String {
        let query = DistrictQuery::new("KERALA", "2024-2025").validate().unwrap();
        ParamSet::for_query("KEY", &query).cache_key()
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let upstream = FakeUpstream::ok(json!({"status": "ok", "records": [{"d": 1}]}));
        let (proxy, _dir) = proxy_with(upstream.clone());
        let query = DistrictQuery::new("KERALA", "2024-2025");

        let first = proxy.get_district_data(&query).await.unwrap();
        assert_eq!(first.source, Source::Upstream);
        assert_eq!(upstream.calls(), 1);

        let second = proxy.get_district_data(&query).await.unwrap();
        assert_eq!(second.source, Source::Cache);
        assert_eq!(second.payload, first.payload);
        assert_eq!(upstream.calls(), 1);

        let stats = proxy.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_stale_entry_refetches() {
        let upstream = FakeUpstream::ok(json!({"status": "ok", "records": ["new"]}));
        let (proxy, _dir) = proxy_with(upstream.clone());
        let old_ts = current_timestamp_ms() - TTL.as_millis() as u64 - 1;
        proxy
            .store()
            .put(kerala_key(), CacheEntry::at(old_ts, json!({"records": ["old"]})))
            .await
            .unwrap();

        let result = proxy
            .get_district_data(&DistrictQuery::new("KERALA", "2024-2025"))
            .await
            .unwrap();

        assert_eq!(result.source, Source::Upstream);
        assert_eq!(result.payload["records"][0], "new");
        assert_eq!(upstream.calls(), 1);

        let stored = proxy.store().get(&kerala_key()).await.unwrap();
        assert!(stored.timestamp > old_ts);
        assert_eq!(stored.payload["records"][0], "new");
    }

    #[tokio::test]
    async fn test_validation_skips_store_and_upstream() {
        let upstream = FakeUpstream::ok(json!({"status": "ok"}));
        let (proxy, _dir) = proxy_with(upstream.clone());

        let result = proxy
            .get_district_data(&DistrictQuery::new("", "2024-2025"))
            .await;

        assert!(matches!(result, Err(ProxyError::Validation(_))));
        assert_eq!(upstream.calls(), 0);
        assert!(!proxy.store().path().exists());
    }

    #[tokio::test]
    async fn test_upstream_failure_leaves_store_unchanged() {
        let upstream = FakeUpstream::failing();
        let (proxy, _dir) = proxy_with(upstream.clone());
        let old_ts = current_timestamp_ms() - TTL.as_millis() as u64 - 1;
        proxy
            .store()
            .put(kerala_key(), CacheEntry::at(old_ts, json!({"records": ["old"]})))
            .await
            .unwrap();
        let before = proxy.store().load().await;

        let result = proxy
            .get_district_data(&DistrictQuery::new("KERALA", "2024-2025"))
            .await;

        assert!(matches!(result, Err(ProxyError::Upstream(_))));
        assert_eq!(proxy.store().load().await, before);
        assert_eq!(proxy.stats().await.upstream_failures, 1);
    }

    #[tokio::test]
    async fn test_error_status_body_is_cached() {
        let upstream = FakeUpstream::ok(json!({"status": "error", "message": "Invalid key"}));
        let (proxy, _dir) = proxy_with(upstream.clone());
        let query = DistrictQuery::new("KERALA", "2024-2025");

        let first = proxy.get_district_data(&query).await.unwrap();
        assert_eq!(first.source, Source::Upstream);
        assert_eq!(first.payload["status"], "error");

        let second = proxy.get_district_data(&query).await.unwrap();
        assert_eq!(second.source, Source::Cache);
        assert_eq!(upstream.calls(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_still_returns_payload() {
        let upstream = FakeUpstream::ok(json!({"status": "ok", "records": []}));
        let dir = TempDir::new().unwrap();
        // Parent directory does not exist, so every save fails
        let store = Arc::new(CacheStore::new(dir.path().join("missing").join("cache.json")));
        let proxy = FetchProxy::new(store, upstream.clone(), "KEY", TTL);

        let result = proxy
            .get_district_data(&DistrictQuery::new("KERALA", "2024-2025"))
            .await
            .unwrap();

        assert_eq!(result.source, Source::Upstream);
        assert_eq!(proxy.stats().await.store_failures, 1);
    }

    #[tokio::test]
    async fn test_distinct_pages_cached_separately() {
        let upstream = FakeUpstream::ok(json!({"status": "ok"}));
        let (proxy, _dir) = proxy_with(upstream.clone());

        proxy
            .get_district_data(&DistrictQuery::new("GOA", "2024-2025").with_page("0", "10"))
            .await
            .unwrap();
        proxy
            .get_district_data(&DistrictQuery::new("GOA", "2024-2025").with_page("10", "10"))
            .await
            .unwrap();

        assert_eq!(upstream.calls(), 2);
        assert_eq!(proxy.store().load().await.len(), 2);
    }

    #[tokio::test]
    async fn test_zero_ttl_always_fetches() {
        let upstream = FakeUpstream::ok(json!({"status": "ok"}));
        let dir = TempDir::new().unwrap();
        let store = Arc::new(CacheStore::new(dir.path().join("cache.json")));
        let proxy = FetchProxy::new(store, upstream.clone(), "KEY", Duration::ZERO);
        let query = DistrictQuery::new("GOA", "2024-2025");

        proxy.get_district_data(&query).await.unwrap();
        proxy.get_district_data(&query).await.unwrap();

        assert_eq!(upstream.calls(), 2);
    }
}
