//! Process-local TTL cache for upstream responses.
//!
//! Each entry carries an absolute deadline fixed when it is stored. A lookup
//! at or past the deadline is a miss and the caller's fetch runs again,
//! overwriting the entry. Nothing is ever refreshed in place.
//!
//! Concurrent misses on the same key may both reach upstream; the last write
//! wins.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

struct CacheEntry<V> {
    value: V,
    /// `None` when `now + ttl` does not fit in an `Instant`: never expires.
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| now < deadline)
    }
}

/// Thread-safe string-keyed cache with per-insert expiration.
pub struct TtlCache<V> {
    inner: Arc<RwLock<HashMap<String, CacheEntry<V>>>>,
}

impl<V> Clone for TtlCache<V> {
    fn clone(&self) -> Self {
        TtlCache {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        TtlCache {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Cached value for `key` if it has not expired.
    pub async fn get(&self, key: &str) -> Option<V> {
        let inner = self.inner.read().await;
        inner
            .get(key)
            .filter(|entry| entry.is_live(Instant::now()))
            .map(|entry| entry.value.clone())
    }

    /// Store `value` under `key` until `now + ttl`, replacing any previous entry.
    pub async fn insert(&self, key: &str, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now().checked_add(ttl),
        };
        self.inner.write().await.insert(key.to_string(), entry);
    }

    /// Return the live entry for `key`, or run `fetch` and cache its result.
    ///
    /// Errors from `fetch` are passed through and leave the cache untouched.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, ttl: Duration, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key).await {
            debug!("Cache hit: {}", key);
            return Ok(value);
        }

        debug!("Cache miss: {} (ttl={:?})", key, ttl);
        // The lock is not held across the fetch.
        let value = fetch().await?;
        self.insert(key, value.clone(), ttl).await;
        Ok(value)
    }

    /// Drop every expired entry. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut inner = self.inner.write().await;
        let before = inner.len();
        inner.retain(|_, entry| entry.is_live(now));
        before - inner.len()
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: Duration = Duration::from_secs(60);

    async fn fetch_counted(
        cache: &TtlCache<String>,
        key: &str,
        calls: &AtomicUsize,
    ) -> Result<String, String> {
        cache
            .get_or_fetch(key, TTL, || async {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                Ok::<_, String>(format!("{}#{}", key, n))
            })
            .await
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_fetch_within_ttl_is_cached() {
        let cache = TtlCache::new();
        let calls = AtomicUsize::new(0);

        let first = fetch_counted(&cache, "standings_PL", &calls).await.unwrap();
        tokio::time::advance(Duration::from_secs(59)).await;
        let second = fetch_counted(&cache, "standings_PL", &calls).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_after_expiry_goes_upstream_again() {
        let cache = TtlCache::new();
        let calls = AtomicUsize::new(0);

        fetch_counted(&cache, "standings_PL", &calls).await.unwrap();
        tokio::time::advance(TTL).await;
        let refreshed = fetch_counted(&cache, "standings_PL", &calls).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(refreshed, "standings_PL#2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_never_returned() {
        let cache = TtlCache::new();
        cache.insert("k", 1u32, Duration::from_secs(5)).await;
        assert_eq!(cache.get("k").await, Some(1));

        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let cache: TtlCache<u32> = TtlCache::new();
        let calls = AtomicUsize::new(0);

        let err = cache
            .get_or_fetch("matches_PL", TTL, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>("upstream down")
            })
            .await
            .unwrap_err();
        assert_eq!(err, "upstream down");
        assert_eq!(cache.len().await, 0);

        let value = cache
            .get_or_fetch("matches_PL", TTL, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, &str>(7)
            })
            .await
            .unwrap();
        assert_eq!(value, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let cache = TtlCache::new();
        let calls = AtomicUsize::new(0);

        let pl = fetch_counted(&cache, "standings_PL", &calls).await.unwrap();
        let bl = fetch_counted(&cache, "standings_BL1", &calls).await.unwrap();

        assert_ne!(pl, bl);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired_keeps_live_entries() {
        let cache = TtlCache::new();
        cache.insert("short", 1u32, Duration::from_secs(10)).await;
        cache.insert("long", 2u32, Duration::from_secs(100)).await;

        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("long").await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unrepresentable_ttl_never_expires() {
        let cache = TtlCache::new();
        cache.insert("k", 1u32, Duration::MAX).await;

        tokio::time::advance(Duration::from_secs(10 * 365 * 24 * 60 * 60)).await;
        assert_eq!(cache.get("k").await, Some(1));
        assert_eq!(cache.purge_expired().await, 0);
    }
}
