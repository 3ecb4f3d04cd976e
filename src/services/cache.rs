use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::core::error::ProviderError;
use crate::services::reward_central::RewardPointProvider;

/// Reward-point provider with an in-memory cache in front
///
/// Successful lookups are cached per (attraction, user) pair for the
/// configured TTL. Failures are never cached.
pub struct CachedPointProvider<P> {
    inner: P,
    cache: moka::future::Cache<(Uuid, Uuid), u32>,
}

impl<P: RewardPointProvider> CachedPointProvider<P> {
    /// Create a new caching wrapper
    pub fn new(inner: P, capacity: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, cache }
    }

    /// Number of cached entries
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Drop every cached point value
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

#[async_trait]
impl<P: RewardPointProvider> RewardPointProvider for CachedPointProvider<P> {
    async fn points_for(&self, attraction_id: Uuid, user_id: Uuid) -> Result<u32, ProviderError> {
        let key = (attraction_id, user_id);
        let entry = self
            .cache
            .entry(key)
            .or_try_insert_with(self.inner.points_for(attraction_id, user_id))
            .await
            .map_err(|e: Arc<ProviderError>| {
                // Concurrent waiters on the same key share one failure
                Arc::try_unwrap(e).unwrap_or_else(|shared| ProviderError::Unavailable(shared.to_string()))
            })?;

        if entry.is_fresh() {
            tracing::trace!("Point cache miss: {}:{}", attraction_id, user_id);
        } else {
            tracing::trace!("Point cache hit: {}:{}", attraction_id, user_id);
        }
        Ok(entry.into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl RewardPointProvider for CountingProvider {
        async fn points_for(&self, _attraction_id: Uuid, _user_id: Uuid) -> Result<u32, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ProviderError::Unavailable("down".to_string()))
            } else {
                Ok(7)
            }
        }
    }

    #[tokio::test]
    async fn test_repeat_lookup_is_cached() {
        let provider = CachedPointProvider::new(
            CountingProvider { calls: AtomicUsize::new(0), fail: false },
            100,
            60,
        );
        let attraction_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        assert_eq!(provider.points_for(attraction_id, user_id).await.unwrap(), 7);
        assert_eq!(provider.points_for(attraction_id, user_id).await.unwrap(), 7);
        assert_eq!(provider.inner.calls.load(Ordering::SeqCst), 1);

        provider.points_for(attraction_id, Uuid::new_v4()).await.unwrap();
        assert_eq!(provider.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_entry_count_and_invalidate_all() {
        let provider = CachedPointProvider::new(
            CountingProvider { calls: AtomicUsize::new(0), fail: false },
            100,
            60,
        );
        let attraction_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        provider.points_for(attraction_id, user_id).await.unwrap();
        provider.points_for(Uuid::new_v4(), user_id).await.unwrap();
        provider.cache.run_pending_tasks().await;
        assert_eq!(provider.entry_count(), 2);

        provider.invalidate_all();
        provider.cache.run_pending_tasks().await;
        assert_eq!(provider.entry_count(), 0);

        // Invalidated values are looked up again
        provider.points_for(attraction_id, user_id).await.unwrap();
        assert_eq!(provider.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let provider = CachedPointProvider::new(
            CountingProvider { calls: AtomicUsize::new(0), fail: true },
            100,
            60,
        );
        let attraction_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        assert!(provider.points_for(attraction_id, user_id).await.is_err());
        assert!(provider.points_for(attraction_id, user_id).await.is_err());
        assert_eq!(provider.inner.calls.load(Ordering::SeqCst), 2);
        provider.cache.run_pending_tasks().await;
        assert_eq!(provider.entry_count(), 0);
    }
}
