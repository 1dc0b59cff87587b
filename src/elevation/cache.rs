use crate::models::coordinate::CacheKey;
use moka::future::Cache;

/// Session cache of resolved elevations, in whole meters.
///
/// Built without a capacity bound: keys are ~10 m cells visited by one
/// pointer, so the key space stays small and entries are never evicted.
#[derive(Clone)]
pub struct ElevationCache {
    inner: Cache<CacheKey, i32>,
}

impl ElevationCache {
    pub fn new() -> Self {
        ElevationCache {
            inner: Cache::builder().name("elevation").build(),
        }
    }

    pub async fn get(&self, key: CacheKey) -> Option<i32> {
        self.inner.get(&key).await
    }

    pub async fn insert(&self, key: CacheKey, meters: i32) {
        self.inner.insert(key, meters).await;
    }

    /// Number of cells resolved so far.
    pub async fn entry_count(&self) -> u64 {
        // moka counts lazily
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}

impl Default for ElevationCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::coordinate::CoordinateSample;

    #[tokio::test]
    async fn test_insert_then_get_by_neighbouring_sample() {
        let cache = ElevationCache::new();
        cache
            .insert(CoordinateSample::new(46.5581, 7.8359).cache_key(), 1034)
            .await;

        let hit = cache
            .get(CoordinateSample::new(46.55812, 7.83588).cache_key())
            .await;
        assert_eq!(hit, Some(1034));

        let miss = cache
            .get(CoordinateSample::new(46.5583, 7.8359).cache_key())
            .await;
        assert_eq!(miss, None);
    }

    #[tokio::test]
    async fn test_entry_count_counts_cells_not_samples() {
        let cache = ElevationCache::new();
        cache.insert(CoordinateSample::new(0.0, 0.0).cache_key(), -3).await;
        cache.insert(CoordinateSample::new(0.00001, 0.0).cache_key(), -3).await;
        cache.insert(CoordinateSample::new(1.0, 0.0).cache_key(), 12).await;
        assert_eq!(cache.entry_count().await, 2);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = ElevationCache::new();
        let other = cache.clone();
        let key = CoordinateSample::new(10.0, 20.0).cache_key();
        other.insert(key, 250).await;
        assert_eq!(cache.get(key).await, Some(250));
    }
}
