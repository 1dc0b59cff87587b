use crate::models::coordinate::CacheKey;
use async_trait::async_trait;

#[async_trait]
pub trait ElevationSource: Send + Sync {
    /// Raw elevation in meters at the (already rounded) coordinate.
    async fn fetch_elevation(&self, key: CacheKey) -> anyhow::Result<f64>;
}
