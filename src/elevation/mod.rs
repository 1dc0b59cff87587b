pub mod cache;
pub mod debounce;
pub mod http;
pub mod readout;

use crate::models::coordinate::{CacheKey, CoordinateSample};
use crate::traits::ElevationSource;
use cache::ElevationCache;
use debounce::{Action, Debouncer};
use futures::FutureExt;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupFailure {
    Unavailable,
}

/// Serializes as `{"elevation": 1234}` or `{"error": "unavailable"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElevationResult {
    Elevation(i32),
    Error(LookupFailure),
}

impl ElevationResult {
    pub fn unavailable() -> Self {
        ElevationResult::Error(LookupFailure::Unavailable)
    }

    pub fn meters(&self) -> Option<i32> {
        match self {
            ElevationResult::Elevation(m) => Some(*m),
            ElevationResult::Error(_) => None,
        }
    }
}

/// A result together with the cell it was resolved for.
///
/// A debounced caller can receive the reading fetched for a later pointer
/// position, so the coordinate travels with the value and is what gets
/// displayed. Serializes as `{"lat": 47.1235, "lng": 8.1235, "elevation": 1234}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElevationReading {
    #[serde(flatten)]
    pub at: CoordinateSample,
    #[serde(flatten)]
    pub result: ElevationResult,
}

impl ElevationReading {
    fn resolved(key: CacheKey, meters: i32) -> Self {
        ElevationReading {
            at: key.sample(),
            result: ElevationResult::Elevation(meters),
        }
    }

    fn unavailable(key: CacheKey) -> Self {
        ElevationReading {
            at: key.sample(),
            result: ElevationResult::unavailable(),
        }
    }
}

/// Cached, debounced elevation lookups against a remote source.
pub struct ElevationLookup {
    cache: ElevationCache,
    debouncer: Debouncer<CoordinateSample, ElevationReading>,
}

impl ElevationLookup {
    pub fn new(source: Arc<dyn ElevationSource>, quiet: Duration) -> Self {
        let cache = ElevationCache::new();
        let resolver_cache = cache.clone();
        let action: Action<CoordinateSample, ElevationReading> = Arc::new(move |coord| {
            let source = Arc::clone(&source);
            let cache = resolver_cache.clone();
            async move { resolve(&*source, &cache, coord).await }.boxed()
        });

        ElevationLookup {
            cache,
            debouncer: Debouncer::new(quiet, action),
        }
    }

    /// Cache hits resolve immediately; misses join the debounce window and
    /// resolve with the reading fetched for the window's last coordinate.
    pub async fn lookup(&self, coord: CoordinateSample) -> ElevationReading {
        let key = coord.cache_key();
        if let Some(meters) = self.cache.get(key).await {
            trace!(%key, meters, "elevation cache hit");
            return ElevationReading::resolved(key, meters);
        }

        match self.debouncer.call(coord).await {
            Ok(reading) => reading,
            Err(_) => ElevationReading::unavailable(key),
        }
    }

    pub fn cache(&self) -> &ElevationCache {
        &self.cache
    }

    pub fn debounce_period(&self) -> Duration {
        self.debouncer.quiet_period()
    }

    /// Requests actually sent upstream so far.
    pub fn requests_issued(&self) -> u64 {
        self.debouncer.fired()
    }
}

async fn resolve(
    source: &dyn ElevationSource,
    cache: &ElevationCache,
    coord: CoordinateSample,
) -> ElevationReading {
    let key = coord.cache_key();
    // The cell may have been filled while this window was pending.
    if let Some(meters) = cache.get(key).await {
        return ElevationReading::resolved(key, meters);
    }

    match source.fetch_elevation(key).await {
        Ok(raw) if raw.is_finite() => {
            let meters = raw.round() as i32;
            cache.insert(key, meters).await;
            debug!(%key, meters, "elevation resolved");
            ElevationReading::resolved(key, meters)
        }
        Ok(raw) => {
            warn!(%key, raw, "elevation API returned a non-finite value");
            ElevationReading::unavailable(key)
        }
        Err(e) => {
            warn!(%key, error = %e, "elevation lookup failed");
            ElevationReading::unavailable(key)
        }
    }
}
