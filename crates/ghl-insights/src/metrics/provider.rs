use super::source::MetricsSource;
use super::{MetricsError, MetricsSnapshot};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Cached access to a [`MetricsSource`].
///
/// Constructed once at process start and shared by reference; there is no
/// global singleton. While a cached snapshot is younger than the TTL every
/// call returns the same `Arc`; on expiry or cold start the source is asked
/// again and the result is validated and sanitized before it is cached.
/// A zero TTL disables caching entirely.
pub struct MetricsProvider<S: MetricsSource> {
    source: S,
    ttl: Duration,
    cache: Mutex<Option<CachedSnapshot>>,
}

struct CachedSnapshot {
    snapshot: Arc<MetricsSnapshot>,
    loaded_at: Instant,
}

impl<S: MetricsSource> MetricsProvider<S> {
    /// Matches the 30-minute memoization window of the original dashboard.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(1800);

    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            cache: Mutex::new(None),
        }
    }

    pub fn with_default_ttl(source: S) -> Self {
        Self::new(source, Self::DEFAULT_TTL)
    }

    /// Name of the underlying source, for logs and error banners.
    pub fn source_name(&self) -> &str {
        self.source.describe()
    }

    /// Returns the current snapshot, reloading from the source when the
    /// cached copy has expired. Load and validation failures propagate so
    /// the caller can render an error banner instead of stale or bad data.
    pub fn snapshot(&self) -> Result<Arc<MetricsSnapshot>, MetricsError> {
        let mut cache = self.cache.lock().expect("snapshot cache mutex poisoned");

        if let Some(cached) = cache.as_ref() {
            if !self.ttl.is_zero() && cached.loaded_at.elapsed() < self.ttl {
                debug!(source = self.source.describe(), "serving cached snapshot");
                return Ok(Arc::clone(&cached.snapshot));
            }
        }

        let snapshot = self.source.load()?.sanitized();
        snapshot.validate()?;
        info!(
            source = self.source.describe(),
            generated_at = %snapshot.generated_at,
            "metrics snapshot refreshed"
        );

        let snapshot = Arc::new(snapshot);
        *cache = Some(CachedSnapshot {
            snapshot: Arc::clone(&snapshot),
            loaded_at: Instant::now(),
        });
        Ok(snapshot)
    }
}
