use ghl_insights::config::DashboardConfig;
use ghl_insights::metrics::{BundledMetricsSource, MetricsProvider};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) provider: Arc<MetricsProvider<BundledMetricsSource>>,
    /// Seed for chart A's synthetic filler, fixed for the process lifetime
    /// so every render of the same snapshot is identical.
    pub(crate) filler_seed: u64,
}

pub(crate) fn build_provider(
    config: &DashboardConfig,
) -> Arc<MetricsProvider<BundledMetricsSource>> {
    Arc::new(MetricsProvider::new(
        BundledMetricsSource,
        config.snapshot_ttl,
    ))
}

/// Uses the configured seed when present, otherwise draws one from OS
/// entropy and logs it so a render can be reproduced later.
pub(crate) fn resolve_filler_seed(configured: Option<u64>) -> u64 {
    match configured {
        Some(seed) => seed,
        None => {
            let seed: u64 = rand::random();
            info!(seed, "filler seed drawn from OS entropy");
            seed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_seed_wins_over_entropy() {
        assert_eq!(resolve_filler_seed(Some(7)), 7);
    }
}
