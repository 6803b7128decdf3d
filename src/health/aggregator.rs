// src/health/aggregator.rs
use super::probe::{DependencyProbe, ProbeResult};
use super::report::{ComponentStatus, HealthReport};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Fans out to the three dependency probes and folds their results into a
/// [`HealthReport`].
#[derive(Clone)]
pub struct HealthAggregator {
    database: Arc<dyn DependencyProbe>,
    cache: Arc<dyn DependencyProbe>,
    messaging: Arc<dyn DependencyProbe>,
}

impl HealthAggregator {
    pub fn new(
        database: Arc<dyn DependencyProbe>,
        cache: Arc<dyn DependencyProbe>,
        messaging: Arc<dyn DependencyProbe>,
    ) -> Self {
        Self {
            database,
            cache,
            messaging,
        }
    }

    /// Run every probe concurrently and wait for all of them. Infallible.
    pub async fn aggregate(&self) -> HealthReport {
        let (database, cache, messaging) = futures::future::join3(
            spawn_check(self.database.clone()),
            spawn_check(self.cache.clone()),
            spawn_check(self.messaging.clone()),
        )
        .await;

        let report = HealthReport::new(ComponentStatus {
            database: settle(database, self.database.name()).reachable,
            redis: settle(cache, self.cache.name()).reachable,
            api: settle(messaging, self.messaging.name()).reachable,
        });

        info!(
            overall = ?report.overall(),
            database = report.components().database,
            redis = report.components().redis,
            api = report.components().api,
            "Health check complete"
        );

        report
    }
}

fn spawn_check(probe: Arc<dyn DependencyProbe>) -> JoinHandle<ProbeResult> {
    tokio::spawn(async move { probe.check().await })
}

/// A probe task that panicked or was cancelled counts as unreachable.
fn settle(
    joined: Result<ProbeResult, tokio::task::JoinError>,
    name: &'static str,
) -> ProbeResult {
    joined.unwrap_or_else(|e| {
        error!(dependency = name, error = %e, "health check task failed");
        ProbeResult::unreachable(name)
    })
}
