// src/health/probe.rs
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error};

/// Why a single dependency check failed. Never leaves the probe boundary:
/// [`DependencyProbe::check`] turns it into `reachable = false`.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("unexpected PING reply: {0}")]
    UnexpectedPingReply(String),

    #[error("http error: {0}")]
    Http(String),

    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("misconfigured: {0}")]
    Config(String),
}

/// Outcome of one dependency check, built fresh per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    pub name: &'static str,
    pub reachable: bool,
}

impl ProbeResult {
    pub fn reachable(name: &'static str) -> Self {
        Self { name, reachable: true }
    }

    pub fn unreachable(name: &'static str) -> Self {
        Self { name, reachable: false }
    }
}

#[async_trait]
pub trait DependencyProbe: Send + Sync {
    /// Name used in logs and as the key in the health report.
    fn name(&self) -> &'static str;

    /// Upper bound for a single [`probe`](Self::probe) call.
    fn timeout(&self) -> Duration;

    /// The one cheap, idempotent operation that proves reachability.
    async fn probe(&self) -> Result<(), ProbeError>;

    /// Render an error for the log line. Probes holding secrets override
    /// this to scrub them.
    fn describe_error(&self, err: &ProbeError) -> String {
        err.to_string()
    }

    /// Run the probe under its timeout and fold every failure into `false`.
    async fn check(&self) -> ProbeResult {
        let limit = self.timeout();
        let outcome = match timeout(limit, self.probe()).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::Timeout(limit)),
        };

        match outcome {
            Ok(()) => {
                debug!(dependency = self.name(), "health check passed");
                ProbeResult::reachable(self.name())
            }
            Err(err) => {
                error!(
                    dependency = self.name(),
                    error = %self.describe_error(&err),
                    "health check failed"
                );
                ProbeResult::unreachable(self.name())
            }
        }
    }
}
