// src/health/database.rs
use super::probe::{DependencyProbe, ProbeError};
use async_trait::async_trait;
use sqlx::PgPool;
use std::time::Duration;

pub const DATABASE: &str = "database";

/// Runs `SELECT 1` through the application's long-lived pool.
///
/// The pool is owned by the application and injected here. Acquisition is
/// bounded by the pool's `acquire_timeout` and by the probe timeout.
pub struct DatabaseProbe {
    pool: PgPool,
    timeout: Duration,
}

impl DatabaseProbe {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl DependencyProbe for DatabaseProbe {
    fn name(&self) -> &'static str {
        DATABASE
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn probe(&self) -> Result<(), ProbeError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
