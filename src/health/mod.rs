// src/health/mod.rs
mod aggregator;
mod cache;
mod database;
mod messaging;
mod probe;
mod report;

pub use aggregator::HealthAggregator;
pub use cache::{CacheProbe, CACHE};
pub use database::{DatabaseProbe, DATABASE};
pub use messaging::{MessagingApiProbe, MESSAGING_API};
pub use probe::{DependencyProbe, ProbeError, ProbeResult};
pub use report::{ComponentStatus, HealthReport, OverallStatus};
