// src/health/report.rs
use serde::Serialize;

/// Binary overall status; there is no separate "down" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Ok,
    Partial,
}

/// Reachability of each configured dependency. The field set is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentStatus {
    pub database: bool,
    pub redis: bool,
    pub api: bool,
}

impl ComponentStatus {
    pub fn all_reachable(&self) -> bool {
        self.database && self.redis && self.api
    }
}

/// Aggregate result of one health check round.
///
/// Only constructible through [`HealthReport::new`], which derives `overall`
/// from the components, so `overall == Ok` exactly when every component is
/// reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    #[serde(rename = "health")]
    overall: OverallStatus,
    #[serde(rename = "status")]
    components: ComponentStatus,
}

impl HealthReport {
    pub fn new(components: ComponentStatus) -> Self {
        let overall = if components.all_reachable() {
            OverallStatus::Ok
        } else {
            OverallStatus::Partial
        };
        Self { overall, components }
    }

    pub fn overall(&self) -> OverallStatus {
        self.overall
    }

    pub fn components(&self) -> ComponentStatus {
        self.components
    }

    pub fn is_ok(&self) -> bool {
        self.overall == OverallStatus::Ok
    }
}
