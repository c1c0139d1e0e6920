// Runtime-facing models: target identity and raw counters

use serde::{Deserialize, Serialize};

/// A monitored container as reported by the runtime at listing time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub id: String,
    /// Display name with the runtime's leading `/` stripped.
    pub name: String,
}

impl Target {
    /// Build from the runtime's id and first reported name (e.g. "/web").
    /// Falls back to the id when the runtime reports no name.
    pub fn new(id: impl Into<String>, raw_name: Option<&str>) -> Self {
        let id = id.into();
        let name = match raw_name.map(|n| n.trim_start_matches('/')) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => id.clone(),
        };
        Self { id, name }
    }
}

/// Point-in-time reading of cumulative CPU counters and current memory counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterSnapshot {
    /// Cumulative CPU time consumed by the container (ns).
    pub cpu_time_total: u64,
    /// Cumulative host CPU time (ns).
    pub system_time_total: u64,
    pub online_units: u32,
    pub memory_usage_bytes: u64,
    /// Reclaimable page cache counted inside `memory_usage_bytes`.
    pub memory_cache_bytes: u64,
    /// Zero when no limit is configured.
    pub memory_limit_bytes: u64,
}
