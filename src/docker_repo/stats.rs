// Raw Docker stats API response to CounterSnapshot

use crate::models::CounterSnapshot;
use crate::runtime::{Result, RuntimeError};
use bollard::models::ContainerStatsResponse;

/// Convert one non-streaming stats read. Exposed for unit tests.
///
/// Cache is the cgroup v1 `cache` entry, or `inactive_file` on cgroup v2.
/// Missing memory stats read as zero; missing CPU stats are an error.
pub(crate) fn counter_snapshot(s: &ContainerStatsResponse, name: &str) -> Result<CounterSnapshot> {
    let cpu_stats = s
        .cpu_stats
        .as_ref()
        .ok_or_else(|| RuntimeError::Incomplete(name.to_string(), "cpu_stats"))?;
    let cpu_usage = cpu_stats.cpu_usage.as_ref();

    let online_units = cpu_stats
        .online_cpus
        .map(|n| n as u32)
        .or_else(|| {
            cpu_usage
                .and_then(|u| u.percpu_usage.as_ref())
                .map(|p| p.len() as u32)
        })
        .unwrap_or(0);

    let memory = s.memory_stats.as_ref();
    let memory_cache_bytes = memory
        .and_then(|m| m.stats.as_ref())
        .and_then(|st| st.get("cache").or_else(|| st.get("inactive_file")))
        .copied()
        .unwrap_or(0);

    Ok(CounterSnapshot {
        cpu_time_total: cpu_usage.and_then(|u| u.total_usage).unwrap_or(0),
        system_time_total: cpu_stats.system_cpu_usage.unwrap_or(0),
        online_units,
        memory_usage_bytes: memory.and_then(|m| m.usage).unwrap_or(0),
        memory_cache_bytes,
        memory_limit_bytes: memory.and_then(|m| m.limit).unwrap_or(0),
    })
}
