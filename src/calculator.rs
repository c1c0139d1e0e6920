// Counter deltas to utilization percentages (no I/O)

use crate::models::CounterSnapshot;

/// CPU utilization between two snapshots of the same container.
///
/// Returns 0.0 when the host counter did not advance (stall or reset) or the
/// runtime reports no online CPUs.
pub fn cpu_percent(previous: &CounterSnapshot, current: &CounterSnapshot) -> f64 {
    let cpu_delta = current.cpu_time_total as i128 - previous.cpu_time_total as i128;
    let system_delta = current.system_time_total as i128 - previous.system_time_total as i128;
    let online = current.online_units as f64;

    if system_delta <= 0 || online <= 0.0 {
        return 0.0;
    }
    (cpu_delta as f64 / system_delta as f64) * online * 100.0
}

/// Memory utilization of one snapshot, with page cache excluded from usage.
///
/// Cache larger than usage yields a negative percentage; it is not clamped.
pub fn mem_percent(current: &CounterSnapshot) -> f64 {
    let usage = current.memory_usage_bytes as i128 - current.memory_cache_bytes as i128;
    if current.memory_limit_bytes == 0 {
        return 0.0;
    }
    (usage as f64 / current.memory_limit_bytes as f64) * 100.0
}
