// Two-point sampling of a single target

use crate::calculator::{cpu_percent, mem_percent};
use crate::models::{CounterSnapshot, MetricResult, Target};
use crate::runtime::{self, RuntimeError, StatsSource};
use std::sync::Arc;
use tokio::time::{Duration, sleep, timeout};

/// Fetch, wait `interval`, fetch again, then compute CPU and memory percentages.
///
/// Every failure resolves to [`MetricResult::Failed`]; the first fetch failing
/// skips the wait.
pub async fn sample_target(
    source: Arc<dyn StatsSource>,
    target: Target,
    interval: Duration,
    fetch_timeout: Duration,
) -> (String, MetricResult) {
    let result = match sample(source.as_ref(), &target, interval, fetch_timeout).await {
        Ok(result) => result,
        Err(e) => {
            tracing::debug!(
                container = %target.name,
                error = %e,
                operation = "fetch_snapshot",
                "sampling failed"
            );
            MetricResult::failed(e)
        }
    };
    (target.name, result)
}

async fn sample(
    source: &dyn StatsSource,
    target: &Target,
    interval: Duration,
    fetch_timeout: Duration,
) -> runtime::Result<MetricResult> {
    let previous = fetch(source, target, fetch_timeout).await?;
    sleep(interval).await;
    let current = fetch(source, target, fetch_timeout).await?;
    Ok(MetricResult::Sample {
        cpu: cpu_percent(&previous, &current),
        mem: mem_percent(&current),
    })
}

async fn fetch(
    source: &dyn StatsSource,
    target: &Target,
    fetch_timeout: Duration,
) -> runtime::Result<CounterSnapshot> {
    timeout(fetch_timeout, source.fetch_snapshot(target))
        .await
        .map_err(|_| RuntimeError::Timeout(fetch_timeout))?
}
