// Collection cycle: fan out one sampler per target, install the complete aggregate

mod sampler;

pub use sampler::sample_target;

use crate::models::{Aggregate, MetricResult};
use crate::runtime::{self, StatsSource};
use crate::store::AggregateStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::{Duration, Instant};
use tracing::instrument;

/// Timing shared by every sampler of a cycle; fixed at startup.
#[derive(Debug, Clone, Copy)]
pub struct CollectorConfig {
    /// Gap between the two snapshots of a target.
    pub sample_interval: Duration,
    /// Upper bound for a single snapshot fetch.
    pub fetch_timeout: Duration,
}

/// Summary of one finished cycle, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub targets: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

pub struct Collector {
    source: Arc<dyn StatsSource>,
    store: Arc<AggregateStore>,
    config: CollectorConfig,
}

impl Collector {
    pub fn new(
        source: Arc<dyn StatsSource>,
        store: Arc<AggregateStore>,
        config: CollectorConfig,
    ) -> Self {
        Self {
            source,
            store,
            config,
        }
    }

    /// Samples every running target concurrently and replaces the stored aggregate.
    ///
    /// A listing failure returns early and leaves the store untouched. Per-target
    /// failures, including a panicked sampler, occupy their key with
    /// [`MetricResult::Failed`].
    #[instrument(skip(self), fields(operation = "run_cycle"))]
    pub async fn run_cycle(&self) -> runtime::Result<CycleReport> {
        let started = Instant::now();
        tracing::debug!("Start collecting container stats");

        let targets = self.source.list_targets().await?;
        let count = targets.len();

        let mut samplers = JoinSet::new();
        let mut names = HashMap::with_capacity(count);
        for target in targets {
            let name = target.name.clone();
            let handle = samplers.spawn(sample_target(
                self.source.clone(),
                target,
                self.config.sample_interval,
                self.config.fetch_timeout,
            ));
            names.insert(handle.id(), name);
        }

        let mut aggregate = Aggregate::new();
        while let Some(joined) = samplers.join_next_with_id().await {
            match joined {
                Ok((id, (name, result))) => {
                    names.remove(&id);
                    aggregate.insert(name, result);
                }
                Err(e) => {
                    let Some(name) = names.remove(&e.id()) else {
                        continue;
                    };
                    tracing::warn!(container = %name, error = %e, "sampler task failed");
                    aggregate.insert(name, MetricResult::failed(e));
                }
            }
        }

        let failed = aggregate.values().filter(|r| r.is_failed()).count();
        self.store.replace(aggregate);

        let report = CycleReport {
            targets: count,
            failed,
            elapsed: started.elapsed(),
        };
        tracing::debug!(
            targets = report.targets,
            failed = report.failed,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "End of the container stats collection"
        );
        Ok(report)
    }
}
