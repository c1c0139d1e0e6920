// Background collection worker: one cycle per period until shutdown.

use crate::collector::Collector;
use std::sync::Arc;
use tokio::time::{Duration, interval};

/// Worker timing config.
pub struct WorkerConfig {
    /// Seconds between cycle starts; a cycle longer than this skips the missed ticks.
    pub collect_period_secs: u64,
}

pub fn spawn(
    collector: Arc<Collector>,
    config: WorkerConfig,
    mut shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    let WorkerConfig {
        collect_period_secs,
    } = config;

    tokio::spawn(async move {
        let mut tick = interval(Duration::from_secs(collect_period_secs));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut cycles_total: u64 = 0;

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    match collector.run_cycle().await {
                        Ok(report) => {
                            cycles_total += 1;
                            if report.failed > 0 {
                                tracing::info!(
                                    targets = report.targets,
                                    failed = report.failed,
                                    "collection cycle finished with failed containers"
                                );
                            }
                        }
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                operation = "list_targets",
                                "collection cycle aborted; keeping previous stats"
                            );
                        }
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!(cycles_total, "Worker shutting down");
                    break;
                }
            }
        }
    })
}
