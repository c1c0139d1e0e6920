// Domain models: raw counter snapshots in, utilization results out

mod metrics;
mod snapshot;

pub use metrics::{Aggregate, MetricResult};
pub use snapshot::{CounterSnapshot, Target};
