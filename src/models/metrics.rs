// Per-target utilization results and the aggregate keyed by display name

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Outcome of sampling one target for one cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricResult {
    Sample { cpu: f64, mem: f64 },
    Failed { reason: String },
}

impl MetricResult {
    pub fn failed(reason: impl ToString) -> Self {
        MetricResult::Failed {
            reason: reason.to_string(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, MetricResult::Failed { .. })
    }
}

/// Wire form: `{"cpu": .., "mem": ..}` or `{"error": 1.0, "reason": ".."}`.
impl Serialize for MetricResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetricResult::Sample { cpu, mem } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("cpu", cpu)?;
                map.serialize_entry("mem", mem)?;
                map.end()
            }
            MetricResult::Failed { reason } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("error", &1.0_f64)?;
                map.serialize_entry("reason", reason)?;
                map.end()
            }
        }
    }
}

/// Latest result for every target listed at the start of a cycle.
pub type Aggregate = BTreeMap<String, MetricResult>;
