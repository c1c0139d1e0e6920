// Shared test helpers: in-memory container runtime

#![allow(dead_code)]

use async_trait::async_trait;
use ctrstats::models::{CounterSnapshot, Target};
use ctrstats::runtime::{ContainerControl, Result, RuntimeError, StatsSource};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tokio::time::Duration;

/// Scripted runtime. Each target serves its first snapshot on the first fetch
/// and its second snapshot on every later fetch.
#[derive(Default)]
pub struct FakeRuntime {
    targets: Vec<Target>,
    snapshots: HashMap<String, (CounterSnapshot, CounterSnapshot)>,
    fail_first: HashSet<String>,
    fail_second: HashSet<String>,
    hang: HashSet<String>,
    panic_on_fetch: HashSet<String>,
    latency: Duration,
    list_fails: bool,
    slow_first_listing: Duration,
    listings: Mutex<usize>,
    fetches: Mutex<HashMap<String, usize>>,
    logs: HashMap<String, Vec<String>>,
    labels: HashMap<String, String>,
    pub lifecycle: Mutex<Vec<String>>,
}

pub fn web_snapshots() -> (CounterSnapshot, CounterSnapshot) {
    (
        CounterSnapshot {
            cpu_time_total: 100,
            system_time_total: 1000,
            online_units: 2,
            memory_usage_bytes: 60,
            memory_cache_bytes: 5,
            memory_limit_bytes: 100,
        },
        CounterSnapshot {
            cpu_time_total: 150,
            system_time_total: 1100,
            online_units: 2,
            memory_usage_bytes: 80,
            memory_cache_bytes: 10,
            memory_limit_bytes: 100,
        },
    )
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a target named `name` (id `id-<name>`) reporting the `web` counters.
    pub fn with_target(self, name: &str) -> Self {
        self.with_snapshots(name, web_snapshots())
    }

    pub fn with_snapshots(
        mut self,
        name: &str,
        snapshots: (CounterSnapshot, CounterSnapshot),
    ) -> Self {
        let raw_name = format!("/{name}");
        let target = Target::new(format!("id-{name}"), Some(raw_name.as_str()));
        self.snapshots.insert(target.id.clone(), snapshots);
        self.targets.push(target);
        self
    }

    pub fn failing_first(mut self, name: &str) -> Self {
        self = self.with_target(name);
        self.fail_first.insert(format!("id-{name}"));
        self
    }

    pub fn failing_second(mut self, name: &str) -> Self {
        self = self.with_target(name);
        self.fail_second.insert(format!("id-{name}"));
        self
    }

    pub fn hanging(mut self, name: &str) -> Self {
        self = self.with_target(name);
        self.hang.insert(format!("id-{name}"));
        self
    }

    pub fn panicking(mut self, name: &str) -> Self {
        self = self.with_target(name);
        self.panic_on_fetch.insert(format!("id-{name}"));
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_list_failure(mut self) -> Self {
        self.list_fails = true;
        self
    }

    /// The first `list_targets` call takes `delay`; later calls return at once.
    pub fn with_slow_first_listing(mut self, delay: Duration) -> Self {
        self.slow_first_listing = delay;
        self
    }

    pub fn listing_count(&self) -> usize {
        *self.listings.lock().unwrap()
    }

    pub fn with_logs(mut self, name: &str, lines: &[&str]) -> Self {
        self.logs
            .insert(name.to_string(), lines.iter().map(|l| l.to_string()).collect());
        self
    }

    pub fn with_version_label(mut self, image: &str, version: &str) -> Self {
        self.labels.insert(image.to_string(), version.to_string());
        self
    }

    pub fn fetch_count(&self, name: &str) -> usize {
        let fetches = self.fetches.lock().unwrap();
        fetches.get(&format!("id-{name}")).copied().unwrap_or(0)
    }

    fn known(&self, name: &str) -> Result<()> {
        if self.targets.iter().any(|t| t.name == name) {
            Ok(())
        } else {
            Err(RuntimeError::NotFound(name.to_string()))
        }
    }
}

#[async_trait]
impl StatsSource for FakeRuntime {
    async fn list_targets(&self) -> Result<Vec<Target>> {
        let call = {
            let mut listings = self.listings.lock().unwrap();
            *listings += 1;
            *listings
        };
        if call == 1 && !self.slow_first_listing.is_zero() {
            tokio::time::sleep(self.slow_first_listing).await;
        }
        if self.list_fails {
            return Err(RuntimeError::Incomplete("daemon".into(), "container list"));
        }
        Ok(self.targets.clone())
    }

    async fn fetch_snapshot(&self, target: &Target) -> Result<CounterSnapshot> {
        let call = {
            let mut fetches = self.fetches.lock().unwrap();
            let n = fetches.entry(target.id.clone()).or_insert(0);
            *n += 1;
            *n
        };
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.panic_on_fetch.contains(&target.id) {
            panic!("fake runtime panicked for {}", target.name);
        }
        if self.hang.contains(&target.id) {
            std::future::pending::<()>().await;
        }
        if (call == 1 && self.fail_first.contains(&target.id))
            || (call > 1 && self.fail_second.contains(&target.id))
        {
            return Err(RuntimeError::NotFound(target.name.clone()));
        }
        let (first, second) = self
            .snapshots
            .get(&target.id)
            .copied()
            .unwrap_or_default();
        Ok(if call == 1 { first } else { second })
    }
}

#[async_trait]
impl ContainerControl for FakeRuntime {
    async fn container_logs(&self, name: &str) -> Result<Vec<String>> {
        self.logs
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::NotFound(name.to_string()))
    }

    async fn restart_container(&self, name: &str) -> Result<()> {
        self.known(name)?;
        self.lifecycle.lock().unwrap().push(format!("restart {name}"));
        Ok(())
    }

    async fn stop_container(&self, name: &str) -> Result<()> {
        self.known(name)?;
        self.lifecycle.lock().unwrap().push(format!("stop {name}"));
        Ok(())
    }

    async fn image_version(&self, image: &str) -> Result<String> {
        self.labels
            .get(image)
            .cloned()
            .ok_or_else(|| RuntimeError::MissingLabel(image.to_string()))
    }
}
