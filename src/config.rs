use serde::Deserialize;
use std::time::Duration;

use crate::collector::CollectorConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub docker: DockerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// Seconds between the two snapshots of each container.
    pub sample_interval_secs: u64,
    /// Seconds between the starts of two collection cycles.
    pub collect_period_secs: u64,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct DockerConfig {
    /// Lines returned by the logs endpoint.
    #[serde(default = "default_log_tail")]
    pub log_tail: u32,
    /// Grace period before SIGKILL on restart/stop.
    #[serde(default = "default_stop_timeout_secs")]
    pub stop_timeout_secs: u32,
}

fn default_log_tail() -> u32 {
    200
}

fn default_stop_timeout_secs() -> u32 {
    30
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            log_tail: default_log_tail(),
            stop_timeout_secs: default_stop_timeout_secs(),
        }
    }
}

impl MonitoringConfig {
    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            sample_interval: Duration::from_secs(self.sample_interval_secs),
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.server.host.is_empty(),
            "server.host must be non-empty"
        );
        anyhow::ensure!(
            self.monitoring.sample_interval_secs > 0,
            "monitoring.sample_interval_secs must be > 0, got {}",
            self.monitoring.sample_interval_secs
        );
        anyhow::ensure!(
            self.monitoring.collect_period_secs > 0,
            "monitoring.collect_period_secs must be > 0, got {}",
            self.monitoring.collect_period_secs
        );
        anyhow::ensure!(
            self.monitoring.fetch_timeout_secs > 0,
            "monitoring.fetch_timeout_secs must be > 0, got {}",
            self.monitoring.fetch_timeout_secs
        );
        anyhow::ensure!(
            self.docker.log_tail > 0,
            "docker.log_tail must be > 0, got {}",
            self.docker.log_tail
        );
        anyhow::ensure!(
            self.docker.stop_timeout_secs > 0 && self.docker.stop_timeout_secs <= i32::MAX as u32,
            "docker.stop_timeout_secs must be between 1 and {}, got {}",
            i32::MAX,
            self.docker.stop_timeout_secs
        );
        Ok(())
    }
}
