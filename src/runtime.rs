// Seams between the sampling core and the container runtime

use crate::models::{CounterSnapshot, Target};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("docker api: {0}")]
    Docker(#[from] bollard::errors::Error),
    #[error("container {0} not found")]
    NotFound(String),
    #[error("stats for {0} missing {1}")]
    Incomplete(String, &'static str),
    #[error("image {0} has no version label")]
    MissingLabel(String),
    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Source of targets and their raw counters.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Running containers at the time of the call.
    async fn list_targets(&self) -> Result<Vec<Target>>;

    /// One non-streaming counter read for `target`.
    async fn fetch_snapshot(&self, target: &Target) -> Result<CounterSnapshot>;
}

/// Lifecycle, log and image operations exposed over HTTP.
#[async_trait]
pub trait ContainerControl: StatsSource {
    /// Tail of stdout and stderr, one entry per line.
    async fn container_logs(&self, name: &str) -> Result<Vec<String>>;

    async fn restart_container(&self, name: &str) -> Result<()>;

    async fn stop_container(&self, name: &str) -> Result<()>;

    /// Value of the `version` label on the image config.
    async fn image_version(&self, image: &str) -> Result<String>;
}
