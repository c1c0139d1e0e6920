// Docker runtime via bollard: listing, counter snapshots, logs, lifecycle

mod stats;

use crate::config::DockerConfig;
use crate::models::{CounterSnapshot, Target};
use crate::runtime::{ContainerControl, Result, RuntimeError, StatsSource};
use async_trait::async_trait;
use bollard::Docker;
use bollard::query_parameters::{
    ListContainersOptions, LogsOptions, RestartContainerOptions, StatsOptions,
    StopContainerOptions,
};
use futures_util::StreamExt;
use std::collections::HashMap;
use tracing::instrument;

const STOP_SIGNAL: &str = "SIGTERM";
const VERSION_LABEL: &str = "version";

pub struct DockerRepo {
    docker: Docker,
    log_tail: u32,
    stop_timeout_secs: u32,
}

impl DockerRepo {
    /// Connects using `DOCKER_HOST` when set, else the local socket.
    pub fn connect(config: &DockerConfig) -> anyhow::Result<Self> {
        let docker = Docker::connect_with_local_defaults()?;
        Ok(Self {
            docker,
            log_tail: config.log_tail,
            stop_timeout_secs: config.stop_timeout_secs,
        })
    }

    fn stop_options(&self) -> (Option<String>, Option<i32>) {
        (
            Some(STOP_SIGNAL.to_string()),
            Some(self.stop_timeout_secs as i32),
        )
    }
}

/// Docker answers 404 for unknown containers and images.
fn classify(err: bollard::errors::Error, name: &str) -> RuntimeError {
    match err {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        } => RuntimeError::NotFound(name.to_string()),
        e => RuntimeError::Docker(e),
    }
}

/// Single read without waiting for the daemon to fill `precpu_stats`.
fn stats_options() -> StatsOptions {
    StatsOptions {
        stream: false,
        one_shot: true,
        ..Default::default()
    }
}

/// Decoded once so characters split across frames survive.
fn log_lines(raw: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(raw)
        .lines()
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl StatsSource for DockerRepo {
    #[instrument(skip(self), fields(repo = "docker", operation = "list_targets"))]
    async fn list_targets(&self) -> Result<Vec<Target>> {
        let mut filters = HashMap::new();
        filters.insert("status".to_string(), vec!["running".to_string()]);

        let filter = ListContainersOptions {
            all: false,
            filters: Some(filters),
            ..Default::default()
        };

        let containers = self.docker.list_containers(Some(filter)).await?;
        let targets = containers
            .iter()
            .filter_map(|c| {
                let id = c.id.as_deref()?;
                let name = c.names.as_ref().and_then(|n| n.first()).map(String::as_str);
                Some(Target::new(id, name))
            })
            .collect::<Vec<_>>();
        tracing::debug!(count = targets.len(), "List of containers has been retrieved");
        Ok(targets)
    }

    async fn fetch_snapshot(&self, target: &Target) -> Result<CounterSnapshot> {
        let mut stream = self.docker.stats(&target.id, Some(stats_options()));
        match stream.next().await {
            Some(Ok(s)) => stats::counter_snapshot(&s, &target.name),
            Some(Err(e)) => Err(classify(e, &target.name)),
            None => Err(RuntimeError::Incomplete(target.name.clone(), "stats payload")),
        }
    }
}

#[async_trait]
impl ContainerControl for DockerRepo {
    #[instrument(skip(self), fields(repo = "docker", operation = "container_logs"))]
    async fn container_logs(&self, name: &str) -> Result<Vec<String>> {
        let options = LogsOptions {
            stdout: true,
            stderr: true,
            tail: self.log_tail.to_string(),
            ..Default::default()
        };
        let mut stream = self.docker.logs(name, Some(options));

        let mut raw = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| classify(e, name))?;
            raw.extend_from_slice(&chunk.into_bytes());
        }
        Ok(log_lines(&raw))
    }

    #[instrument(skip(self), fields(repo = "docker", operation = "restart_container"))]
    async fn restart_container(&self, name: &str) -> Result<()> {
        let (signal, t) = self.stop_options();
        self.docker
            .restart_container(
                name,
                Some(RestartContainerOptions {
                    signal,
                    t,
                    ..Default::default()
                }),
            )
            .await
            .map_err(|e| classify(e, name))?;
        tracing::info!("{} container has been restarted", name);
        Ok(())
    }

    #[instrument(skip(self), fields(repo = "docker", operation = "stop_container"))]
    async fn stop_container(&self, name: &str) -> Result<()> {
        let (signal, t) = self.stop_options();
        self.docker
            .stop_container(
                name,
                Some(StopContainerOptions {
                    signal,
                    t,
                    ..Default::default()
                }),
            )
            .await
            .map_err(|e| classify(e, name))?;
        tracing::info!("{} container has been stopped", name);
        Ok(())
    }

    #[instrument(skip(self), fields(repo = "docker", operation = "image_version"))]
    async fn image_version(&self, image: &str) -> Result<String> {
        let inspect = self
            .docker
            .inspect_image(image)
            .await
            .map_err(|e| classify(e, image))?;
        let version = inspect
            .config
            .and_then(|c| c.labels)
            .and_then(|mut labels| labels.remove(VERSION_LABEL))
            .ok_or_else(|| RuntimeError::MissingLabel(image.to_string()))?;
        tracing::debug!("{} image version is {}", image, version);
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_options_request_one_shot_read() {
        let options = stats_options();
        assert!(!options.stream);
        assert!(options.one_shot);
    }

    #[test]
    fn log_lines_keeps_characters_split_across_frames() {
        let text = "démarrage ok\nprêt\n".as_bytes();
        let split = text.iter().position(|&b| b == 0xC3).unwrap() + 1;
        let mut raw = Vec::new();
        raw.extend_from_slice(&text[..split]);
        raw.extend_from_slice(&text[split..]);
        assert_eq!(log_lines(&raw), vec!["démarrage ok", "prêt"]);
    }

    #[test]
    fn log_lines_handles_crlf_and_missing_trailing_newline() {
        assert_eq!(log_lines(b"a\r\nb"), vec!["a", "b"]);
        assert!(log_lines(b"").is_empty());
    }
}
