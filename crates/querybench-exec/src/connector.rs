//! Caller-facing API over the containerized query client.
//!
//! All failure modes collapse to `success = false` plus an empty result
//! set; stderr detail goes to the log. An empty set with `success = true`
//! means the query legitimately returned zero rows.

use crate::runner::ProcessRunner;
use querybench_core::{QuerybenchError, ResultSet};
use querybench_decode::{delimited, jsonlines};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Container runtime binary, e.g. `docker`.
    pub runtime: String,
    /// Name of the engine container.
    pub container: String,
    /// Query client binary inside the container.
    pub client_program: String,
    /// Fixed flags the client always receives.
    pub client_args: Vec<String>,
    /// Output format requested first.
    pub primary_format: String,
    /// Simpler tabular format used when the primary decode comes up empty.
    pub fallback_format: String,
    pub fallback_delimiter: char,
    /// Timeout for connection probes and runtime administrivia.
    pub connect_timeout: Duration,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            runtime: "docker".into(),
            container: "firebolt-core".into(),
            client_program: "fb".into(),
            client_args: vec!["-C".into()],
            primary_format: "JSONLines_Compact".into(),
            fallback_format: "CSV".into(),
            fallback_delimiter: ',',
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Outcome of one query run.
#[derive(Debug)]
pub struct Execution {
    pub result_set: ResultSet,
    pub elapsed: Duration,
    pub success: bool,
}

impl Execution {
    fn failed(elapsed: Duration) -> Self {
        Self {
            result_set: ResultSet::empty(),
            elapsed,
            success: false,
        }
    }
}

pub struct Connector {
    config: ConnectorConfig,
    runner: ProcessRunner,
}

impl Connector {
    pub fn new(config: ConnectorConfig) -> Self {
        let runner = ProcessRunner::new(config.runtime.clone(), Vec::new());
        Self { config, runner }
    }

    /// Run one query to completion and decode its output.
    ///
    /// Exit code != 0, timeout and spawn failure all yield `success = false`
    /// with an empty set; a timed-out run reports the timeout itself as its
    /// elapsed time.
    pub async fn execute(&self, sql: &str, limit: Duration) -> Execution {
        let start = Instant::now();
        let out = match self.run_client(sql, &self.config.primary_format, limit).await {
            Ok(out) => out,
            Err(QuerybenchError::Timeout(secs)) => {
                error!(secs, "query timed out");
                return Execution::failed(limit);
            }
            Err(e) => {
                error!(error = %e, "query run failed");
                return Execution::failed(start.elapsed());
            }
        };

        if !out.exit_ok {
            let detail = out.stderr.trim();
            error!(stderr = %detail, "query failed");
            return Execution::failed(out.elapsed);
        }

        let mut set = jsonlines::decode(&out.stdout);
        if set.is_empty() && !out.stdout.trim().is_empty() {
            // Primary decode recovered nothing from non-blank output; retry
            // once in the simpler delimited format. A retry that cannot run
            // fails the whole execution; a retry that exits nonzero just
            // leaves the set empty.
            info!("primary decode empty, retrying in fallback format");
            match self
                .run_client(sql, &self.config.fallback_format, limit)
                .await
            {
                Ok(fb) if fb.exit_ok && !fb.stdout.trim().is_empty() => {
                    set = delimited::decode(&fb.stdout, self.config.fallback_delimiter);
                }
                Ok(_) => {}
                Err(QuerybenchError::Timeout(secs)) => {
                    error!(secs, "fallback query timed out");
                    return Execution::failed(limit);
                }
                Err(e) => {
                    error!(error = %e, "fallback run failed");
                    return Execution::failed(start.elapsed());
                }
            }
        }

        Execution {
            result_set: set,
            elapsed: out.elapsed,
            success: true,
        }
    }

    /// Probe the engine with a trivial query.
    pub async fn test_connection(&self) -> bool {
        self.execute("SELECT 1 AS ping", self.config.connect_timeout)
            .await
            .success
    }

    /// Check that the container runtime is present and the engine container
    /// exists and is running.
    pub async fn check_runtime(&self) -> bool {
        if self.admin(&["--version".into()]).await.is_none() {
            warn!(runtime = %self.config.runtime, "container runtime unavailable");
            return false;
        }

        let name_filter = format!("name={}", self.config.container);
        let all = self
            .admin(&[
                "ps".into(),
                "-a".into(),
                "--filter".into(),
                name_filter.clone(),
                "--format".into(),
                "{{.Names}}".into(),
            ])
            .await;
        match all {
            Some(names) if names.contains(&self.config.container) => {}
            _ => {
                warn!(container = %self.config.container, "container not found");
                return false;
            }
        }

        let running = self
            .admin(&[
                "ps".into(),
                "--filter".into(),
                name_filter,
                "--format".into(),
                "{{.Names}}".into(),
            ])
            .await;
        match running {
            Some(names) if names.contains(&self.config.container) => true,
            _ => {
                warn!(container = %self.config.container, "container exists but is not running");
                false
            }
        }
    }

    /// Human-readable troubleshooting report for the `diag` command.
    pub async fn diagnostics(&self) -> String {
        let mut sections = Vec::new();

        match self.admin(&["--version".into()]).await {
            Some(version) => sections.push(format!("runtime: {}", version.trim())),
            None => sections.push(format!("runtime: {} not available", self.config.runtime)),
        }

        let status = self
            .admin(&[
                "ps".into(),
                "-a".into(),
                "--filter".into(),
                format!("name={}", self.config.container),
                "--format".into(),
                "table {{.Names}}\t{{.Status}}\t{{.Ports}}".into(),
            ])
            .await;
        match status {
            Some(table) if !table.trim().is_empty() => {
                sections.push(format!("container status:\n{}", table.trim_end()))
            }
            _ => sections.push(format!("container '{}' not found", self.config.container)),
        }

        let logs = self
            .admin(&[
                "logs".into(),
                "--tail".into(),
                "10".into(),
                self.config.container.clone(),
            ])
            .await;
        match logs {
            Some(tail) => sections.push(format!("recent container logs:\n{}", tail.trim_end())),
            None => sections.push("cannot access container logs".into()),
        }

        sections.join("\n\n")
    }

    async fn run_client(
        &self,
        sql: &str,
        format: &str,
        limit: Duration,
    ) -> Result<crate::runner::RunOutput, QuerybenchError> {
        let mut args = vec!["exec".to_string(), self.config.container.clone()];
        args.push(self.config.client_program.clone());
        args.extend(self.config.client_args.iter().cloned());
        args.push("-c".into());
        args.push(sql.to_string());
        args.push("-f".into());
        args.push(format.to_string());
        self.runner.run(&args, limit).await
    }

    /// Runtime-level command; None when it fails for any reason.
    async fn admin(&self, args: &[String]) -> Option<String> {
        match self.runner.run(args, self.config.connect_timeout).await {
            Ok(out) if out.exit_ok => Some(out.stdout),
            _ => None,
        }
    }
}
