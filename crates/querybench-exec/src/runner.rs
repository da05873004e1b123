use querybench_core::QuerybenchError;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Captured output of one client invocation.
#[derive(Debug)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_ok: bool,
    pub elapsed: Duration,
}

/// Spawns the external client binary and captures its output.
///
/// One invocation at a time; the caller awaits each run to completion. The
/// timeout doubles as the cancellation path: an expired run drops the child
/// handle and `kill_on_drop` tears the process down.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: String,
    base_args: Vec<String>,
}

impl ProcessRunner {
    pub fn new(program: impl Into<String>, base_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            base_args,
        }
    }

    pub async fn run(
        &self,
        extra_args: &[String],
        limit: Duration,
    ) -> Result<RunOutput, QuerybenchError> {
        let start = Instant::now();
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.base_args)
            .args(extra_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        debug!(program = %self.program, ?extra_args, "spawning client");

        let child = cmd.spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                QuerybenchError::Unavailable(format!("{} not found in PATH", self.program))
            }
            _ => QuerybenchError::Process(format!("failed to launch {}: {}", self.program, e)),
        })?;

        let output = timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| QuerybenchError::Timeout(limit.as_secs()))?
            .map_err(|e| QuerybenchError::Process(e.to_string()))?;

        Ok(RunOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_ok: output.status.success(),
            elapsed: start.elapsed(),
        })
    }
}
