use crate::command::ResumeCommand;
use anyhow::Result;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Default wall-clock limit for a resumed session.
pub const DEFAULT_TIMEOUT_SEC: u64 = 1800;

/// How a resumed session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Exited { code: i32 },
    Timeout,
    Cancelled,
    SpawnFailed { error: String },
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        matches!(self, RunOutcome::Exited { code: 0 })
    }
}

/// Spawns a built [`ResumeCommand`]. Implemented by [`ProcessRunner`] and
/// [`MockRunner`] (tests).
#[async_trait::async_trait]
pub trait SessionRunner: Send + Sync {
    async fn run(&self, cmd: &ResumeCommand, cancel: CancellationToken) -> Result<RunOutcome>;
}

/// Runs the command's argv directly (no shell) in its working directory,
/// inheriting stdio.
pub struct ProcessRunner {
    pub timeout: Duration,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SEC))
    }
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait::async_trait]
impl SessionRunner for ProcessRunner {
    async fn run(&self, cmd: &ResumeCommand, cancel: CancellationToken) -> Result<RunOutcome> {
        let Some((program, rest)) = cmd.args.split_first() else {
            anyhow::bail!("resume command for {} has an empty argv", cmd.tool);
        };

        let mut child = match tokio::process::Command::new(program)
            .args(rest)
            .current_dir(&cmd.working_dir)
            // Allow nesting: a session resumed from inside Claude Code must not inherit its markers
            .env_remove("CLAUDE_CODE")
            .env_remove("CLAUDECODE")
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(program, error = %e, "failed to spawn resume command");
                return Ok(RunOutcome::SpawnFailed {
                    error: format!("{program}: {e}"),
                });
            }
        };
        tracing::debug!(program, pid = ?child.id(), "resumed session started");

        tokio::select! {
            status = child.wait() => {
                let code = status?.code().unwrap_or(-1);
                tracing::debug!(program, code, "resumed session exited");
                Ok(RunOutcome::Exited { code })
            }
            _ = tokio::time::sleep(self.timeout) => {
                tracing::warn!(program, timeout_sec = self.timeout.as_secs(), "resumed session timed out");
                child.kill().await.ok();
                Ok(RunOutcome::Timeout)
            }
            _ = cancel.cancelled() => {
                child.kill().await.ok();
                Ok(RunOutcome::Cancelled)
            }
        }
    }
}

/// Records every command it is asked to run and returns queued outcomes.
/// Once the queue is exhausted it reports a clean exit.
#[derive(Default)]
pub struct MockRunner {
    outcomes: std::sync::Mutex<Vec<RunOutcome>>,
    calls: std::sync::Mutex<Vec<ResumeCommand>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcomes(outcomes: Vec<RunOutcome>) -> Self {
        Self {
            outcomes: std::sync::Mutex::new(outcomes),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ResumeCommand> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl SessionRunner for MockRunner {
    async fn run(&self, cmd: &ResumeCommand, cancel: CancellationToken) -> Result<RunOutcome> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(cmd.clone());
        }
        if cancel.is_cancelled() {
            return Ok(RunOutcome::Cancelled);
        }
        let mut outcomes = self
            .outcomes
            .lock()
            .map_err(|_| anyhow::anyhow!("mock runner lock poisoned"))?;
        if outcomes.is_empty() {
            Ok(RunOutcome::Exited { code: 0 })
        } else {
            Ok(outcomes.remove(0))
        }
    }
}
