use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wrk_resume::runner::{ProcessRunner, RunOutcome, SessionRunner};
use wrk_resume::{build_resume_command, ResumeCommand, Tool};

use crate::cmd_prompt::{self, PromptOpts, RenderedPrompt};
use crate::config::{WrkConfig, WrkPaths};

/// Exit code reported when a resumed session is interrupted with Ctrl+C.
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Args, Debug, Clone)]
pub struct ResumeOpts {
    #[command(flatten)]
    pub prompt: PromptOpts,
    /// Session reference of the agent session to resume
    #[arg(long)]
    pub session: String,
    /// Agent tool: opencode, claude-code or codex (defaults to `default_tool` config)
    #[arg(long)]
    pub tool: Option<String>,
    /// Working directory for the resumed agent (defaults to the current directory)
    #[arg(long)]
    pub cwd: Option<PathBuf>,
    /// Print the full resume command as JSON
    #[arg(long)]
    pub json: bool,
    /// Spawn the resumed session instead of printing the command
    #[arg(long)]
    pub exec: bool,
    /// Kill the resumed session after this many seconds (overrides `timeout_sec` config)
    #[arg(long)]
    pub timeout_sec: Option<u64>,
}

/// `wrk resume <context> --session <ref>`. Returns the process exit code.
pub fn execute(repo_root: &Path, opts: &ResumeOpts) -> Result<i32> {
    let config = WrkConfig::load(&WrkPaths::discover(repo_root))?;
    let (rendered, cmd) = prepare(&config, repo_root, opts)?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&cmd)?);
    } else if !opts.exec {
        println!("{}", cmd.command);
    }

    if !opts.exec {
        return Ok(0);
    }

    eprintln!(
        "Resuming {} session {} for {} ({}) in {}",
        cmd.tool,
        cmd.session_ref,
        rendered.display_id,
        rendered.ctx.task.title,
        cmd.working_dir.display()
    );
    let timeout = Duration::from_secs(opts.timeout_sec.unwrap_or(config.timeout_sec));
    let runner = ProcessRunner::new(timeout);

    let cancel = CancellationToken::new();
    ctrlc_cancel(cancel.clone());

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_with(&runner, &cmd, cancel))
}

/// Render the prompt and build the resume command from an already-loaded config.
fn prepare(
    config: &WrkConfig,
    repo_root: &Path,
    opts: &ResumeOpts,
) -> Result<(RenderedPrompt, ResumeCommand)> {
    let tool = select_tool(opts.tool.as_deref(), config.default_tool)?;
    let rendered = cmd_prompt::render(config, &opts.prompt)?;
    let cwd = opts.cwd.clone().unwrap_or_else(|| repo_root.to_path_buf());
    let cmd = build_resume_command(&tool, &opts.session, &cwd, &rendered.prompt)?;
    Ok((rendered, cmd))
}

/// Pick the tool name: explicit flag first, then config.
///
/// The name is validated later by `build_resume_command`, so an unknown
/// flag value surfaces as an unsupported-tool error.
fn select_tool(flag: Option<&str>, configured: Option<Tool>) -> Result<String> {
    match (flag, configured) {
        (Some(t), _) => Ok(t.to_string()),
        (None, Some(t)) => Ok(t.as_str().to_string()),
        (None, None) => {
            let valid: Vec<&str> = Tool::ALL.iter().map(|t| t.as_str()).collect();
            anyhow::bail!(
                "no tool given: pass --tool or run `wrk config set default_tool <tool>` (valid tools: {})",
                valid.join(", ")
            )
        }
    }
}

/// Run a built command and map its outcome to an exit code.
pub async fn run_with(
    runner: &dyn SessionRunner,
    cmd: &ResumeCommand,
    cancel: CancellationToken,
) -> Result<i32> {
    match runner.run(cmd, cancel).await? {
        RunOutcome::Exited { code } => {
            tracing::info!(tool = %cmd.tool, code, "resumed session finished");
            Ok(code)
        }
        RunOutcome::Cancelled => {
            eprintln!("Interrupted.");
            Ok(EXIT_INTERRUPTED)
        }
        RunOutcome::Timeout => anyhow::bail!(
            "{} session {} timed out",
            cmd.tool,
            cmd.session_ref
        ),
        RunOutcome::SpawnFailed { error } => anyhow::bail!(
            "failed to start {}: {error}\nIs `{}` installed and on PATH?",
            cmd.tool,
            cmd.tool.binary()
        ),
    }
}

fn ctrlc_cancel(cancel: CancellationToken) {
    let _ = ctrlc::set_handler(move || {
        cancel.cancel();
    });
}
