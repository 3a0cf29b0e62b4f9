use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::quote::{shell_quote, shell_word};

/// Shortest session reference accepted. A sanity check, not a format check.
pub const MIN_SESSION_REF_LEN: usize = 8;

/// Coding-agent CLIs that can resume a prior session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    Opencode,
    ClaudeCode,
    Codex,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Opencode, Tool::ClaudeCode, Tool::Codex];

    /// Canonical name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Opencode => "opencode",
            Tool::ClaudeCode => "claude-code",
            Tool::Codex => "codex",
        }
    }

    /// Executable that gets spawned.
    pub fn binary(self) -> &'static str {
        match self {
            Tool::Opencode => "opencode",
            Tool::ClaudeCode => "claude",
            Tool::Codex => "codex",
        }
    }

    fn valid_names() -> String {
        Tool::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = ResumeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ResumeError::UnsupportedTool {
                tool: s.to_string(),
                valid: Tool::valid_names(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResumeError {
    #[error("unsupported tool '{tool}' (valid tools: {valid})")]
    UnsupportedTool { tool: String, valid: String },
    #[error(
        "invalid session reference '{session_ref}': must be at least {min} characters",
        min = MIN_SESSION_REF_LEN
    )]
    InvalidSessionReference { session_ref: String },
}

/// Discriminant of [`ResumeError`] for callers that branch on the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeErrorKind {
    UnsupportedTool,
    InvalidSessionReference,
}

impl ResumeError {
    pub fn kind(&self) -> ResumeErrorKind {
        match self {
            ResumeError::UnsupportedTool { .. } => ResumeErrorKind::UnsupportedTool,
            ResumeError::InvalidSessionReference { .. } => ResumeErrorKind::InvalidSessionReference,
        }
    }
}

/// A ready-to-run resume invocation.
///
/// `command` is for logs and copy-paste; `args` is what gets spawned. Both
/// carry the same literal argument values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeCommand {
    pub tool: Tool,
    pub session_ref: String,
    pub working_dir: PathBuf,
    pub prompt: String,
    pub command: String,
    pub args: Vec<String>,
}

impl ResumeCommand {
    pub fn build(
        tool: Tool,
        session_ref: &str,
        working_dir: &Path,
        prompt: &str,
    ) -> Result<Self, ResumeError> {
        validate_session_ref(session_ref)?;

        let quoted = shell_quote(prompt);
        let session = shell_word(session_ref);
        let bin = tool.binary();
        let (command, args) = match tool {
            Tool::Opencode => (
                format!("{bin} run {quoted} --session {session}"),
                vec![bin, "run", prompt, "--session", session_ref],
            ),
            Tool::ClaudeCode => (
                format!("{bin} --resume {session} {quoted}"),
                vec![bin, "--resume", session_ref, prompt],
            ),
            Tool::Codex => (
                format!("{bin} exec resume {session} {quoted}"),
                vec![bin, "exec", "resume", session_ref, prompt],
            ),
        };

        tracing::info!(
            tool = %tool,
            session_ref,
            working_dir = %working_dir.display(),
            prompt_chars = prompt.chars().count(),
            "built resume command"
        );

        Ok(Self {
            tool,
            session_ref: session_ref.to_string(),
            working_dir: working_dir.to_path_buf(),
            prompt: prompt.to_string(),
            command,
            args: args.into_iter().map(String::from).collect(),
        })
    }
}

/// Validate `tool` and `session_ref`, then build the resume invocation.
pub fn build_resume_command(
    tool: &str,
    session_ref: &str,
    working_dir: &Path,
    prompt: &str,
) -> Result<ResumeCommand, ResumeError> {
    let tool: Tool = tool.parse()?;
    ResumeCommand::build(tool, session_ref, working_dir, prompt)
}

fn validate_session_ref(session_ref: &str) -> Result<(), ResumeError> {
    if session_ref.chars().count() < MIN_SESSION_REF_LEN {
        return Err(ResumeError::InvalidSessionReference {
            session_ref: session_ref.to_string(),
        });
    }
    Ok(())
}
