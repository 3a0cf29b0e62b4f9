use serde::{Deserialize, Serialize};
use time::UtcOffset;
use wrk_core::{resolve_label, Comment, TaskView};

/// Descriptions longer than this are cut in the full prompt.
pub const DESCRIPTION_LIMIT: usize = 500;
/// Comment bodies longer than this are cut in the minimal prompt.
pub const COMMENT_LIMIT: usize = 200;
/// How many trailing comments the minimal prompt keeps.
pub const MINIMAL_RECENT_COMMENTS: usize = 3;

const NO_COMMENTS: &str = "_No comments yet_";

/// Which prompt shape to hand the resumed agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextMode {
    #[default]
    Full,
    Minimal,
}

impl std::str::FromStr for ContextMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "minimal" => Ok(Self::Minimal),
            other => Err(format!("unknown context mode '{other}' (expected full or minimal)")),
        }
    }
}

/// Build the prompt for `mode`.
pub fn build_prompt(
    mode: ContextMode,
    task: &TaskView,
    display_id: &str,
    comments: &[Comment],
) -> String {
    match mode {
        ContextMode::Full => build_full_prompt(task, display_id, comments),
        ContextMode::Minimal => build_minimal_prompt(task, display_id, comments),
    }
}

/// Full context prompt, comment times rendered in the local timezone.
pub fn build_full_prompt(task: &TaskView, display_id: &str, comments: &[Comment]) -> String {
    build_full_prompt_with_offset(task, display_id, comments, local_offset())
}

/// Full context prompt with an explicit offset for the `HH:MM` comment stamps.
///
/// Comments appear in the order given and are never truncated; only the task
/// description is capped at [`DESCRIPTION_LIMIT`] characters.
pub fn build_full_prompt_with_offset(
    task: &TaskView,
    display_id: &str,
    comments: &[Comment],
    offset: UtcOffset,
) -> String {
    let mut out = String::new();
    out.push_str("# Resuming task from the wrk board\n\n");

    out.push_str(&format!("**Task**: {display_id} - {}\n", task.title));
    out.push_str("**Status**: need_input -> in_progress\n");
    out.push_str(&format!("**Priority**: {}\n", task.priority));
    if !task.description.is_empty() {
        out.push_str("\n**Description**:\n");
        out.push_str(&truncate_chars(&task.description, DESCRIPTION_LIMIT));
        out.push('\n');
    }

    out.push_str("\n## Conversation\n\n");
    if comments.is_empty() {
        out.push_str(NO_COMMENTS);
        out.push_str("\n\n");
    } else {
        for c in comments {
            let label = resolve_label(&c.author_type, &c.author_id);
            let at = c.created.to_offset(offset);
            out.push_str(&format!(
                "[{label} @ {:02}:{:02}]: {}\n\n",
                at.hour(),
                at.minute(),
                c.content
            ));
        }
    }

    out.push_str("## Instructions\n\n");
    out.push_str(
        "The human has answered the question that blocked this task. \
         Continue working from where you left off, taking their response above into account. \
         If you need further clarification, move the task back to need_input with a new \
         question instead of guessing.\n",
    );

    tracing::debug!(
        display_id,
        comments = comments.len(),
        chars = out.chars().count(),
        "built full prompt"
    );
    out
}

/// Compact prompt: title line plus the last [`MINIMAL_RECENT_COMMENTS`]
/// comments, each capped at [`COMMENT_LIMIT`] characters, no timestamps.
///
/// "Last" is by slice position, so `comments` must be oldest first.
pub fn build_minimal_prompt(task: &TaskView, display_id: &str, comments: &[Comment]) -> String {
    let mut out = format!("Task {display_id}: {}\n\n", task.title);
    out.push_str("Recent comments:\n");
    if comments.is_empty() {
        out.push_str(NO_COMMENTS);
        out.push('\n');
    } else {
        let start = comments.len().saturating_sub(MINIMAL_RECENT_COMMENTS);
        for c in &comments[start..] {
            let label = resolve_label(&c.author_type, &c.author_id);
            out.push_str(&format!(
                "- {label}: {}\n",
                truncate_chars(&c.content, COMMENT_LIMIT)
            ));
        }
    }
    out.push_str("\nContinue working on the task based on the above context.\n");

    tracing::debug!(
        display_id,
        comments = comments.len(),
        chars = out.chars().count(),
        "built minimal prompt"
    );
    out
}

/// Keep the first `max_chars` characters, appending `...` when anything was cut.
fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
        None => s.to_string(),
    }
}

fn local_offset() -> UtcOffset {
    match UtcOffset::current_local_offset() {
        Ok(offset) => offset,
        Err(e) => {
            tracing::warn!(error = %e, "local UTC offset unavailable, rendering comment times in UTC");
            UtcOffset::UTC
        }
    }
}
