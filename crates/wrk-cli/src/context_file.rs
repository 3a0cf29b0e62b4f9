use anyhow::Context;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use wrk_core::{Comment, TaskView};

/// A task and its conversation, as exported from the task store.
#[derive(Debug, Clone)]
pub struct TaskContext {
    pub task: TaskView,
    /// Oldest first, exactly as they appear in the file.
    pub comments: Vec<Comment>,
}

#[derive(Deserialize)]
struct RawContext {
    task: serde_json::Value,
    #[serde(default)]
    comments: Vec<Comment>,
}

/// Load a context file; `-` reads stdin.
pub fn load(path: &Path) -> anyhow::Result<TaskContext> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read task context from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read task context {}", path.display()))?
    };
    parse(&content).with_context(|| format!("invalid task context {}", path.display()))
}

pub fn parse(content: &str) -> anyhow::Result<TaskContext> {
    let raw: RawContext = serde_json::from_str(content)?;
    if !raw.task.is_object() {
        anyhow::bail!("\"task\" must be a JSON object");
    }
    let ctx = TaskContext {
        task: TaskView::from_record(&raw.task),
        comments: raw.comments,
    };
    tracing::debug!(
        task_id = %ctx.task.id,
        comments = ctx.comments.len(),
        "loaded task context"
    );
    Ok(ctx)
}
