use clap::Args;
use std::path::{Path, PathBuf};
use wrk_core::resolve_display_id;
use wrk_resume::{build_prompt, ContextMode};

use crate::config::{WrkConfig, WrkPaths};
use crate::context_file::{self, TaskContext};

/// Options shared by `wrk prompt` and `wrk resume`.
#[derive(Args, Debug, Clone)]
pub struct PromptOpts {
    /// Task context JSON file (`-` for stdin)
    pub context: PathBuf,
    /// Use the minimal prompt (title + last 3 comments)
    #[arg(long)]
    pub minimal: bool,
    /// Display id to show instead of deriving one from the task
    #[arg(long)]
    pub display_id: Option<String>,
    /// Board prefix for sequence-derived ids (overrides `board_prefix` config)
    #[arg(long)]
    pub prefix: Option<String>,
}

/// A rendered context prompt plus what it was rendered from.
pub struct RenderedPrompt {
    pub ctx: TaskContext,
    pub display_id: String,
    pub prompt: String,
}

/// Load the context file, resolve the display id, render the prompt.
pub fn render(config: &WrkConfig, opts: &PromptOpts) -> anyhow::Result<RenderedPrompt> {
    let ctx = context_file::load(&opts.context)?;
    Ok(render_context(config, opts, ctx))
}

pub fn render_context(config: &WrkConfig, opts: &PromptOpts, ctx: TaskContext) -> RenderedPrompt {
    let display_id = match opts.display_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            let prefix = opts.prefix.as_deref().unwrap_or(&config.board_prefix);
            resolve_display_id(&ctx.task, prefix)
        }
    };
    let mode = if opts.minimal {
        ContextMode::Minimal
    } else {
        config.context
    };
    let prompt = build_prompt(mode, &ctx.task, &display_id, &ctx.comments);
    RenderedPrompt {
        ctx,
        display_id,
        prompt,
    }
}

/// `wrk prompt <context>`
pub fn execute(repo_root: &Path, opts: &PromptOpts) -> anyhow::Result<()> {
    let config = WrkConfig::load(&WrkPaths::discover(repo_root))?;
    let rendered = render(&config, opts)?;
    print!("{}", rendered.prompt);
    Ok(())
}
