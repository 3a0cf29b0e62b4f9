mod cmd_config;
mod cmd_prompt;
mod cmd_resume;
mod config;
mod context_file;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "wrk",
    version,
    about = "Resume blocked coding-agent sessions with task context"
)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the context prompt for a task
    Prompt {
        #[command(flatten)]
        opts: cmd_prompt::PromptOpts,
    },
    /// Build (and optionally run) the command that resumes an agent session
    Resume {
        #[command(flatten)]
        opts: cmd_resume::ResumeOpts,
    },
    /// Manage .wrk/config.json
    Config {
        #[command(subcommand)]
        cmd: cmd_config::ConfigCmd,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "wrk=debug,wrk_core=debug,wrk_resume=debug"
    } else {
        "wrk=warn,wrk_core=warn,wrk_resume=warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let repo_root = std::env::current_dir()?;

    match cli.cmd {
        Command::Prompt { opts } => cmd_prompt::execute(&repo_root, &opts),
        Command::Resume { opts } => {
            let code = cmd_resume::execute(&repo_root, &opts)?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Command::Config { cmd } => cmd_config::run(cmd, &repo_root),
    }
}
