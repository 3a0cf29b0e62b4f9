//! Resume a coding-agent session that was blocked waiting on human input.
//!
//! [`prompt`] turns a task and its conversation into a context prompt,
//! [`command`] wraps that prompt into a tool-specific resume invocation, and
//! [`runner`] is the seam through which the CLI actually spawns it.

pub mod command;
pub mod prompt;
pub mod quote;
pub mod runner;

pub use command::{build_resume_command, ResumeCommand, ResumeError, ResumeErrorKind, Tool};
pub use prompt::{build_full_prompt, build_minimal_prompt, build_prompt, ContextMode};
pub use quote::shell_quote;
