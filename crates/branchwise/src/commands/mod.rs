pub mod checkout_remote;
pub mod config;
pub mod create;
pub mod delete;
pub mod list;
pub mod switch;

use anyhow::Result;

use crate::config::AppContext;
use crate::git::{GitBranchRepository, GitShell};
use crate::utils::picker::TerminalPicker;
use crate::workflows::Collaborators;

/// Wire the real git shell, repository and terminal picker for one command run.
pub(crate) fn with_tools<R>(
  ctx: &AppContext,
  f: impl FnOnce(Collaborators<'_>) -> Result<R>,
) -> Result<R> {
  let shell = GitShell::new(&ctx.root);
  let repo = GitBranchRepository::new(&shell);
  let picker = TerminalPicker::new();
  f(Collaborators {
    repo: &repo,
    shell: &shell,
    picker: &picker,
  })
}
