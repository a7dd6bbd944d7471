use super::Collaborators;
use crate::config::BranchConfig;
use crate::error::{BranchError, Result};
use crate::git::{BranchName, DEFAULT_REMOTE, SyncStatus};
use crate::utils::log::t;
use crate::{log_info, log_success};

const MERGE_CHOICE: &str = "merge (git pull)";
const REBASE_CHOICE: &str = "rebase (git pull --rebase)";

/// What happened to the default branch before a new branch was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
  NoRemote,
  NotOnDefaultBranch,
  InSync,
  Pushed,
  Pulled { rebase: bool },
}

/// Brings the default branch level with its remote before branching off it.
///
/// Only engages when a remote exists and the default branch is checked out.
/// Never resolves a diverged or unknown state on its own.
pub struct CreateReconciliation<'a> {
  tools: Collaborators<'a>,
  config: &'a BranchConfig,
}

impl<'a> CreateReconciliation<'a> {
  pub fn new(tools: Collaborators<'a>, config: &'a BranchConfig) -> Self {
    Self { tools, config }
  }

  pub fn run(&self) -> Result<Reconciliation> {
    if !self.tools.repo.has_remote()? {
      return Ok(Reconciliation::NoRemote);
    }
    let current = match self.tools.repo.current_branch()? {
      Some(name) if name.eq_ignore_ascii_case(&self.config.default_branch) => name,
      _ => return Ok(Reconciliation::NotOnDefaultBranch),
    };

    let snapshots = self
      .tools
      .repo
      .load_snapshots(&[BranchName::local(&current)], &current)?;
    let status = snapshots
      .first()
      .map_or(SyncStatus::Undetermined, |s| s.sync_status);
    let upstream = format!("{DEFAULT_REMOTE}/{current}");
    log::debug!("{current} is {status} relative to {upstream}");

    match status {
      SyncStatus::InSync => Ok(Reconciliation::InSync),
      SyncStatus::Ahead => {
        self.tools.picker.require_permission(&format!(
          "`{current}` is ahead of `{upstream}`. Push it before creating the new branch?"
        ))?;
        self.tools.shell.git(&["push", DEFAULT_REMOTE, &current])?;
        log_success!("Pushed {} to {}", t::branch(&current), t::remote(&upstream));
        Ok(Reconciliation::Pushed)
      }
      SyncStatus::Behind => {
        let options = vec![MERGE_CHOICE.to_string(), REBASE_CHOICE.to_string()];
        let starting_cursor = usize::from(self.config.rebase_on_default_branch);
        let choice = self.tools.picker.select(
          &format!("`{current}` is behind `{upstream}`. How should it be updated?"),
          &options,
          starting_cursor,
        )?;
        let rebase = choice == REBASE_CHOICE;
        if rebase {
          self
            .tools
            .shell
            .git(&["pull", "--rebase", DEFAULT_REMOTE, &current])?;
        } else {
          self.tools.shell.git(&["pull", DEFAULT_REMOTE, &current])?;
        }
        log_info!("Updated {} from {}", t::branch(&current), t::remote(&upstream));
        Ok(Reconciliation::Pulled { rebase })
      }
      status @ (SyncStatus::Diverged
      | SyncStatus::Undetermined
      | SyncStatus::NoRemoteCounterpart) => Err(BranchError::UnsafeDivergence {
        branch: current,
        status,
      }),
    }
  }
}
