use super::Collaborators;
use crate::config::BranchConfig;
use crate::error::{BranchError, Result};
use crate::git::{BranchFilter, BranchLocation, BranchName, BranchSnapshot, DEFAULT_REMOTE, is_blank};
use crate::utils::log::t;
use crate::{log_info, log_success};

#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteRequest<'s> {
  pub search: Option<&'s str>,
  /// Delete every merged branch after one confirmation instead of prompting.
  pub all_merged: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedBranch {
  pub name: String,
  pub forced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
  NoMatch { search: String },
  NothingMerged,
  NothingSelected,
  Deleted {
    branches: Vec<DeletedBranch>,
    pruned: bool,
  },
}

/// Local branches that may be deleted: never the current or the default branch.
#[must_use]
pub fn eligible_branches(locals: Vec<BranchName>, default_branch: &str) -> Vec<BranchName> {
  locals
    .into_iter()
    .filter(|name| !name.is_current() && !name.as_str().eq_ignore_ascii_case(default_branch))
    .collect()
}

/// Deletes local branches: plain delete for merged ones, forced delete only
/// after an explicit confirmation.
pub struct DeleteWorkflow<'a> {
  tools: Collaborators<'a>,
  config: &'a BranchConfig,
}

impl<'a> DeleteWorkflow<'a> {
  pub fn new(tools: Collaborators<'a>, config: &'a BranchConfig) -> Self {
    Self { tools, config }
  }

  pub fn run(&self, request: DeleteRequest<'_>) -> Result<DeleteOutcome> {
    let default_branch = self.config.default_branch.as_str();
    let locals = self.tools.repo.list_names(BranchLocation::Local)?;
    let mut eligible = eligible_branches(locals, default_branch);
    if eligible.is_empty() {
      return Err(BranchError::NoEligibleBranches {
        default_branch: default_branch.to_string(),
      });
    }

    if let Some(search) = request.search.filter(|_| !is_blank(request.search)) {
      let filter = BranchFilter::new(search);
      eligible.retain(|name| filter.matches(name.as_str()));
      if eligible.is_empty() {
        return Ok(DeleteOutcome::NoMatch {
          search: search.trim().to_string(),
        });
      }
    }

    let snapshots = self.tools.repo.load_snapshots(&eligible, default_branch)?;
    let selected = if request.all_merged {
      let merged: Vec<BranchSnapshot> = snapshots.into_iter().filter(|s| s.is_merged).collect();
      if merged.is_empty() {
        log_info!("No branches merged into {}", t::branch(default_branch));
        return Ok(DeleteOutcome::NothingMerged);
      }
      let listed: Vec<&str> = merged.iter().map(|s| s.name.as_str()).collect();
      self.tools.picker.require_permission(&format!(
        "Delete {} merged branch(es): {}?",
        merged.len(),
        listed.join(", ")
      ))?;
      merged
    } else {
      let options: Vec<String> = snapshots.iter().map(|s| s.name.clone()).collect();
      let picked = self
        .tools
        .picker
        .multi_select("Select branches to delete", &options)?;
      if picked.is_empty() {
        return Ok(DeleteOutcome::NothingSelected);
      }
      snapshots
        .into_iter()
        .filter(|s| picked.contains(&s.name))
        .collect()
    };

    let mut deleted = Vec::with_capacity(selected.len());
    for snapshot in &selected {
      deleted.push(self.delete_one(snapshot)?);
    }

    let pruned = self.config.prune_on_delete && self.tools.repo.has_remote()?;
    if pruned {
      self.tools.shell.git(&["remote", "prune", DEFAULT_REMOTE])?;
      log_info!("Pruned stale refs of {}", t::remote(DEFAULT_REMOTE));
    }

    Ok(DeleteOutcome::Deleted {
      branches: deleted,
      pruned,
    })
  }

  /// A denied force confirmation aborts the whole remaining batch.
  fn delete_one(&self, snapshot: &BranchSnapshot) -> Result<DeletedBranch> {
    let name = snapshot.name.as_str();
    let forced = !snapshot.is_merged;
    if forced {
      self.tools.picker.require_permission(&format!(
        "Branch `{name}` is not merged into `{}`. Force delete it?",
        self.config.default_branch
      ))?;
      self.tools.shell.git(&["branch", "-D", name])?;
    } else {
      self.tools.shell.git(&["branch", "-d", name])?;
    }
    log_success!("Deleted branch {}", t::branch(name));
    Ok(DeletedBranch {
      name: name.to_string(),
      forced,
    })
  }
}
