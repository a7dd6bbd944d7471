use std::collections::HashSet;

use super::Collaborators;
use crate::error::Result;
use crate::git::{BranchFilter, BranchLocation, BranchName, DEFAULT_REMOTE, is_blank};
use crate::log_success;
use crate::utils::log::t;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutRemoteOutcome {
  /// The repository has no remote-tracking branches.
  NoRemoteBranches,
  /// Every remote branch already has a local branch of the same name.
  AllExistLocally,
  NoMatch { search: String },
  CheckedOut { branch: String },
}

/// Clean names of remote branches without a local counterpart, sorted and unique.
#[must_use]
pub fn remote_candidates(remotes: &[BranchName], locals: &[BranchName]) -> Vec<String> {
  let local: HashSet<&str> = locals.iter().map(BranchName::as_str).collect();
  let mut candidates: Vec<String> = remotes
    .iter()
    .map(|name| name.as_str().trim().to_string())
    .filter(|name| !local.contains(name.as_str()))
    .collect();
  candidates.sort();
  candidates.dedup();
  candidates
}

/// Creates a local tracking branch for a remote branch the user picks.
pub struct CheckoutRemoteWorkflow<'a> {
  tools: Collaborators<'a>,
}

impl<'a> CheckoutRemoteWorkflow<'a> {
  pub fn new(tools: Collaborators<'a>) -> Self {
    Self { tools }
  }

  pub fn run(&self, search: Option<&str>) -> Result<CheckoutRemoteOutcome> {
    let remotes = self.tools.repo.list_names(BranchLocation::Remote)?;
    if remotes.is_empty() {
      return Ok(CheckoutRemoteOutcome::NoRemoteBranches);
    }
    let locals = self.tools.repo.list_names(BranchLocation::Local)?;
    let mut candidates = remote_candidates(&remotes, &locals);
    if candidates.is_empty() {
      return Ok(CheckoutRemoteOutcome::AllExistLocally);
    }

    let mut exact = None;
    if let Some(search) = search.filter(|_| !is_blank(search)) {
      let filter = BranchFilter::new(search);
      candidates = filter.apply(&candidates);
      if candidates.is_empty() {
        return Ok(CheckoutRemoteOutcome::NoMatch {
          search: search.trim().to_string(),
        });
      }
      exact = filter.exact(search, &candidates).cloned();
    }

    let branch = match exact {
      Some(branch) => branch,
      None => self
        .tools
        .picker
        .select("Check out remote branch", &candidates, 0)?,
    };
    // The tracking branch always follows origin, whichever remote listed it.
    let upstream = format!("{DEFAULT_REMOTE}/{branch}");
    self.tools.shell.git(&["checkout", "-b", &branch, &upstream])?;
    log_success!(
      "Created {} tracking {}",
      t::branch(&branch),
      t::remote(&upstream)
    );
    Ok(CheckoutRemoteOutcome::CheckedOut { branch })
  }
}
