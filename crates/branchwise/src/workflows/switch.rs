use super::Collaborators;
use crate::error::{BranchError, Result};
use crate::git::{BranchFilter, BranchLocation, BranchName, DEFAULT_REMOTE, is_blank, unique_names};
use crate::log_success;
use crate::utils::log::t;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
  Switched { branch: String, tracking: bool },
  NoMatch { search: String },
  AlreadyOn { branch: String },
}

/// Resolves a switch request into at most one checkout.
pub struct SwitchWorkflow<'a> {
  tools: Collaborators<'a>,
}

impl<'a> SwitchWorkflow<'a> {
  pub fn new(tools: Collaborators<'a>) -> Self {
    Self { tools }
  }

  pub fn run(&self, search: Option<&str>, location: BranchLocation) -> Result<SwitchOutcome> {
    let names = self.tools.repo.list_names(location)?;
    let current = match names.iter().find(|n| n.is_current()) {
      Some(name) => Some(name.as_str().to_string()),
      None if location == BranchLocation::Remote => self.tools.repo.current_branch()?,
      None => None,
    };
    let candidates: Vec<String> = unique_names(&names)
      .into_iter()
      .filter(|name| current.as_deref() != Some(name.as_str()))
      .collect();

    let choice = match search.filter(|_| !is_blank(search)) {
      None => {
        if candidates.is_empty() {
          return Err(BranchError::NoBranchesAvailable {
            action: "switch to".to_string(),
          });
        }
        self.tools.picker.select("Switch to branch", &candidates, 0)?
      }
      Some(search) => {
        let filter = BranchFilter::new(search);
        let matches = filter.apply(&candidates);
        if matches.is_empty() {
          if let Some(branch) = current.filter(|c| filter.matches(c)) {
            return Ok(SwitchOutcome::AlreadyOn { branch });
          }
          return Ok(SwitchOutcome::NoMatch {
            search: search.trim().to_string(),
          });
        }
        match filter.exact(search, &matches) {
          Some(exact) => exact.clone(),
          None => self.tools.picker.select(
            &format!("Branches matching '{}'", search.trim()),
            &matches,
            0,
          )?,
        }
      }
    };

    self.checkout(&names, location, &choice)
  }

  fn checkout(
    &self,
    names: &[BranchName],
    location: BranchLocation,
    branch: &str,
  ) -> Result<SwitchOutcome> {
    let has_local = match location {
      BranchLocation::Local => true,
      BranchLocation::Both => names
        .iter()
        .any(|n| !n.is_remote() && n.as_str() == branch),
      BranchLocation::Remote => self
        .tools
        .repo
        .list_names(BranchLocation::Local)?
        .iter()
        .any(|n| n.as_str() == branch),
    };
    if has_local {
      self.tools.shell.git(&["checkout", branch])?;
      log_success!("Switched to {}", t::branch(branch));
    } else {
      let upstream = format!("{DEFAULT_REMOTE}/{branch}");
      self.tools.shell.git(&["checkout", "-b", branch, &upstream])?;
      log_success!(
        "Created {} tracking {}",
        t::branch(branch),
        t::remote(&upstream)
      );
    }
    Ok(SwitchOutcome::Switched {
      branch: branch.to_string(),
      tracking: !has_local,
    })
  }
}
