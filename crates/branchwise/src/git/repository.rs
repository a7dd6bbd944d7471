use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};

use super::name::{BranchName, DEFAULT_REMOTE};
use super::shell::Shell;
use super::sync::{self, SyncStatus};
use crate::error::{BranchError, Result};

/// Which branches a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchLocation {
  Local,
  Remote,
  Both,
}

/// Point-in-time metadata about one branch. Never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchSnapshot {
  pub name: String,
  pub is_merged: bool,
  pub is_current: bool,
  pub created_at: Option<DateTime<FixedOffset>>,
  pub sync_status: SyncStatus,
}

/// Typed view over a repository's branches.
///
/// Implementations own all parsing of git's text output; callers only ever
/// see [`BranchName`]s and [`BranchSnapshot`]s.
pub trait BranchRepository {
  fn list_names(&self, location: BranchLocation) -> Result<Vec<BranchName>>;

  /// Qualified names (`dev`, `origin/dev`) fully merged into `reference`.
  fn merged_names(&self, reference: &str, include_remote: bool) -> Result<HashSet<String>>;

  fn creation_date(&self, name: &BranchName) -> Result<Option<DateTime<FixedOffset>>>;

  fn compare_ahead_behind(&self, local: &str, remote_counterpart: Option<&str>)
  -> Result<SyncStatus>;

  fn has_remote(&self) -> Result<bool>;

  fn fetch(&self) -> Result<()>;

  /// Name of the checked-out branch, `None` on a detached HEAD.
  fn current_branch(&self) -> Result<Option<String>>;

  /// Build snapshots for `names`, with merge state measured against `reference`.
  ///
  /// Issues one merged query and at most one fetch for the whole batch.
  /// Creation date and sync status are best-effort per branch.
  fn load_snapshots(&self, names: &[BranchName], reference: &str) -> Result<Vec<BranchSnapshot>> {
    let include_remote = names.iter().any(BranchName::is_remote);
    let merged = self.merged_names(reference, include_remote)?;
    let remote = self.has_remote()?;
    if remote && let Err(err) = self.fetch() {
      log::warn!("fetch failed, using existing remote refs: {err}");
    }

    let mut seen_current = false;
    let snapshots = names
      .iter()
      .map(|name| {
        let is_current = name.is_current() && !seen_current;
        seen_current |= is_current;
        let created_at = self.creation_date(name).unwrap_or_else(|err| {
          log::debug!("no creation date for {name}: {err}");
          None
        });
        let counterpart = remote.then(|| counterpart_of(name));
        let sync_status = self
          .compare_ahead_behind(&name.qualified(), counterpart.as_deref())
          .unwrap_or_else(|err| {
            log::debug!("sync status for {name} undetermined: {err}");
            SyncStatus::Undetermined
          });
        BranchSnapshot {
          name: name.as_str().to_string(),
          is_merged: merged.contains(&name.qualified()),
          is_current,
          created_at,
          sync_status,
        }
      })
      .collect();
    Ok(snapshots)
  }
}

/// Remote ref a branch is compared against. Remote names compare with themselves.
fn counterpart_of(name: &BranchName) -> String {
  if name.is_remote() {
    name.qualified()
  } else {
    format!("{DEFAULT_REMOTE}/{}", name.as_str())
  }
}

/// [`BranchRepository`] backed by the `git` CLI.
pub struct GitBranchRepository<'a> {
  shell: &'a dyn Shell,
}

impl<'a> GitBranchRepository<'a> {
  pub fn new(shell: &'a dyn Shell) -> Self {
    Self { shell }
  }
}

/// Turn `git branch` output into names, skipping symbolic refs and detached HEAD entries.
fn parse_listing(output: &str, location: BranchLocation) -> Vec<BranchName> {
  output
    .lines()
    .filter(|line| !line.trim().is_empty() && !line.contains("->"))
    .map(|line| match location {
      BranchLocation::Local => BranchName::local(line),
      BranchLocation::Remote => BranchName::remote(line),
      BranchLocation::Both => BranchName::any(line),
    })
    .filter(|name| !name.as_str().starts_with('('))
    .collect()
}

impl BranchRepository for GitBranchRepository<'_> {
  fn list_names(&self, location: BranchLocation) -> Result<Vec<BranchName>> {
    let args: &[&str] = match location {
      BranchLocation::Local => &["branch", "--no-color"],
      BranchLocation::Remote => &["branch", "--no-color", "--remotes"],
      BranchLocation::Both => &["branch", "--no-color", "--all"],
    };
    let output = self.shell.git(args)?;
    Ok(parse_listing(&output, location))
  }

  fn merged_names(&self, reference: &str, include_remote: bool) -> Result<HashSet<String>> {
    let (args, location) = if include_remote {
      (
        vec!["branch", "--no-color", "--all", "--merged", reference],
        BranchLocation::Both,
      )
    } else {
      (
        vec!["branch", "--no-color", "--merged", reference],
        BranchLocation::Local,
      )
    };
    let output = self.shell.git(&args)?;
    Ok(
      parse_listing(&output, location)
        .iter()
        .map(BranchName::qualified)
        .collect(),
    )
  }

  fn creation_date(&self, name: &BranchName) -> Result<Option<DateTime<FixedOffset>>> {
    let full_ref = name.full_ref();
    let output = self.shell.git(&[
      "for-each-ref",
      "--format=%(creatordate:iso-strict)",
      &full_ref,
    ])?;
    let stamp = output.trim();
    if stamp.is_empty() {
      return Ok(None);
    }
    Ok(DateTime::parse_from_rfc3339(stamp).ok())
  }

  fn compare_ahead_behind(
    &self,
    local: &str,
    remote_counterpart: Option<&str>,
  ) -> Result<SyncStatus> {
    let Some(remote) = remote_counterpart else {
      return Ok(SyncStatus::NoRemoteCounterpart);
    };
    let range = format!("{local}...{remote}");
    match self
      .shell
      .git(&["rev-list", "--left-right", "--count", &range])
    {
      Ok(output) => Ok(sync::resolve(true, Some(&output))),
      Err(BranchError::ExternalCommandFailed { .. }) => Ok(sync::resolve(true, None)),
      Err(err) => Err(err),
    }
  }

  fn has_remote(&self) -> Result<bool> {
    let output = self.shell.git(&["remote"])?;
    Ok(output.lines().any(|line| !line.trim().is_empty()))
  }

  fn fetch(&self) -> Result<()> {
    self.shell.git(&["fetch", "--quiet"])?;
    Ok(())
  }

  fn current_branch(&self) -> Result<Option<String>> {
    match self.shell.git(&["symbolic-ref", "--quiet", "--short", "HEAD"]) {
      Ok(output) => Ok(Some(output.trim().to_string())),
      // Exit code 1 means HEAD is detached
      Err(BranchError::ExternalCommandFailed {
        exit_code: Some(1), ..
      }) => Ok(None),
      Err(err) => Err(err),
    }
  }
}
