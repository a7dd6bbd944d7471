//! Typed failures of the branch engine.
//!
//! Workflows return these so the CLI layer can tell "nothing to do" apart
//! from real failures and render each one accordingly.

use std::path::PathBuf;

use thiserror::Error;

use crate::git::SyncStatus;

#[derive(Debug, Error)]
pub enum BranchError {
  /// No git repository was found at or above the working directory.
  #[error("not a git repository (or any parent): {}", .0.display())]
  ConfigurationAbsent(PathBuf),

  /// Every local branch is either checked out or the default branch.
  #[error("no branches eligible for deletion (only `{default_branch}` and the current branch exist)")]
  NoEligibleBranches { default_branch: String },

  /// A selection was required but there was nothing to choose from.
  #[error("no branches available to {action}")]
  NoBranchesAvailable { action: String },

  /// The default branch cannot be reconciled with its remote automatically.
  #[error("cannot reconcile `{branch}` with its remote automatically (status: {status}); resolve it manually first")]
  UnsafeDivergence { branch: String, status: SyncStatus },

  /// The user declined a confirmation that was required to continue.
  #[error("permission denied: {0}")]
  PermissionDenied(String),

  #[error("`{command}` failed with exit code {}: {output}", exit_code_label(.exit_code))]
  ExternalCommandFailed {
    exit_code: Option<i32>,
    command: String,
    output: String,
  },

  #[error("failed to run `{command}`")]
  Spawn {
    command: String,
    #[source]
    source: std::io::Error,
  },

  #[error("prompt cancelled")]
  Cancelled,

  #[error("invalid selection: {0}")]
  InvalidSelection(String),

  #[error("prompt failed: {0}")]
  Prompt(String),
}

fn exit_code_label(code: &Option<i32>) -> String {
  code.map_or_else(|| "none (terminated by signal)".to_string(), |c| c.to_string())
}

impl From<inquire::InquireError> for BranchError {
  fn from(err: inquire::InquireError) -> Self {
    match err {
      inquire::InquireError::OperationCanceled | inquire::InquireError::OperationInterrupted => {
        BranchError::Cancelled
      }
      other => BranchError::Prompt(other.to_string()),
    }
  }
}

pub type Result<T> = std::result::Result<T, BranchError>;
