use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{BranchError, Result};

/// The only way the engine talks to git.
///
/// Implementations run `git <args>` to completion and return its stdout.
/// A non-zero exit must surface as [`BranchError::ExternalCommandFailed`]
/// carrying the combined stdout and stderr.
pub trait Shell {
  fn git(&self, args: &[&str]) -> Result<String>;
}

/// Runs git as a child process inside a repository working directory.
#[derive(Debug, Clone)]
pub struct GitShell {
  cwd: PathBuf,
}

impl GitShell {
  pub fn new(cwd: impl Into<PathBuf>) -> Self {
    Self { cwd: cwd.into() }
  }
}

impl Shell for GitShell {
  fn git(&self, args: &[&str]) -> Result<String> {
    let command = render_command(args);
    log::debug!("run {command} in {}", self.cwd.display());
    let output = Command::new("git")
      .current_dir(&self.cwd)
      .args(args)
      .stdin(Stdio::null())
      .output()
      .map_err(|source| BranchError::Spawn {
        command: command.clone(),
        source,
      })?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if output.status.success() {
      return Ok(stdout);
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let combined = format!("{}\n{}", stdout.trim(), stderr.trim());
    log::debug!("{command} exited with {}", output.status);
    Err(BranchError::ExternalCommandFailed {
      exit_code: output.status.code(),
      command,
      output: combined.trim().to_string(),
    })
  }
}

/// Render an argv the way a user would type it, quoting where needed.
pub(crate) fn render_command(args: &[&str]) -> String {
  format!("git {}", shell_words::join(args))
}
