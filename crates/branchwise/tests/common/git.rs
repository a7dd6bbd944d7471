use crate::common::test_env::TestEnv;
use anyhow::{Context, Result, anyhow};
use std::path::Path;

impl TestEnv {
  pub fn git_in(&self, dir: &Path, args: &[&str]) -> Result<String> {
    let mut cmd = std::process::Command::new("git");
    cmd.current_dir(dir).args(args);
    for (key, value) in self.env_vars() {
      cmd.env(key, value);
    }
    let output = cmd.output().context("run git command")?;
    if !output.status.success() {
      return Err(anyhow!(
        "git {:?} failed with status {status} and stderr: {stderr}",
        args,
        status = output.status,
        stderr = String::from_utf8_lossy(&output.stderr)
      ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  pub fn git(&self, args: &[&str]) -> Result<String> {
    self.git_in(&self.path(), args)
  }

  /// Initialize the work repository with one commit on `main`.
  pub fn init_repo(&self) -> Result<()> {
    self.git(&["init", "--quiet", "--initial-branch=main"])?;
    self.commit("init")
  }

  /// Initialize the work repository plus a bare `origin` that has `main`.
  pub fn init_repo_with_remote(&self) -> Result<()> {
    self.init_repo()?;
    let remote = self.remote_path();
    self.git_in(
      self.root(),
      &[
        "init",
        "--quiet",
        "--bare",
        "--initial-branch=main",
        &remote.display().to_string(),
      ],
    )?;
    self.git(&["remote", "add", "origin", &remote.display().to_string()])?;
    self.git(&["push", "--quiet", "-u", "origin", "main"])?;
    Ok(())
  }

  pub fn commit(&self, message: &str) -> Result<()> {
    self.git(&["commit", "--quiet", "--allow-empty", "-m", message])?;
    Ok(())
  }

  pub fn create_branch(&self, name: &str) -> Result<()> {
    self.git(&["branch", name])?;
    Ok(())
  }

  /// Create `name` with one commit the default branch does not have.
  pub fn create_unmerged_branch(&self, name: &str) -> Result<()> {
    self.git(&["checkout", "--quiet", "-b", name])?;
    self.commit(&format!("work on {name}"))?;
    self.git(&["checkout", "--quiet", "main"])?;
    Ok(())
  }

  pub fn current_branch(&self) -> Result<String> {
    self.git(&["symbolic-ref", "--short", "HEAD"])
  }

  pub fn branch_exists(&self, name: &str) -> Result<bool> {
    let full = format!("refs/heads/{name}");
    let out = self.git(&["for-each-ref", "--format=%(refname)", &full])?;
    Ok(!out.is_empty())
  }

  pub fn upstream_of(&self, name: &str) -> Result<String> {
    self.git(&["rev-parse", "--abbrev-ref", &format!("{name}@{{upstream}}")])
  }
}
