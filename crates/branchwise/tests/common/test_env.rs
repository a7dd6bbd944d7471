use anyhow::Result;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempDir};

/// A scratch workspace holding a work repository and, optionally, a bare remote.
///
/// Every git and branchwise invocation gets the same isolated identity, home
/// and XDG config dir so the developer's own git config never leaks in.
#[derive(Debug)]
pub struct TestEnv {
  temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = Builder::new()
      .prefix("branchwise-test-")
      .tempdir_in(tmp_root())
      .expect("temp dir");
    for dir in ["work", "home", "xdg"] {
      std::fs::create_dir_all(temp.path().join(dir)).expect("create test dir");
    }
    Self { temp }
  }

  pub fn root(&self) -> &Path {
    self.temp.path()
  }

  /// The work repository every command runs in.
  pub fn path(&self) -> PathBuf {
    self.temp.path().join("work")
  }

  pub fn remote_path(&self) -> PathBuf {
    self.temp.path().join("remote.git")
  }

  pub fn xdg_home_dir(&self) -> PathBuf {
    self.temp.path().join("xdg")
  }

  pub fn home_dir(&self) -> PathBuf {
    self.temp.path().join("home")
  }

  pub fn env_vars(&self) -> Vec<(&'static str, String)> {
    vec![
      ("HOME", self.home_dir().display().to_string()),
      ("XDG_CONFIG_HOME", self.xdg_home_dir().display().to_string()),
      ("GIT_CONFIG_NOSYSTEM", "1".to_string()),
      ("GIT_AUTHOR_NAME", "test".to_string()),
      ("GIT_AUTHOR_EMAIL", "test@example.com".to_string()),
      ("GIT_COMMITTER_NAME", "test".to_string()),
      ("GIT_COMMITTER_EMAIL", "test@example.com".to_string()),
    ]
  }

  pub fn branchwise(&self) -> Result<Command> {
    self.branchwise_in(&self.path())
  }

  pub fn branchwise_in(&self, dir: &Path) -> Result<Command> {
    let mut cmd = Command::cargo_bin("branchwise")?;
    cmd.current_dir(dir);
    cmd.env_remove("RUST_LOG");
    for (key, value) in self.env_vars() {
      cmd.env(key, value);
    }
    Ok(cmd)
  }

  pub fn write_xdg_config(&self, body: &str) -> Result<PathBuf> {
    let path = self.xdg_home_dir().join("branchwise").join("branchwise.toml");
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, body)?;
    Ok(path)
  }

  pub fn write_project_config(&self, body: &str) -> Result<PathBuf> {
    let path = self.path().join(".branchwise.toml");
    std::fs::write(&path, body)?;
    Ok(path)
  }
}

/// Returns a workspace-local temp root under `./target/test-tmp` at the workspace root.
pub fn tmp_root() -> PathBuf {
  let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  let workspace_root = manifest_dir
    .parent()
    .and_then(|parent| parent.parent())
    .unwrap_or(&manifest_dir)
    .to_path_buf();
  let root = workspace_root.join("target").join("test-tmp");
  let _ = std::fs::create_dir_all(&root);
  root
}
