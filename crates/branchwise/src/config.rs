use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize as _;
use serde::Deserialize;
use toml::Value as TomlValue;

use crate::error::BranchError;

/// Known top-level config keys.
const KNOWN_KEYS: &[&str] = &["default_branch", "prune_on_delete", "rebase_on_default_branch"];

/// Project config file name, looked up at the repository root.
pub const PROJECT_CONFIG_FILE: &str = ".branchwise.toml";

// Embed repository defaults
const DEFAULT_TOML: &str =
  include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/defaults/branchwise.toml"));

/// Read-only settings the branch workflows consult.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BranchConfig {
  /// The trunk branch: never deleted, target of merge checks.
  pub default_branch: String,
  /// Prune remote-tracking refs after deleting branches.
  pub prune_on_delete: bool,
  /// Put the cursor on "rebase" when the default branch is behind its remote.
  pub rebase_on_default_branch: bool,
}

impl Default for BranchConfig {
  fn default() -> Self {
    Self {
      default_branch: "main".to_string(),
      prune_on_delete: true,
      rebase_on_default_branch: false,
    }
  }
}

/// Resolve the global config file path.
///
/// # Errors
/// Returns an error if the XDG config home cannot be resolved.
pub fn global_config_path() -> Result<PathBuf> {
  let xdg = xdg::BaseDirectories::with_prefix("branchwise");
  let config_home = xdg
    .get_config_home()
    .ok_or_else(|| anyhow::anyhow!("unable to resolve XDG config home"))?;
  Ok(config_home.join("branchwise.toml"))
}

#[must_use]
pub fn project_config_path(root: &Path) -> PathBuf {
  root.join(PROJECT_CONFIG_FILE)
}

fn merge_values(base: &mut TomlValue, overlay: TomlValue) {
  match (base, overlay) {
    (TomlValue::Table(base_tbl), TomlValue::Table(overlay_tbl)) => {
      for (k, v) in overlay_tbl {
        match base_tbl.get_mut(&k) {
          Some(existing) => merge_values(existing, v),
          None => {
            base_tbl.insert(k, v);
          }
        }
      }
    }
    // Scalars: last wins
    (base_slot, new_v) => *base_slot = new_v,
  }
}

/// Warn about unknown keys so typos do not silently fall back to defaults.
fn warn_unknown_keys(val: &TomlValue, file_path: &Path) {
  let TomlValue::Table(table) = val else {
    return;
  };
  for key in table.keys() {
    if !KNOWN_KEYS.contains(&key.as_str()) {
      anstream::eprintln!(
        "{}: unknown config key '{}' in {} (known keys: {})",
        "warning".yellow(),
        key,
        file_path.display(),
        KNOWN_KEYS.join(", ")
      );
    }
  }
}

fn read_overlay(path: &Path) -> Result<TomlValue> {
  let data =
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let val: TomlValue =
    toml::from_str(&data).with_context(|| format!("invalid TOML in {}", path.display()))?;
  warn_unknown_keys(&val, path);
  Ok(val)
}

/// Load and merge configuration from defaults, the global file and the project file.
///
/// Returns the config together with the files that contributed to it.
///
/// # Errors
/// Returns an error if a config file cannot be read or parsed, or if the
/// merged values have the wrong types.
pub fn load_config(root: &Path) -> Result<(BranchConfig, Vec<PathBuf>)> {
  let mut merged: TomlValue =
    toml::from_str(DEFAULT_TOML).context("invalid embedded default config")?;
  let mut sources = Vec::new();

  let xdg = xdg::BaseDirectories::with_prefix("branchwise");
  if let Some(global_path) = xdg.find_config_file("branchwise.toml") {
    merge_values(&mut merged, read_overlay(&global_path)?);
    sources.push(global_path);
  }

  let project_cfg = project_config_path(root);
  if project_cfg.exists() {
    merge_values(&mut merged, read_overlay(&project_cfg)?);
    sources.push(project_cfg);
  }

  // Deserialize into strongly typed config
  let merged_str = toml::to_string(&merged).context("failed to serialize merged config")?;
  let cfg: BranchConfig = toml::from_str(&merged_str).context("failed to parse merged config")?;
  log::debug!("loaded config {cfg:?} from {sources:?}");
  Ok((cfg, sources))
}

/// Everything a command needs: where the repository is and how to treat it.
#[derive(Debug, Clone)]
pub struct AppContext {
  pub root: PathBuf,
  pub config: BranchConfig,
  pub config_sources: Vec<PathBuf>,
}

impl AppContext {
  /// Discover the repository containing `cwd` and load its configuration.
  ///
  /// # Errors
  /// Fails with [`BranchError::ConfigurationAbsent`] outside a git work tree.
  pub fn discover(cwd: &Path) -> Result<Self> {
    let repo = gix::discover(cwd).map_err(|err| {
      log::debug!("repository discovery failed: {err}");
      BranchError::ConfigurationAbsent(cwd.to_path_buf())
    })?;
    let root = repo
      .workdir()
      .map(Path::to_path_buf)
      .ok_or_else(|| BranchError::ConfigurationAbsent(cwd.to_path_buf()))?;
    let (config, config_sources) = load_config(&root)?;
    Ok(Self {
      root,
      config,
      config_sources,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;
  use temp_env::with_var;

  #[test]
  #[serial(xdg)]
  fn defaults_apply_without_files() {
    let home = tempfile::tempdir().unwrap();
    let repo = tempfile::tempdir().unwrap();
    with_var("XDG_CONFIG_HOME", Some(home.path()), || {
      let (cfg, sources) = load_config(repo.path()).unwrap();
      assert_eq!(cfg, BranchConfig::default());
      assert!(sources.is_empty());
    });
  }

  #[test]
  #[serial(xdg)]
  fn project_overrides_global() {
    let home = tempfile::tempdir().unwrap();
    let repo = tempfile::tempdir().unwrap();
    let global_dir = home.path().join("branchwise");
    fs::create_dir_all(&global_dir).unwrap();
    fs::write(
      global_dir.join("branchwise.toml"),
      "default_branch = \"develop\"\nprune_on_delete = false\n",
    )
    .unwrap();
    fs::write(
      repo.path().join(PROJECT_CONFIG_FILE),
      "default_branch = \"trunk\"\n",
    )
    .unwrap();
    with_var("XDG_CONFIG_HOME", Some(home.path()), || {
      let (cfg, sources) = load_config(repo.path()).unwrap();
      assert_eq!(cfg.default_branch, "trunk");
      assert!(!cfg.prune_on_delete);
      assert!(!cfg.rebase_on_default_branch);
      assert_eq!(sources.len(), 2);
    });
  }

  #[test]
  #[serial(xdg)]
  fn wrong_type_is_an_error() {
    let home = tempfile::tempdir().unwrap();
    let repo = tempfile::tempdir().unwrap();
    fs::write(
      repo.path().join(PROJECT_CONFIG_FILE),
      "prune_on_delete = \"sometimes\"\n",
    )
    .unwrap();
    with_var("XDG_CONFIG_HOME", Some(home.path()), || {
      let err = load_config(repo.path()).expect_err("string is not a bool");
      assert!(format!("{err:#}").contains("failed to parse merged config"));
    });
  }

  #[test]
  fn discover_outside_repository_is_configuration_absent() {
    let dir = tempfile::tempdir().unwrap();
    let err = AppContext::discover(dir.path()).expect_err("not a repo");
    assert!(matches!(
      err.downcast_ref::<BranchError>(),
      Some(BranchError::ConfigurationAbsent(_))
    ));
  }
}
