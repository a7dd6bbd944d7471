use std::fmt;

/// Prefix `git branch` puts in front of the checked-out branch.
pub const CURRENT_MARKER: &str = "* ";
/// Prefix `git branch` puts in front of branches checked out in another worktree.
const WORKTREE_MARKER: &str = "+ ";
/// Prefix of remote-tracking branches in `git branch --all` listings.
const REMOTES_PREFIX: &str = "remotes/";
/// The remote that tracking branches are created against.
pub const DEFAULT_REMOTE: &str = "origin";

/// A branch name as reported by `git branch`, parsed once at the repository boundary.
///
/// Keeps the raw listing token for diagnostics, but every comparison, lookup
/// and display downstream goes through the normalized [`BranchName::as_str`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchName {
  raw: String,
  name: String,
  remote: Option<String>,
  is_current: bool,
}

impl BranchName {
  /// Parse a line of `git branch` (local branches only).
  #[must_use]
  pub fn local(raw: &str) -> Self {
    let (is_current, rest) = strip_markers(raw);
    Self {
      raw: raw.trim().to_string(),
      name: rest.to_string(),
      remote: None,
      is_current,
    }
  }

  /// Parse a line of `git branch --remotes`; the first path segment is the remote.
  #[must_use]
  pub fn remote(raw: &str) -> Self {
    let (is_current, rest) = strip_markers(raw);
    let rest = rest.strip_prefix(REMOTES_PREFIX).unwrap_or(rest);
    let (remote, name) = match rest.split_once('/') {
      Some((remote, name)) if !remote.is_empty() && !name.is_empty() => {
        (Some(remote.to_string()), name.to_string())
      }
      _ => (None, rest.to_string()),
    };
    Self {
      raw: raw.trim().to_string(),
      name,
      remote,
      is_current,
    }
  }

  /// Parse a line of `git branch --all`, where remote branches carry `remotes/`.
  #[must_use]
  pub fn any(raw: &str) -> Self {
    let (_, rest) = strip_markers(raw);
    if rest.starts_with(REMOTES_PREFIX) {
      Self::remote(raw)
    } else {
      Self::local(raw)
    }
  }

  /// The token exactly as git listed it, whitespace trimmed.
  #[must_use]
  pub fn raw(&self) -> &str {
    &self.raw
  }

  /// Normalized name: no marker, no remote prefix.
  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.name
  }

  #[must_use]
  pub fn is_remote(&self) -> bool {
    self.remote.is_some()
  }

  #[must_use]
  pub fn is_current(&self) -> bool {
    self.is_current
  }

  /// The revision git resolves for this branch: `dev` or `origin/dev`.
  #[must_use]
  pub fn qualified(&self) -> String {
    match &self.remote {
      Some(remote) => format!("{remote}/{}", self.name),
      None => self.name.clone(),
    }
  }

  /// Full ref path, e.g. `refs/heads/dev` or `refs/remotes/origin/dev`.
  #[must_use]
  pub fn full_ref(&self) -> String {
    match &self.remote {
      Some(remote) => format!("refs/remotes/{remote}/{}", self.name),
      None => format!("refs/heads/{}", self.name),
    }
  }
}

impl fmt::Display for BranchName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}

fn strip_markers(raw: &str) -> (bool, &str) {
  let trimmed = raw.trim();
  if let Some(rest) = trimmed.strip_prefix(CURRENT_MARKER) {
    return (true, rest.trim_start());
  }
  if let Some(rest) = trimmed.strip_prefix(WORKTREE_MARKER) {
    return (false, rest.trim_start());
  }
  (false, trimmed)
}

/// Strip the current marker and any `remotes/` or `origin/` prefix.
///
/// Repeats until nothing changes, so `normalize(normalize(x)) == normalize(x)`.
#[must_use]
pub fn normalize(raw: &str) -> String {
  let (_, mut name) = strip_markers(raw);
  loop {
    let next = name
      .strip_prefix(REMOTES_PREFIX)
      .or_else(|| {
        name
          .strip_prefix(DEFAULT_REMOTE)
          .and_then(|rest| rest.strip_prefix('/'))
      })
      .unwrap_or(name);
    if next == name || next.is_empty() {
      return name.to_string();
    }
    name = next;
  }
}

/// True when `search` is absent or only whitespace.
#[must_use]
pub fn is_blank(search: Option<&str>) -> bool {
  search.is_none_or(|s| s.trim().is_empty())
}

/// Case-insensitive substring search over normalized names.
#[derive(Debug, Clone)]
pub struct BranchFilter {
  needle: String,
}

impl BranchFilter {
  #[must_use]
  pub fn new(search: &str) -> Self {
    Self {
      needle: search.trim().to_lowercase(),
    }
  }

  #[must_use]
  pub fn matches(&self, name: &str) -> bool {
    name.to_lowercase().contains(&self.needle)
  }

  /// Keep the names matching the search, preserving order.
  #[must_use]
  pub fn apply<T: AsRef<str> + Clone>(&self, names: &[T]) -> Vec<T> {
    names
      .iter()
      .filter(|n| self.matches(n.as_ref()))
      .cloned()
      .collect()
  }

  /// The entry equal to the search text, ignoring the current marker.
  #[must_use]
  pub fn exact<'a, T: AsRef<str>>(&self, search: &str, names: &'a [T]) -> Option<&'a T> {
    let wanted = normalize(search);
    names.iter().find(|n| normalize(n.as_ref()) == wanted)
  }
}

/// Unique normalized names, first occurrence wins.
#[must_use]
pub fn unique_names(names: &[BranchName]) -> Vec<String> {
  let mut seen = std::collections::BTreeSet::new();
  names
    .iter()
    .filter(|n| seen.insert(n.as_str().to_string()))
    .map(|n| n.as_str().to_string())
    .collect()
}
