use std::fmt;

/// How a local branch relates to its remote-tracking counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncStatus {
  Ahead,
  Behind,
  InSync,
  Diverged,
  /// The comparison ran but its output could not be interpreted.
  Undetermined,
  /// No remote is configured, or the counterpart ref does not exist.
  NoRemoteCounterpart,
}

impl SyncStatus {
  #[must_use]
  pub fn label(self) -> &'static str {
    match self {
      SyncStatus::Ahead => "ahead",
      SyncStatus::Behind => "behind",
      SyncStatus::InSync => "in sync",
      SyncStatus::Diverged => "diverged",
      SyncStatus::Undetermined => "undetermined",
      SyncStatus::NoRemoteCounterpart => "no remote",
    }
  }
}

impl fmt::Display for SyncStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// Map commit counts unique to each side onto a status.
#[must_use]
pub fn classify(ahead: u64, behind: u64) -> SyncStatus {
  match (ahead, behind) {
    (0, 0) => SyncStatus::InSync,
    (_, 0) => SyncStatus::Ahead,
    (0, _) => SyncStatus::Behind,
    _ => SyncStatus::Diverged,
  }
}

/// Parse `git rev-list --left-right --count` output: exactly `"<ahead>\t<behind>"`.
#[must_use]
pub fn parse_ahead_behind(output: &str) -> Option<(u64, u64)> {
  let mut parts = output.trim().split('\t');
  let ahead = parts.next()?.parse::<u64>().ok()?;
  let behind = parts.next()?.parse::<u64>().ok()?;
  if parts.next().is_some() {
    return None;
  }
  Some((ahead, behind))
}

/// Combine remote availability and the comparison output into a status.
///
/// `comparison` is `None` when the comparison command failed.
#[must_use]
pub fn resolve(remote_configured: bool, comparison: Option<&str>) -> SyncStatus {
  let Some(output) = comparison.filter(|_| remote_configured) else {
    return SyncStatus::NoRemoteCounterpart;
  };
  match parse_ahead_behind(output) {
    Some((ahead, behind)) => classify(ahead, behind),
    None => SyncStatus::Undetermined,
  }
}
