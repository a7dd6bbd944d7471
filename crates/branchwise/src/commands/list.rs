use anyhow::Result;
use owo_colors::OwoColorize as _;

use crate::config::AppContext;
use crate::git::{BranchLocation, BranchName, BranchSnapshot};
use crate::log_info;
use crate::utils::log::t;
use crate::utils::term::print_table;

const HEADERS: [&str; 5] = ["", "BRANCH", "MERGED", "SYNC", "CREATED"];

pub fn run(ctx: &AppContext, location: BranchLocation) -> Result<()> {
  let default_branch = ctx.config.default_branch.as_str();
  let (names, snapshots) = super::with_tools(ctx, |tools| {
    let names = tools.repo.list_names(location)?;
    let snapshots = tools.repo.load_snapshots(&names, default_branch)?;
    Ok((names, snapshots))
  })?;
  if names.is_empty() {
    log_info!("No branches found");
    return Ok(());
  }
  let rows: Vec<Vec<String>> = names
    .iter()
    .zip(&snapshots)
    .map(|(name, snapshot)| row(name, snapshot))
    .collect();
  print_table(&HEADERS, &rows);
  Ok(())
}

fn row(name: &BranchName, snapshot: &BranchSnapshot) -> Vec<String> {
  let marker = if snapshot.is_current { "*" } else { "" };
  let label = if snapshot.is_current {
    t::branch(name.qualified())
  } else {
    name.qualified()
  };
  let merged = if snapshot.is_merged {
    t::ok("yes")
  } else {
    format!("{}", "no".dimmed())
  };
  let created = snapshot
    .created_at
    .map_or_else(|| "-".to_string(), |at| at.format("%Y-%m-%d").to_string());
  vec![
    marker.to_string(),
    label,
    merged,
    t::status(snapshot.sync_status),
    created,
  ]
}
