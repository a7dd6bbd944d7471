use anyhow::Result;
use owo_colors::OwoColorize as _;

use crate::config::{AppContext, global_config_path, project_config_path};
use crate::utils::log::t;
use crate::utils::term::print_table;

/// Print the effective settings and the files they were read from.
pub fn run(ctx: &AppContext) -> Result<()> {
  let cfg = &ctx.config;
  let rows = vec![
    vec!["default_branch".to_string(), t::branch(&cfg.default_branch)],
    vec!["prune_on_delete".to_string(), cfg.prune_on_delete.to_string()],
    vec![
      "rebase_on_default_branch".to_string(),
      cfg.rebase_on_default_branch.to_string(),
    ],
  ];
  print_table(&["KEY", "VALUE"], &rows);

  anstream::println!();
  if ctx.config_sources.is_empty() {
    anstream::println!("{}", "Using built-in defaults".dimmed());
  } else {
    for source in &ctx.config_sources {
      anstream::println!("{} {}", "from".dimmed(), source.display());
    }
  }
  let global = global_config_path()?;
  if !ctx.config_sources.contains(&global) {
    anstream::println!(
      "{} {}",
      "global settings go in".dimmed(),
      global.display()
    );
  }
  let project = project_config_path(&ctx.root);
  if !ctx.config_sources.contains(&project) {
    anstream::println!(
      "{} {}",
      "project overrides go in".dimmed(),
      project.display()
    );
  }
  Ok(())
}
