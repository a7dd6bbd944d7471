use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod utils;
pub mod workflows;

#[cfg(test)]
mod testing;

use crate::config::AppContext;
use crate::git::BranchLocation;

/// Branchwise - fuzzy branch switching, cleanup and creation on top of git.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
  /// Show the git commands being run
  #[arg(short, long, global = true)]
  verbose: bool,
  #[command(subcommand)]
  command: Commands,
}

#[derive(Debug, Args)]
struct ScopeArgs {
  /// Only consider remote-tracking branches
  #[arg(short, long, conflicts_with = "all")]
  remote: bool,
  /// Consider local and remote-tracking branches
  #[arg(short, long)]
  all: bool,
}

impl ScopeArgs {
  fn location(&self) -> BranchLocation {
    match (self.remote, self.all) {
      (true, _) => BranchLocation::Remote,
      (_, true) => BranchLocation::Both,
      _ => BranchLocation::Local,
    }
  }
}

#[derive(Debug, Subcommand)]
enum Commands {
  /// Switch to a branch, prompting when the search is ambiguous
  #[command(visible_alias = "sw")]
  Switch {
    /// Case-insensitive part of the branch name
    search: Option<String>,
    #[command(flatten)]
    scope: ScopeArgs,
  },
  /// Delete local branches, forcing only after confirmation
  #[command(visible_alias = "rm")]
  Delete {
    /// Case-insensitive part of the branch name
    search: Option<String>,
    /// Delete every merged branch after a single confirmation
    #[arg(short = 'm', long)]
    all_merged: bool,
  },
  /// Create a branch after syncing the default branch with its remote
  Create { name: String },
  /// Create a local tracking branch for a remote branch
  #[command(visible_alias = "co")]
  CheckoutRemote {
    /// Case-insensitive part of the branch name
    search: Option<String>,
  },
  /// Show branches with their merge and sync state
  #[command(visible_alias = "ls")]
  List {
    #[command(flatten)]
    scope: ScopeArgs,
  },
  /// Show the effective configuration
  Config,
}

pub fn parse() -> Cli {
  Cli::parse()
}

fn init_logging(verbose: bool) {
  let level = if verbose { "debug" } else { "warn" };
  let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
    .format_timestamp(None)
    .try_init();
}

pub fn run() -> Result<()> {
  let cli = parse();
  init_logging(cli.verbose);
  let cwd = std::env::current_dir()?;
  let ctx = AppContext::discover(&cwd)?;

  match cli.command {
    Commands::Switch { search, scope } => {
      commands::switch::run(&ctx, search.as_deref(), scope.location())?;
    }
    Commands::Delete { search, all_merged } => {
      commands::delete::run(&ctx, search.as_deref(), all_merged)?;
    }
    Commands::Create { name } => {
      commands::create::run(&ctx, &name)?;
    }
    Commands::CheckoutRemote { search } => {
      commands::checkout_remote::run(&ctx, search.as_deref())?;
    }
    Commands::List { scope } => {
      commands::list::run(&ctx, scope.location())?;
    }
    Commands::Config => {
      commands::config::run(&ctx)?;
    }
  }

  Ok(())
}
