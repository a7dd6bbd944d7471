use anyhow::{Result, bail};

use crate::config::AppContext;
use crate::log_success;
use crate::utils::log::t;
use crate::workflows::{CreateReconciliation, Reconciliation};

pub fn run(ctx: &AppContext, name: &str) -> Result<()> {
  let name = name.trim();
  if name.is_empty() {
    bail!("branch name must not be empty");
  }
  super::with_tools(ctx, |tools| {
    let reconciliation = CreateReconciliation::new(tools, &ctx.config).run()?;
    if reconciliation == Reconciliation::NotOnDefaultBranch {
      log::debug!(
        "not on {}, creating {name} from the current branch",
        ctx.config.default_branch
      );
    }
    tools.shell.git(&["checkout", "-b", name])?;
    log_success!("Created and switched to {}", t::branch(name));
    Ok(())
  })
}
