use anyhow::Result;

use crate::config::AppContext;
use crate::workflows::{CheckoutRemoteOutcome, CheckoutRemoteWorkflow};
use crate::{log_info, log_warn};

pub fn run(ctx: &AppContext, search: Option<&str>) -> Result<()> {
  let outcome = super::with_tools(ctx, |tools| {
    Ok(CheckoutRemoteWorkflow::new(tools).run(search)?)
  })?;
  match outcome {
    CheckoutRemoteOutcome::NoRemoteBranches => log_warn!("No remote branches found"),
    CheckoutRemoteOutcome::AllExistLocally => {
      log_info!("Every remote branch already exists locally");
    }
    CheckoutRemoteOutcome::NoMatch { search } => {
      log_warn!("No remote branch matches '{}'", search);
    }
    CheckoutRemoteOutcome::CheckedOut { .. } => {}
  }
  Ok(())
}
