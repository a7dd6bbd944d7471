use anyhow::Result;

use crate::config::AppContext;
use crate::git::BranchLocation;
use crate::utils::log::t;
use crate::workflows::{SwitchOutcome, SwitchWorkflow};
use crate::{log_info, log_warn};

pub fn run(ctx: &AppContext, search: Option<&str>, location: BranchLocation) -> Result<()> {
  let outcome = super::with_tools(ctx, |tools| {
    Ok(SwitchWorkflow::new(tools).run(search, location)?)
  })?;
  match outcome {
    SwitchOutcome::Switched { .. } => {}
    SwitchOutcome::NoMatch { search } => log_warn!("No branch matches '{}'", search),
    SwitchOutcome::AlreadyOn { branch } => log_info!("Already on {}", t::branch(branch)),
  }
  Ok(())
}
