use anyhow::Result;

use crate::config::AppContext;
use crate::utils::log::t;
use crate::workflows::{DeleteOutcome, DeleteRequest, DeleteWorkflow};
use crate::{log_info, log_success};

pub fn run(ctx: &AppContext, search: Option<&str>, all_merged: bool) -> Result<()> {
  let request = DeleteRequest { search, all_merged };
  let outcome = super::with_tools(ctx, |tools| {
    Ok(DeleteWorkflow::new(tools, &ctx.config).run(request)?)
  })?;
  match outcome {
    DeleteOutcome::NoMatch { search } => log_info!("No deletable branch matches '{}'", search),
    DeleteOutcome::NothingMerged => {}
    DeleteOutcome::NothingSelected => log_info!("Nothing selected"),
    DeleteOutcome::Deleted { branches, .. } => {
      let forced = branches.iter().filter(|b| b.forced).count();
      if forced > 0 {
        log_success!(
          "Deleted {} branch(es), {} forced",
          t::count(branches.len()),
          t::count(forced)
        );
      } else {
        log_success!("Deleted {} branch(es)", t::count(branches.len()));
      }
    }
  }
  Ok(())
}
