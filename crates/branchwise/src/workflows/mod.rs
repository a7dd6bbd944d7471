//! Branch workflows: policy over typed snapshots, then a few mutating git calls.

pub mod checkout_remote;
pub mod create;
pub mod delete;
pub mod switch;

pub use checkout_remote::{CheckoutRemoteOutcome, CheckoutRemoteWorkflow, remote_candidates};
pub use create::{CreateReconciliation, Reconciliation};
pub use delete::{DeleteOutcome, DeleteRequest, DeleteWorkflow, DeletedBranch, eligible_branches};
pub use switch::{SwitchOutcome, SwitchWorkflow};

use crate::git::{BranchRepository, Shell};
use crate::utils::picker::Picker;

/// The collaborators every workflow is constructed with.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
  pub repo: &'a dyn BranchRepository,
  pub shell: &'a dyn Shell,
  pub picker: &'a dyn Picker,
}
