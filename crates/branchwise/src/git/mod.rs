mod name;
mod repository;
mod shell;
mod sync;

// Re-export public APIs from name module
pub use name::{BranchFilter, BranchName, DEFAULT_REMOTE, is_blank, normalize, unique_names};

// Re-export public APIs from repository module
pub use repository::{BranchLocation, BranchRepository, BranchSnapshot, GitBranchRepository};

// Re-export public APIs from shell module
pub use shell::{GitShell, Shell};

// Re-export public APIs from sync module
pub use sync::{SyncStatus, classify, parse_ahead_behind, resolve};
