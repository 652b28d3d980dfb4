//! Orchestration of the two bulk procedures.
//!
//! [`RolloutRunner`] lists an organization's repositories and rolls a file
//! out to the matching ones via pull requests. [`BranchRunner`] creates one
//! branch across a fleet picked from the catalog. Both process repositories
//! one at a time and never let a single repository's failure end the run.

mod branches;
mod error;
mod rollout;

pub use branches::{BranchRunOutcome, BranchRunner};
pub use error::RunnerError;
pub use rollout::RolloutRunner;
