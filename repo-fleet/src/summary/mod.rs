//! Run summary types and helpers.

mod branch_summary;
mod result;
mod rollout_summary;

pub use branch_summary::BranchRunSummary;
pub use result::{BranchResult, RolloutResult};
pub use rollout_summary::RolloutSummary;
