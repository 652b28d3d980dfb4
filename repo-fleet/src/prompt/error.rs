//! Prompt error types.

use thiserror::Error;

/// Errors that end the interactive selection.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The operator entered an empty branch name.
    #[error("Branch name cannot be empty")]
    EmptyBranchName,

    /// A preset named an environment missing from the catalog.
    #[error("Unknown environment '{name}'")]
    UnknownEnvironment { name: String },

    /// A supplied branch name is not a valid git ref name.
    #[error(transparent)]
    InvalidBranchName(#[from] crate::config::ConfigError),

    /// Input ended before all answers were given.
    #[error("Input closed before the selection was complete")]
    InputClosed,

    /// The terminal prompt failed.
    #[error("Prompt failed: {0}")]
    Terminal(#[from] inquire::InquireError),
}
