//! Branch publishing error types.

use thiserror::Error;

/// Errors that stop a branch from being published.
#[derive(Debug, Error)]
pub enum PublishError {
    /// A working copy exists and the policy forbids reusing it.
    #[error("Working copy '{path}' already exists and reuse is disabled")]
    StaleWorkingCopy { path: String },

    /// A git step failed.
    #[error(transparent)]
    Git(#[from] crate::git::GitError),

    /// Writing the payload failed.
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
