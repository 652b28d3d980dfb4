//! Version control error types.

use thiserror::Error;

/// Errors raised while driving the `git` executable.
#[derive(Debug, Error)]
pub enum GitError {
    /// The process could not be started.
    #[error("Failed to execute git {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran and exited unsuccessfully.
    #[error("git {command} failed: {stderr}")]
    Failed { command: String, stderr: String },
}
