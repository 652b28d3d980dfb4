//! Runner error types.

use std::path::PathBuf;

/// Fatal errors that stop a run before or between repositories.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration and input loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Api(#[from] crate::api::ApiError),

    /// Operator input errors.
    #[error(transparent)]
    Prompt(#[from] crate::prompt::PromptError),

    /// The pull request URL file could not be written.
    #[error("Failed to write '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
