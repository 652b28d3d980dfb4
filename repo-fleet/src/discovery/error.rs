//! Repository discovery error types.

use thiserror::Error;

/// Reasons a repository listing stopped early.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Hosting API transport failure.
    #[error("GitHub API error on page {page}: {source}")]
    Api {
        page: u32,
        #[source]
        source: crate::api::ApiError,
    },

    /// The API answered with a non-success status.
    #[error("Unexpected status {status} on page {page}: {body}")]
    UnexpectedStatus { page: u32, status: u16, body: String },
}
