//! Hosting API error types.

use thiserror::Error;

/// Errors raised below the HTTP status level.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Request to '{route}' failed: {message}")]
    Transport { route: String, message: String },

    /// The client could not be constructed.
    #[error("Failed to build GitHub client: {0}")]
    Client(#[source] octocrab::Error),

    /// A response body did not match the expected shape.
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}
