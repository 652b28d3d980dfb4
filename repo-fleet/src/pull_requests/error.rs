//! Pull request error types.

use thiserror::Error;

/// Errors that can occur while opening a pull request.
#[derive(Debug, Error)]
pub enum PrError {
    /// Hosting API transport or decoding error.
    #[error(transparent)]
    Api(#[from] crate::api::ApiError),

    /// The creation request was answered with something other than 201.
    #[error("Pull request creation returned {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}
