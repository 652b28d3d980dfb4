//! Branch creation error types.

use thiserror::Error;

/// Errors that fail branch creation for one repository.
#[derive(Debug, Error)]
pub enum BranchError {
    /// The base branch does not exist (404 on the ref lookup).
    #[error("Could not find the branch '{base}'")]
    BaseBranchNotFound { base: String },

    /// The ref lookup returned another non-success status.
    #[error("Fetching the head of '{base}' returned {status}: {body}")]
    LookupFailed {
        base: String,
        status: u16,
        body: String,
    },

    /// The ref creation returned a status other than 201 or 422.
    #[error("Creating the branch returned {status}: {body}")]
    CreateFailed { status: u16, body: String },

    /// Hosting API transport or decoding error.
    #[error(transparent)]
    Api(#[from] crate::api::ApiError),
}
