//! Pull request status types.

use serde::Serialize;

/// Outcome of requesting reviewers on a freshly created pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReviewerStatus {
    /// Reviewers were requested (201).
    Requested,

    /// No reviewers are configured.
    Skipped,

    /// The request failed; the pull request itself stands.
    Failed {
        /// Error message.
        error: String,
    },
}

impl ReviewerStatus {
    /// Returns the status as a string for reporting.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Skipped => "skipped",
            Self::Failed { .. } => "failed",
        }
    }
}

/// A pull request created by the rollout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenedPullRequest {
    /// GitHub PR number.
    pub number: u64,

    /// `html_url` of the pull request, exactly as returned.
    pub url: String,

    /// Reviewer request outcome.
    pub reviewers: ReviewerStatus,
}
