//! Per-repository result types.

use crate::pull_requests::ReviewerStatus;

/// Result of rolling the payload out to one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RolloutResult {
    /// Branch pushed and pull request opened.
    PullRequestOpened {
        /// Repository full name.
        repository: String,
        /// Pull request URL.
        url: String,
        /// Reviewer request outcome.
        reviewers: ReviewerStatus,
    },

    /// The branch could not be published; no pull request was attempted.
    PublishFailed {
        /// Repository full name.
        repository: String,
        /// Error message.
        error: String,
    },

    /// The branch was pushed but the pull request was not created.
    PullRequestFailed {
        /// Repository full name.
        repository: String,
        /// Error message.
        error: String,
    },
}

impl RolloutResult {
    /// Returns the pull request URL, if one was created.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::PullRequestOpened { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Result of creating the branch in one repository of a fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchResult {
    /// The branch was created.
    Created {
        /// Repository full name.
        repository: String,
    },

    /// The branch already existed.
    AlreadyExists {
        /// Repository full name.
        repository: String,
    },

    /// Creation failed.
    Failed {
        /// Repository full name.
        repository: String,
        /// Error message.
        error: String,
    },
}
