//! Rollout run summary.

use super::result::RolloutResult;
use crate::pull_requests::ReviewerStatus;

/// Summary of a pull request rollout.
#[derive(Debug, Clone, Default)]
pub struct RolloutSummary {
    /// Repositories returned by the organization listing.
    pub repositories_listed: usize,

    /// Repositories selected by the name filter.
    pub repositories_matched: usize,

    /// Whether the listing stopped on an error.
    pub listing_interrupted: bool,

    /// Branches pushed.
    pub branches_published: usize,

    /// Repositories whose branch could not be published.
    pub publish_failed: usize,

    /// Pull requests created.
    pub prs_created: usize,

    /// Pull requests that could not be created.
    pub prs_failed: usize,

    /// Pull requests whose reviewer request failed.
    pub reviewer_requests_failed: usize,

    /// Created pull request URLs that could not be written to the output file.
    pub urls_not_recorded: usize,

    /// Created pull request URLs, in creation order.
    pub pr_urls: Vec<String>,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RolloutSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with a processing result.
    pub fn record_result(&mut self, result: &RolloutResult) {
        match result {
            RolloutResult::PullRequestOpened { url, reviewers, .. } => {
                self.branches_published += 1;
                self.prs_created += 1;
                self.pr_urls.push(url.clone());
                if matches!(reviewers, ReviewerStatus::Failed { .. }) {
                    self.reviewer_requests_failed += 1;
                }
            }
            RolloutResult::PublishFailed { .. } => self.publish_failed += 1,
            RolloutResult::PullRequestFailed { .. } => {
                self.branches_published += 1;
                self.prs_failed += 1;
            }
        }
    }

    /// Returns true if any failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.listing_interrupted
            || self.publish_failed > 0
            || self.prs_failed > 0
            || self.reviewer_requests_failed > 0
            || self.urls_not_recorded > 0
    }
}
