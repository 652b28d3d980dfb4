//! Fleet branch creation summary.

use super::result::BranchResult;

/// Summary of creating one branch across a fleet.
#[derive(Debug, Clone, Default)]
pub struct BranchRunSummary {
    /// Environment the fleet came from.
    pub environment: String,

    /// Branches created.
    pub created: usize,

    /// Repositories where the branch already existed.
    pub already_existed: usize,

    /// Repositories where creation failed.
    pub failed: usize,

    /// Full names of the failed repositories.
    pub failed_repositories: Vec<String>,
}

impl BranchRunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            ..Default::default()
        }
    }

    /// Updates the summary with a processing result.
    pub fn record_result(&mut self, result: &BranchResult) {
        match result {
            BranchResult::Created { .. } => self.created += 1,
            BranchResult::AlreadyExists { .. } => self.already_existed += 1,
            BranchResult::Failed { repository, .. } => {
                self.failed += 1;
                self.failed_repositories.push(repository.clone());
            }
        }
    }

    /// Repositories counted as successful.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.created + self.already_existed
    }

    /// Returns true if every repository succeeded.
    #[must_use]
    pub fn all_success(&self) -> bool {
        self.failed == 0
    }
}
