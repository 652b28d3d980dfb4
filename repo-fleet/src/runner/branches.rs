//! Fleet-wide branch creation.

use super::RunnerError;
use crate::api::HostingApi;
use crate::branches::{create_branch, BranchOutcome};
use crate::config::FleetCatalog;
use crate::prompt::{collect_plan, BranchPlan, PlanDecision, PlanPresets, Prompter};
use crate::summary::{BranchResult, BranchRunSummary};
use std::sync::Arc;
use tracing::info;

/// How a fleet run ended.
#[derive(Debug, Clone)]
pub enum BranchRunOutcome {
    /// The operator declined the plan; nothing was changed.
    Cancelled,

    /// Every repository of the fleet was processed.
    Completed(BranchRunSummary),
}

/// Creates one branch across every repository of a chosen environment.
pub struct BranchRunner {
    catalog: FleetCatalog,
    api: Arc<dyn HostingApi>,
}

impl BranchRunner {
    /// Builds a runner over a validated catalog.
    pub fn new(catalog: FleetCatalog, api: Arc<dyn HostingApi>) -> Self {
        Self { catalog, api }
    }

    /// Returns the catalog in use.
    pub fn catalog(&self) -> &FleetCatalog {
        &self.catalog
    }

    /// Collects the plan from the operator, then executes it.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Prompt`] for fatal input problems, such as an
    /// empty branch name. No API call is made in that case.
    pub async fn run(
        &self,
        prompter: &mut dyn Prompter,
        presets: &PlanPresets,
    ) -> Result<BranchRunOutcome, RunnerError> {
        match collect_plan(prompter, &self.catalog, presets)? {
            PlanDecision::Cancelled => {
                info!("Operation cancelled by user");
                Ok(BranchRunOutcome::Cancelled)
            }
            PlanDecision::Proceed(plan) => {
                info!("Confirmation received, starting branch creation");
                Ok(BranchRunOutcome::Completed(self.execute(&plan).await))
            }
        }
    }

    /// Creates the branch in every repository of `plan`, in order.
    ///
    /// A failing repository never stops the remaining ones.
    pub async fn execute(&self, plan: &BranchPlan) -> BranchRunSummary {
        let owner = &self.catalog.owner;
        let mut summary = BranchRunSummary::new(plan.environment.clone());

        for repo in &plan.repositories {
            let repository = format!("{owner}/{repo}");
            info!(repo = %repository, "Processing repository");
            let result = match create_branch(
                self.api.as_ref(),
                owner,
                repo,
                &plan.new_branch,
                &plan.base_branch,
            )
            .await
            {
                Ok(BranchOutcome::Created { .. }) => BranchResult::Created { repository },
                Ok(BranchOutcome::AlreadyExists { .. }) => {
                    BranchResult::AlreadyExists { repository }
                }
                Err(e) => BranchResult::Failed {
                    repository,
                    error: e.to_string(),
                },
            };
            summary.record_result(&result);
        }

        summary
    }
}
