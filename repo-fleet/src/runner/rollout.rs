//! Pull request rollout across an organization.

use super::RunnerError;
use crate::api::HostingApi;
use crate::config::{load_payload, RolloutConfig};
use crate::discovery::{list_organization_repositories, ListedRepository, RepositoryFilter};
use crate::git::VersionControl;
use crate::publish::{publish_branch, PublishPlan};
use crate::pull_requests::{open_pull_request, PullRequestRequest};
use crate::recorder::UrlRecorder;
use crate::summary::{RolloutResult, RolloutSummary};
use crate::templates::{TemplateContext, TemplateError, TemplateRenderer};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Rolls the configured payload out to every matching repository.
pub struct RolloutRunner {
    config: RolloutConfig,
    api: Arc<dyn HostingApi>,
    vcs: Arc<dyn VersionControl>,
    renderer: TemplateRenderer,
    dry_run: bool,
}

/// Rendered per-repository text.
struct RenderedText {
    commit_message: String,
    title: String,
    body: String,
}

impl RolloutRunner {
    /// Builds a runner from validated settings and its collaborators.
    pub fn new(
        config: RolloutConfig,
        api: Arc<dyn HostingApi>,
        vcs: Arc<dyn VersionControl>,
    ) -> Self {
        Self {
            config,
            api,
            vcs,
            renderer: TemplateRenderer::new(),
            dry_run: false,
        }
    }

    /// Lists targets without cloning or mutating anything.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the settings in use.
    pub fn config(&self) -> &RolloutConfig {
        &self.config
    }

    /// Executes the rollout.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Config`] if the payload file is missing (before
    /// any network call) and [`RunnerError::Output`] if the URL file cannot
    /// be created. Per-repository failures, including a URL that cannot be
    /// appended, are recorded in the summary.
    pub async fn run(&self) -> Result<RolloutSummary, RunnerError> {
        let mut summary = RolloutSummary::new(self.dry_run);

        info!(path = %self.config.workflow_file.display(), "Loading workflow file");
        let payload = load_payload(&self.config.workflow_file)?;

        let listing = list_organization_repositories(
            self.api.as_ref(),
            &self.config.organization,
            self.config.per_page,
        )
        .await;
        summary.repositories_listed = listing.repositories.len();
        summary.listing_interrupted = !listing.is_complete();

        let filter = RepositoryFilter::new(
            self.config.name_prefix.clone(),
            self.config.exclude.clone(),
        );
        let targets = filter.apply(listing.repositories);
        summary.repositories_matched = targets.len();

        if targets.is_empty() {
            warn!(prefix = %self.config.name_prefix, "No repositories matched");
        } else {
            info!(count = targets.len(), "Found repositories");
        }

        if self.dry_run {
            print_dry_run_preview(&self.config, &targets);
            return Ok(summary);
        }

        let output = &self.config.output_file;
        let mut recorder = UrlRecorder::create(output)
            .await
            .map_err(|e| RunnerError::Output {
                path: output.clone(),
                source: e,
            })?;

        for repository in &targets {
            let result = self.process_repository(repository, &payload).await;
            if let Some(url) = result.url() {
                if let Err(e) = recorder.record(url).await {
                    error!(
                        path = %output.display(),
                        url,
                        error = %e,
                        "Failed to record pull request URL"
                    );
                    summary.urls_not_recorded += 1;
                }
            }
            summary.record_result(&result);
        }

        info!(
            path = %recorder.path().display(),
            count = recorder.recorded(),
            "PR URLs written"
        );
        Ok(summary)
    }

    async fn process_repository(
        &self,
        repository: &ListedRepository,
        payload: &[u8],
    ) -> RolloutResult {
        info!(repo = %repository.full_name, "Processing repository");

        let context = TemplateContext {
            owner: &repository.owner,
            repository: &repository.name,
            branch: &self.config.branch_name,
            base_branch: &self.config.base_branch,
        };
        let text = match self.render_text(&context) {
            Ok(text) => text,
            Err(e) => {
                error!(repo = %repository.full_name, error = %e, "Failed to render templates");
                return RolloutResult::PublishFailed {
                    repository: repository.full_name.clone(),
                    error: e.to_string(),
                };
            }
        };

        let destination = self.config.destination();
        let plan = PublishPlan {
            workspace: &self.config.workspace,
            target_directory: &self.config.target_directory,
            destination: &destination,
            content: payload,
            branch_name: &self.config.branch_name,
            commit_message: &text.commit_message,
            policy: self.config.working_copy,
        };

        let (head, publish_error) =
            match publish_branch(self.vcs.as_ref(), repository, &plan).await {
                Ok(published) => (Some(published.branch_name), None),
                Err(e) => {
                    error!(
                        repo = %repository.full_name,
                        error = %e,
                        "Error while processing repository"
                    );
                    (None, Some(e.to_string()))
                }
            };

        let request = PullRequestRequest {
            owner: &repository.owner,
            repository: &repository.name,
            head: head.as_deref(),
            base: &self.config.base_branch,
            title: &text.title,
            body: &text.body,
            reviewers: &self.config.reviewers,
        };

        match open_pull_request(self.api.as_ref(), &request).await {
            Ok(Some(opened)) => {
                info!(
                    repo = %repository.full_name,
                    url = %opened.url,
                    reviewers = opened.reviewers.as_str(),
                    "Pull request opened"
                );
                RolloutResult::PullRequestOpened {
                    repository: repository.full_name.clone(),
                    url: opened.url,
                    reviewers: opened.reviewers,
                }
            }
            Ok(None) => RolloutResult::PublishFailed {
                repository: repository.full_name.clone(),
                error: publish_error.unwrap_or_default(),
            },
            Err(e) => {
                error!(
                    repo = %repository.full_name,
                    error = %e,
                    "Failed to create pull request"
                );
                RolloutResult::PullRequestFailed {
                    repository: repository.full_name.clone(),
                    error: e.to_string(),
                }
            }
        }
    }

    fn render_text(&self, context: &TemplateContext<'_>) -> Result<RenderedText, TemplateError> {
        Ok(RenderedText {
            commit_message: self.renderer.render(&self.config.commit_message, context)?,
            title: self.renderer.render(&self.config.pr_title, context)?,
            body: self.renderer.render(&self.config.pr_body, context)?,
        })
    }
}

fn print_dry_run_preview(config: &RolloutConfig, repositories: &[ListedRepository]) {
    println!("\n[DRY RUN] Organization: {}", config.organization);
    println!(
        "  Would add: {} on branch {} -> {}",
        config.destination().display(),
        config.branch_name,
        config.base_branch
    );
    println!("  Found {} repositories:\n", repositories.len());

    for (i, repo) in repositories.iter().enumerate() {
        println!("  [{}/{}] {}", i + 1, repositories.len(), repo.full_name);
    }

    if !config.reviewers.is_empty() {
        println!("\n  Reviewers: {}", config.reviewers.join(", "));
    }
    println!();
}
