#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod api;
pub mod branches;
pub mod config;
pub mod discovery;
pub mod git;
pub mod prompt;
pub mod publish;
pub mod pull_requests;
pub mod recorder;
pub mod runner;
pub mod summary;
pub mod templates;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiError, ApiResponse, HostingApi, OctocrabApi, GITHUB_ACCEPT};
pub use branches::{create_branch, resolve_branch_head, BranchError, BranchOutcome};
pub use config::{
    load_payload, validate_branch_name, ConfigError, Environment, FleetCatalog, RolloutConfig,
    WorkingCopyPolicy, DEFAULT_BASE_BRANCH,
};
pub use discovery::{
    list_organization_repositories, DiscoveryError, ListedRepository, RepositoryFilter,
    RepositoryListing,
};
pub use git::{GitCli, GitError, VersionControl};
pub use prompt::{
    collect_plan, is_affirmative, parse_menu_choice, BranchPlan, MenuChoiceError, PlanDecision,
    PlanPresets, PromptError, Prompter, TerminalPrompter,
};
pub use publish::{
    publish_branch, working_copy_action, PublishError, PublishPlan, PublishedBranch,
    WorkingCopyAction,
};
pub use pull_requests::{
    open_pull_request, OpenedPullRequest, PrError, PullRequestRequest, ReviewerStatus,
};
pub use recorder::UrlRecorder;
pub use runner::{BranchRunOutcome, BranchRunner, RolloutRunner, RunnerError};
pub use summary::{BranchResult, BranchRunSummary, RolloutResult, RolloutSummary};
pub use templates::{TemplateContext, TemplateError, TemplateRenderer};
