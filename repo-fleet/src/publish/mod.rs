//! Publishing the payload on a new branch of a local working copy.

mod error;

pub use error::PublishError;

use crate::config::WorkingCopyPolicy;
use crate::discovery::ListedRepository;
use crate::git::VersionControl;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn, Instrument};

/// Remote every branch is pushed to.
pub const REMOTE: &str = "origin";

/// How a working copy was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkingCopyAction {
    /// The repository was cloned during this run.
    Clone,

    /// An existing directory was used without verifying its state.
    Reuse,
}

/// Decides how to obtain a working copy.
///
/// # Errors
///
/// Returns [`PublishError::StaleWorkingCopy`] when the directory exists and
/// `policy` is [`WorkingCopyPolicy::RequireFresh`].
pub fn working_copy_action(
    path: &Path,
    exists: bool,
    policy: WorkingCopyPolicy,
) -> Result<WorkingCopyAction, PublishError> {
    match (exists, policy) {
        (false, _) => Ok(WorkingCopyAction::Clone),
        (true, WorkingCopyPolicy::Reuse) => Ok(WorkingCopyAction::Reuse),
        (true, WorkingCopyPolicy::RequireFresh) => Err(PublishError::StaleWorkingCopy {
            path: path.display().to_string(),
        }),
    }
}

/// What to publish and where.
#[derive(Debug, Clone, Copy)]
pub struct PublishPlan<'a> {
    /// Directory holding the working copies.
    pub workspace: &'a Path,

    /// Repository-relative directory receiving the file.
    pub target_directory: &'a Path,

    /// Repository-relative path of the file itself.
    pub destination: &'a Path,

    /// File content, written verbatim.
    pub content: &'a [u8],

    /// Branch to create and push.
    pub branch_name: &'a str,

    /// Commit message.
    pub commit_message: &'a str,

    /// Handling of existing working copies.
    pub policy: WorkingCopyPolicy,
}

/// A branch that was pushed to the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedBranch {
    /// Pushed branch name.
    pub branch_name: String,

    /// Local working copy.
    pub local_path: PathBuf,

    /// Whether the working copy was cloned or reused.
    pub working_copy: WorkingCopyAction,
}

/// Commits the payload on a new branch and pushes it.
///
/// Steps: obtain a working copy, check out `plan.branch_name`, write the
/// file (overwriting any existing one), stage the target directory, commit,
/// and push to [`REMOTE`].
///
/// # Errors
///
/// Returns [`PublishError`] from the first step that fails; later steps are
/// not attempted.
pub async fn publish_branch(
    vcs: &dyn VersionControl,
    repository: &ListedRepository,
    plan: &PublishPlan<'_>,
) -> Result<PublishedBranch, PublishError> {
    let span = info_span!("publish", repo = %repository.full_name, branch = %plan.branch_name);

    async {
        let local_path = plan.workspace.join(&repository.name);
        let action = working_copy_action(&local_path, local_path.exists(), plan.policy)?;

        match action {
            WorkingCopyAction::Clone => {
                info!(path = %local_path.display(), "Cloning repository");
                vcs.clone_repository(&repository.clone_url, &local_path)
                    .await?;
            }
            WorkingCopyAction::Reuse => {
                warn!(
                    path = %local_path.display(),
                    "Directory already exists, skipping clone"
                );
            }
        }

        info!("Creating branch");
        vcs.checkout_new_branch(&local_path, plan.branch_name)
            .await?;

        let directory = local_path.join(plan.target_directory);
        tokio::fs::create_dir_all(&directory)
            .await
            .map_err(|e| PublishError::Io {
                path: directory.display().to_string(),
                source: e,
            })?;

        let file_path = local_path.join(plan.destination);
        tokio::fs::write(&file_path, plan.content)
            .await
            .map_err(|e| PublishError::Io {
                path: file_path.display().to_string(),
                source: e,
            })?;
        debug!(path = %file_path.display(), "Wrote payload");

        vcs.add(&local_path, plan.target_directory).await?;
        vcs.commit(&local_path, plan.commit_message).await?;
        vcs.push(&local_path, REMOTE, plan.branch_name).await?;

        info!("Branch pushed");
        Ok(PublishedBranch {
            branch_name: plan.branch_name.to_string(),
            local_path,
            working_copy: action,
        })
    }
    .instrument(span)
    .await
}
