//! Branch creation through the git refs API.
//!
//! Resolves the head commit of a base branch, then points a new
//! `refs/heads/<name>` at it. An existing ref (422) counts as success.

mod error;

pub use error::BranchError;

use crate::api::HostingApi;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, info_span, warn, Instrument};

/// Successful outcome of a branch creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchOutcome {
    /// The ref was created at `sha`.
    Created { sha: String },

    /// The ref already existed; nothing changed.
    AlreadyExists { sha: String },
}

#[derive(Debug, Deserialize)]
struct GitRef {
    object: GitObject,
}

#[derive(Debug, Deserialize)]
struct GitObject {
    sha: String,
}

/// Resolves the head commit of `base` in `owner/repo`.
///
/// # Errors
///
/// Returns [`BranchError::BaseBranchNotFound`] on 404,
/// [`BranchError::LookupFailed`] on other non-success statuses, and
/// [`BranchError::Api`] on transport or decoding failures.
pub async fn resolve_branch_head(
    api: &dyn HostingApi,
    owner: &str,
    repo: &str,
    base: &str,
) -> Result<String, BranchError> {
    let route = format!("/repos/{owner}/{repo}/git/ref/heads/{base}");
    let response = api.get(&route).await?;

    match response.status {
        404 => Err(BranchError::BaseBranchNotFound {
            base: base.to_string(),
        }),
        status if !response.is_success() => Err(BranchError::LookupFailed {
            base: base.to_string(),
            status,
            body: response.body,
        }),
        _ => {
            let git_ref: GitRef = response.json()?;
            Ok(git_ref.object.sha)
        }
    }
}

/// Creates `new_branch` from the head of `base` in `owner/repo`.
///
/// The ref creation is only attempted once the base head is known.
///
/// # Errors
///
/// Returns [`BranchError`] when the base cannot be resolved or the creation
/// is answered with anything other than 201 or 422.
pub async fn create_branch(
    api: &dyn HostingApi,
    owner: &str,
    repo: &str,
    new_branch: &str,
    base: &str,
) -> Result<BranchOutcome, BranchError> {
    let full_name = format!("{owner}/{repo}");
    let span = info_span!("create_branch", repo = %full_name, branch = %new_branch);

    async {
        info!(base = %base, "Fetching SHA for head of base branch");
        let sha = match resolve_branch_head(api, owner, repo, base).await {
            Ok(sha) => sha,
            Err(e) => {
                match &e {
                    BranchError::BaseBranchNotFound { .. } => {
                        error!(
                            base = %base,
                            "Could not find the base branch, please ensure it exists"
                        );
                    }
                    _ => {
                        error!(
                            base = %base,
                            error = %e,
                            "Error fetching SHA, check repository name, owner, and token permissions"
                        );
                    }
                }
                return Err(e);
            }
        };
        info!(sha = %sha, "Found SHA");

        let route = format!("/repos/{owner}/{repo}/git/refs");
        let payload = json!({
            "ref": format!("refs/heads/{new_branch}"),
            "sha": sha,
        });
        let response = api.post(&route, &payload).await.map_err(|e| {
            error!(error = %e, "Error creating branch");
            BranchError::from(e)
        })?;

        match response.status {
            201 => {
                info!(base = %base, "Successfully created branch");
                Ok(BranchOutcome::Created { sha })
            }
            422 => {
                warn!("Branch already exists");
                Ok(BranchOutcome::AlreadyExists { sha })
            }
            status => {
                error!(status, body = %response.body, "Error creating branch");
                Err(BranchError::CreateFailed {
                    status,
                    body: response.body,
                })
            }
        }
    }
    .instrument(span)
    .await
}
