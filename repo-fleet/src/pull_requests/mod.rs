//! Pull request creation and reviewer requests.

mod error;
mod status;

pub use error::PrError;
pub use status::{OpenedPullRequest, ReviewerStatus};

use crate::api::HostingApi;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, info_span, warn, Instrument};

/// Text and branches of the pull request to open.
#[derive(Debug, Clone, Copy)]
pub struct PullRequestRequest<'a> {
    /// Repository owner.
    pub owner: &'a str,

    /// Repository name.
    pub repository: &'a str,

    /// Branch carrying the change; `None` when publishing failed.
    pub head: Option<&'a str>,

    /// Branch the pull request targets.
    pub base: &'a str,

    /// Pull request title.
    pub title: &'a str,

    /// Pull request body.
    pub body: &'a str,

    /// Logins requested as reviewers.
    pub reviewers: &'a [String],
}

#[derive(Debug, Deserialize)]
struct CreatedPullRequest {
    number: u64,
    html_url: String,
}

/// Opens a pull request and requests reviewers on it.
///
/// Without a head branch nothing is sent and `Ok(None)` is returned. Only a
/// 201 answer counts as created; the reviewer request that follows never
/// affects the result beyond [`OpenedPullRequest::reviewers`].
///
/// # Errors
///
/// Returns [`PrError::UnexpectedStatus`] for any non-201 answer, or
/// [`PrError::Api`] for transport and decoding failures. No reviewer request
/// is sent in either case.
pub async fn open_pull_request(
    api: &dyn HostingApi,
    request: &PullRequestRequest<'_>,
) -> Result<Option<OpenedPullRequest>, PrError> {
    let Some(head) = request.head else {
        return Ok(None);
    };

    let full_name = format!("{}/{}", request.owner, request.repository);
    let span = info_span!("open_pull_request", repo = %full_name, head = %head);

    async {
        let route = format!("/repos/{}/{}/pulls", request.owner, request.repository);
        let payload = json!({
            "title": request.title,
            "head": head,
            "base": request.base,
            "body": request.body,
        });

        let response = api.post(&route, &payload).await?;
        if response.status != 201 {
            return Err(PrError::UnexpectedStatus {
                status: response.status,
                body: response.body,
            });
        }

        let created: CreatedPullRequest = response.json()?;
        info!(pr_number = created.number, url = %created.html_url, "Pull request created");

        let reviewers = request_reviewers(api, request, created.number).await;

        Ok(Some(OpenedPullRequest {
            number: created.number,
            url: created.html_url,
            reviewers,
        }))
    }
    .instrument(span)
    .await
}

/// Requests the configured reviewers on pull request `number`.
async fn request_reviewers(
    api: &dyn HostingApi,
    request: &PullRequestRequest<'_>,
    number: u64,
) -> ReviewerStatus {
    if request.reviewers.is_empty() {
        return ReviewerStatus::Skipped;
    }

    let route = format!(
        "/repos/{}/{}/pulls/{}/requested_reviewers",
        request.owner, request.repository, number
    );
    let payload = json!({ "reviewers": request.reviewers });

    match api.post(&route, &payload).await {
        Ok(response) if response.status == 201 => {
            info!(pr_number = number, "Reviewers added");
            ReviewerStatus::Requested
        }
        Ok(response) => {
            warn!(
                pr_number = number,
                status = response.status,
                body = %response.body,
                "Failed to add reviewers"
            );
            ReviewerStatus::Failed {
                error: format!("status {}: {}", response.status, response.body),
            }
        }
        Err(e) => {
            warn!(pr_number = number, error = %e, "Failed to add reviewers");
            ReviewerStatus::Failed {
                error: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;

    const PULLS: &str = "/repos/acme/te-core/pulls";
    const REVIEWERS: &str = "/repos/acme/te-core/pulls/7/requested_reviewers";
    const HEAD: &str = "add-cherrypick-workflow";

    fn request<'a>(head: Option<&'a str>, reviewers: &'a [String]) -> PullRequestRequest<'a> {
        PullRequestRequest {
            owner: "acme",
            repository: "te-core",
            head,
            base: "main",
            title: "Add cherrypick workflow",
            body: "Adds a workflow.",
            reviewers,
        }
    }

    fn created_body() -> &'static str {
        r#"{"number":7,"html_url":"https://github.com/acme/te-core/pull/7","state":"open"}"#
    }

    #[tokio::test]
    async fn no_branch_means_no_request() {
        let api = FakeApi::new();
        let reviewers = vec!["alice".to_string()];
        let request = request(None, &reviewers);

        let result = open_pull_request(&api, &request).await.unwrap();

        assert!(result.is_none());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn created_pull_request_carries_exact_url() {
        let api = FakeApi::new();
        api.respond_post(PULLS, 201, created_body());
        api.respond_post(REVIEWERS, 201, "{}");
        let reviewers = vec!["alice".to_string(), "bob".to_string()];
        let request = request(Some(HEAD), &reviewers);

        let opened = open_pull_request(&api, &request).await.unwrap().unwrap();

        assert_eq!(opened.number, 7);
        assert_eq!(opened.url, "https://github.com/acme/te-core/pull/7");
        assert_eq!(opened.reviewers, ReviewerStatus::Requested);

        let creation = &api.posts_to(PULLS)[0];
        assert_eq!(creation["head"], HEAD);
        assert_eq!(creation["base"], "main");
        assert_eq!(creation["title"], "Add cherrypick workflow");
        assert_eq!(
            api.posts_to(REVIEWERS)[0],
            serde_json::json!({ "reviewers": ["alice", "bob"] })
        );
    }

    #[tokio::test]
    async fn non_created_status_skips_reviewers() {
        let api = FakeApi::new();
        let conflict = r#"{"message":"A pull request already exists"}"#;
        api.respond_post(PULLS, 422, conflict);
        let reviewers = vec!["alice".to_string()];
        let request = request(Some(HEAD), &reviewers);

        let result = open_pull_request(&api, &request).await;

        match result {
            Err(PrError::UnexpectedStatus { status, body }) => {
                assert_eq!(status, 422);
                assert!(body.contains("already exists"));
            }
            other => panic!("expected unexpected status, got {other:?}"),
        }
        assert!(api.posts_to(REVIEWERS).is_empty());
    }

    #[tokio::test]
    async fn reviewer_failure_keeps_pull_request() {
        let api = FakeApi::new();
        api.respond_post(PULLS, 201, created_body());
        let refused = r#"{"message":"Reviews may only be requested from collaborators"}"#;
        api.respond_post(REVIEWERS, 422, refused);
        let reviewers = vec!["outsider".to_string()];
        let request = request(Some(HEAD), &reviewers);

        let opened = open_pull_request(&api, &request).await.unwrap().unwrap();

        assert_eq!(opened.url, "https://github.com/acme/te-core/pull/7");
        assert!(matches!(opened.reviewers, ReviewerStatus::Failed { .. }));
    }

    #[tokio::test]
    async fn empty_reviewer_list_is_skipped() {
        let api = FakeApi::new();
        api.respond_post(PULLS, 201, created_body());
        let request = request(Some(HEAD), &[]);

        let opened = open_pull_request(&api, &request).await.unwrap().unwrap();

        assert_eq!(opened.reviewers, ReviewerStatus::Skipped);
        assert_eq!(api.calls().len(), 1);
    }
}
