//! Repository discovery through the organization listing.
//!
//! Pages through `GET /orgs/{org}/repos` until an empty page arrives, then
//! narrows the listing down with a [`RepositoryFilter`].

mod error;
mod repository;

pub use error::DiscoveryError;
pub use repository::ListedRepository;

use crate::api::HostingApi;
use repository::RepositoryPayload;
use std::collections::HashSet;
use tracing::{debug, error, info, info_span, Instrument};

/// Outcome of walking an organization's repository pages.
///
/// A failed page ends the walk; everything gathered before it is kept.
#[derive(Debug, Default)]
pub struct RepositoryListing {
    /// Repositories in page order, deduplicated by full name.
    pub repositories: Vec<ListedRepository>,

    /// Number of non-empty pages that were read.
    pub pages_fetched: u32,

    /// Why the walk stopped early, if it did.
    pub interrupted_by: Option<DiscoveryError>,
}

impl RepositoryListing {
    /// Returns true if every page up to the terminating empty one was read.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.interrupted_by.is_none()
    }
}

/// Lists every repository of an organization.
///
/// # Arguments
///
/// * `api` - Hosting API client
/// * `organization` - Organization login
/// * `per_page` - Page size (1-100)
///
/// # Returns
///
/// The accumulated [`RepositoryListing`]. Failures never discard pages that
/// were already read.
pub async fn list_organization_repositories(
    api: &dyn HostingApi,
    organization: &str,
    per_page: u8,
) -> RepositoryListing {
    let span = info_span!("list_repositories", organization = %organization);

    async {
        let mut listing = RepositoryListing::default();
        let mut seen = HashSet::new();
        let mut page = 1u32;

        loop {
            info!(page, "Fetching repository page");
            let route = organization_repos_route(organization, per_page, page);

            let response = match api.get(&route).await {
                Ok(response) => response,
                Err(e) => {
                    error!(page, error = %e, "Failed to fetch repositories");
                    listing.interrupted_by = Some(DiscoveryError::Api { page, source: e });
                    break;
                }
            };

            if response.status != 200 {
                error!(
                    page,
                    status = response.status,
                    body = %response.body,
                    "Error fetching repositories"
                );
                listing.interrupted_by = Some(DiscoveryError::UnexpectedStatus {
                    page,
                    status: response.status,
                    body: response.body,
                });
                break;
            }

            let items: Vec<RepositoryPayload> = match response.json() {
                Ok(items) => items,
                Err(e) => {
                    error!(page, error = %e, "Failed to decode repository page");
                    listing.interrupted_by = Some(DiscoveryError::Api { page, source: e });
                    break;
                }
            };

            if items.is_empty() {
                debug!(page, "Reached empty page");
                break;
            }

            listing.pages_fetched += 1;
            for item in items {
                let repository = item.into_listed(organization);
                if seen.insert(repository.full_name.clone()) {
                    listing.repositories.push(repository);
                }
            }

            page += 1;
        }

        info!(
            count = listing.repositories.len(),
            pages = listing.pages_fetched,
            complete = listing.is_complete(),
            "Listing complete"
        );
        listing
    }
    .instrument(span)
    .await
}

/// Builds the listing route for one page.
fn organization_repos_route(organization: &str, per_page: u8, page: u32) -> String {
    format!("/orgs/{organization}/repos?per_page={per_page}&page={page}")
}

/// Selects repositories by name prefix with an explicit exclusion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryFilter {
    prefix: String,
    exclude: Vec<String>,
}

impl RepositoryFilter {
    /// Creates a filter keeping names that start with `prefix` and are not
    /// listed in `exclude`.
    pub fn new(prefix: impl Into<String>, exclude: Vec<String>) -> Self {
        Self {
            prefix: prefix.into(),
            exclude,
        }
    }

    /// Returns true if a repository with this name is targeted.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        name.starts_with(&self.prefix) && !self.exclude.iter().any(|e| e == name)
    }

    /// Keeps the matching repositories, preserving order.
    #[must_use]
    pub fn apply(&self, repositories: Vec<ListedRepository>) -> Vec<ListedRepository> {
        repositories
            .into_iter()
            .filter(|repo| self.matches(&repo.name))
            .collect()
    }
}
