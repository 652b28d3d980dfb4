//! Listed repository information.

use serde::{Deserialize, Serialize};

/// A repository returned by the organization listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedRepository {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,

    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// HTTPS clone URL.
    pub clone_url: String,
}

/// Fields read from one entry of `GET /orgs/{org}/repos`.
#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryPayload {
    pub(crate) name: String,
    pub(crate) full_name: Option<String>,
    pub(crate) clone_url: String,
    pub(crate) owner: Option<OwnerPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwnerPayload {
    pub(crate) login: String,
}

impl RepositoryPayload {
    /// Converts the payload, falling back to `organization` for the owner.
    pub(crate) fn into_listed(self, organization: &str) -> ListedRepository {
        let owner = self
            .owner
            .map(|o| o.login)
            .unwrap_or_else(|| organization.to_string());
        let full_name = self
            .full_name
            .unwrap_or_else(|| format!("{}/{}", owner, self.name));
        ListedRepository {
            owner,
            name: self.name,
            full_name,
            clone_url: self.clone_url,
        }
    }
}
