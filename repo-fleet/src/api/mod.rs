//! Minimal REST surface of the hosting platform.
//!
//! Every component talks to GitHub through [`HostingApi`], which hands back
//! the raw status code and body of each response. Status handling (404, 422,
//! 201 and friends) stays with the callers, which need to tell those apart.

mod error;
mod octocrab_api;

pub use error::ApiError;
pub use octocrab_api::OctocrabApi;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Media type sent in the `Accept` header of every request.
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Status code and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,

    /// Raw response body.
    pub body: String,
}

impl ApiResponse {
    /// Creates a response from a status code and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for any 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(ApiError::Decode)
    }
}

/// Hosting API client.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status, and reserve `Err` for transport failures.
#[async_trait]
pub trait HostingApi: Send + Sync {
    /// Issues a GET request against `route` (e.g. `/orgs/acme/repos?page=1`).
    async fn get(&self, route: &str) -> Result<ApiResponse, ApiError>;

    /// Issues a POST request with a JSON body against `route`.
    async fn post(&self, route: &str, body: &Value) -> Result<ApiResponse, ApiError>;
}
