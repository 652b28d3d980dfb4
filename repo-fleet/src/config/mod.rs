//! Configuration and input loading.
//!
//! Both procedures take their fixed data from TOML documents with kebab-case
//! keys: [`RolloutConfig`] for the pull request rollout and [`FleetCatalog`]
//! for fleet-wide branch creation. The workflow payload itself is read with
//! [`load_payload`].

mod catalog;
mod error;
mod rollout;

pub use catalog::{Environment, FleetCatalog, DEFAULT_BASE_BRANCH};
pub use error::ConfigError;
pub use rollout::{RolloutConfig, WorkingCopyPolicy};

use bstr::ByteSlice;
use std::path::Path;
use tracing::debug;
use url::Url;

/// Reads the payload file that gets committed into every repository.
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] if the file does not exist, or
/// [`ConfigError::IoError`] if it cannot be read.
pub fn load_payload(path: &Path) -> Result<Vec<u8>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "Loaded payload");
    Ok(content)
}

/// Checks that `name` is usable as a branch name.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBranchName`] if git would reject the name.
pub fn validate_branch_name(name: &str) -> Result<(), ConfigError> {
    gix_validate::reference::name_partial(name.as_bytes().as_bstr())
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidBranchName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

/// Parses an optional API root URL.
pub(crate) fn parse_api_base_url(
    value: Option<&str>,
    path: &str,
) -> Result<Option<Url>, ConfigError> {
    value
        .map(|raw| {
            Url::parse(raw).map_err(|e| ConfigError::ValidationError {
                path: path.to_string(),
                message: format!("api-base-url is not a valid URL: {raw} ({e})"),
            })
        })
        .transpose()
}

/// Reads and parses a TOML file.
fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::TomlError {
        path: path.display().to_string(),
        source: e,
    })
}
