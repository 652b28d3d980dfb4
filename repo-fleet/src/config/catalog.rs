//! Static catalog mapping environment names to fleets of repositories.

use super::{parse_api_base_url, read_toml, validate_branch_name, ConfigError};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;
use url::Url;

/// Base branch offered when the catalog does not name one.
pub const DEFAULT_BASE_BRANCH: &str = "main";

/// Catalog compiled into the binary, used when no `--catalog` is given.
const BUILTIN_CATALOG: &str = include_str!("../../fleets.toml");

/// A named fleet of repositories.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Environment {
    /// Label shown in the selection menu.
    pub name: String,

    /// Repository names, in display order.
    pub repositories: Vec<String>,
}

/// Parsed fleet catalog.
///
/// A repository may belong to several environments.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FleetCatalog {
    /// Owner (user or organization) of every repository in the catalog.
    pub owner: String,

    /// Base branch used when the operator leaves the prompt empty.
    #[serde(default = "default_base_branch")]
    pub default_base_branch: String,

    /// GitHub Enterprise API root (defaults to github.com).
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Environments in menu order.
    #[serde(rename = "environment", default)]
    pub environments: Vec<Environment>,
}

fn default_base_branch() -> String {
    DEFAULT_BASE_BRANCH.to_string()
}

impl FleetCatalog {
    /// Returns the catalog shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the embedded catalog is malformed.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN_CATALOG, "built-in catalog")
    }

    /// Loads and validates a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is unreadable, malformed, or fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading fleet catalog");
        let catalog: Self = read_toml(path)?;
        catalog.validate(&path.display().to_string())?;
        Ok(catalog)
    }

    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is malformed or fails validation.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let catalog: Self = toml::from_str(content).map_err(|e| ConfigError::TomlError {
            path: origin.to_string(),
            source: e,
        })?;
        catalog.validate(origin)?;
        Ok(catalog)
    }

    /// Checks the catalog for empty or ambiguous entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] describing the first problem found.
    pub fn validate(&self, origin: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::ValidationError {
            path: origin.to_string(),
            message,
        };

        if self.owner.trim().is_empty() {
            return Err(invalid("owner must not be empty".to_string()));
        }
        if self.environments.is_empty() {
            return Err(invalid("at least one environment is required".to_string()));
        }

        let mut seen = HashSet::new();
        for environment in &self.environments {
            if environment.name.trim().is_empty() {
                return Err(invalid("environment names must not be empty".to_string()));
            }
            if !seen.insert(environment.name.as_str()) {
                return Err(invalid(format!(
                    "environment '{}' is defined more than once",
                    environment.name
                )));
            }
            if environment.repositories.is_empty() {
                return Err(invalid(format!(
                    "environment '{}' lists no repositories",
                    environment.name
                )));
            }
            if let Some(blank) = environment
                .repositories
                .iter()
                .find(|r| r.trim().is_empty())
            {
                return Err(invalid(format!(
                    "environment '{}' contains an empty repository name '{blank}'",
                    environment.name
                )));
            }
        }

        validate_branch_name(&self.default_base_branch)?;
        parse_api_base_url(self.api_base_url.as_deref(), origin)?;
        Ok(())
    }

    /// Environment names in menu order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.environments.iter().map(|e| e.name.as_str()).collect()
    }

    /// Looks up an environment by exact name.
    #[must_use]
    pub fn environment(&self, name: &str) -> Option<&Environment> {
        self.environments.iter().find(|e| e.name == name)
    }

    /// Parsed API root, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the URL does not parse.
    pub fn api_base_url(&self) -> Result<Option<Url>, ConfigError> {
        parse_api_base_url(self.api_base_url.as_deref(), "fleet catalog")
    }
}
