//! Settings for rolling a file out across an organization via pull requests.

use super::{parse_api_base_url, read_toml, validate_branch_name, ConfigError};
use serde::Deserialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// What to do when a repository's local working copy already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkingCopyPolicy {
    /// Skip cloning and reuse the directory as-is.
    #[default]
    Reuse,

    /// Refuse to touch an existing directory and fail that repository.
    RequireFresh,
}

/// Parsed `rollout.toml`.
///
/// Every key is optional; the defaults describe the cherry-pick workflow
/// rollout this tool was first written for.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct RolloutConfig {
    /// Organization whose repositories are listed.
    pub organization: String,

    /// Only repositories whose name starts with this prefix are targeted.
    pub name_prefix: String,

    /// Repository names skipped even when the prefix matches.
    pub exclude: Vec<String>,

    /// Page size used while listing repositories (1-100).
    pub per_page: u8,

    /// Local file committed into every repository.
    pub workflow_file: PathBuf,

    /// Repository-relative directory the file is written into.
    pub target_directory: PathBuf,

    /// Branch created in every repository.
    pub branch_name: String,

    /// Handlebars format for the commit message.
    pub commit_message: String,

    /// Handlebars format for the pull request title.
    pub pr_title: String,

    /// Handlebars format for the pull request body.
    pub pr_body: String,

    /// Branch the pull requests target.
    pub base_branch: String,

    /// Reviewers requested on every pull request.
    pub reviewers: Vec<String>,

    /// File receiving one pull request URL per line.
    pub output_file: PathBuf,

    /// Directory holding the local working copies.
    pub workspace: PathBuf,

    /// Handling of working copies left over from earlier runs.
    pub working_copy: WorkingCopyPolicy,

    /// GitHub Enterprise API root (defaults to github.com).
    pub api_base_url: Option<String>,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            organization: "weareplanet".to_string(),
            name_prefix: "te-".to_string(),
            exclude: vec!["te-payment-test".to_string()],
            per_page: 100,
            workflow_file: PathBuf::from("cherrypick_workflow.yml"),
            target_directory: PathBuf::from(".github/workflows"),
            branch_name: "add-cherrypick-workflow".to_string(),
            commit_message: "Add cherrypick workflow".to_string(),
            pr_title: "Add cherrypick workflow".to_string(),
            pr_body: "This PR adds a new GitHub Actions workflow for cherrypicking commits."
                .to_string(),
            base_branch: "main".to_string(),
            reviewers: vec!["bgigante-planet".to_string(), "varaujo-planet".to_string()],
            output_file: PathBuf::from("created_prs.txt"),
            workspace: PathBuf::from("."),
            working_copy: WorkingCopyPolicy::Reuse,
            api_base_url: None,
        }
    }
}

impl RolloutConfig {
    /// Loads and validates a rollout configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is unreadable, malformed, or fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading rollout configuration");
        let config: Self = read_toml(path)?;
        config.validate(&path.display().to_string())?;
        Ok(config)
    }

    /// Parses a rollout configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is malformed or fails validation.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::TomlError {
            path: origin.to_string(),
            source: e,
        })?;
        config.validate(origin)?;
        Ok(config)
    }

    /// Checks the settings for values that would fail mid-run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] or
    /// [`ConfigError::InvalidBranchName`] describing the first problem found.
    pub fn validate(&self, origin: &str) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::ValidationError {
            path: origin.to_string(),
            message: message.to_string(),
        };

        if self.organization.trim().is_empty() {
            return Err(invalid("organization must not be empty"));
        }
        if self.per_page == 0 || self.per_page > 100 {
            return Err(invalid("per-page must be between 1 and 100"));
        }
        if self.file_name().is_none() {
            return Err(invalid("workflow-file must name a file"));
        }
        if self.target_directory.is_absolute() {
            return Err(invalid("target-directory must be relative to the repository"));
        }
        if self.commit_message.trim().is_empty() {
            return Err(invalid("commit-message must not be empty"));
        }
        if self.pr_title.trim().is_empty() {
            return Err(invalid("pr-title must not be empty"));
        }

        validate_branch_name(&self.branch_name)?;
        validate_branch_name(&self.base_branch)?;
        parse_api_base_url(self.api_base_url.as_deref(), origin)?;
        Ok(())
    }

    /// File name the payload is stored under inside each repository.
    #[must_use]
    pub fn file_name(&self) -> Option<&OsStr> {
        self.workflow_file.file_name()
    }

    /// Repository-relative path of the committed file.
    #[must_use]
    pub fn destination(&self) -> PathBuf {
        match self.file_name() {
            Some(name) => self.target_directory.join(name),
            None => self.target_directory.clone(),
        }
    }

    /// Parsed API root, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the URL does not parse.
    pub fn api_base_url(&self) -> Result<Option<Url>, ConfigError> {
        parse_api_base_url(self.api_base_url.as_deref(), "rollout configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_cherrypick_rollout() {
        let config = RolloutConfig::default();
        config.validate("defaults").unwrap();

        assert_eq!(config.name_prefix, "te-");
        assert_eq!(config.exclude, vec!["te-payment-test".to_string()]);
        assert_eq!(config.per_page, 100);
        assert_eq!(config.base_branch, "main");
        assert_eq!(config.reviewers, vec!["bgigante-planet", "varaujo-planet"]);
        assert_eq!(
            config.destination(),
            PathBuf::from(".github/workflows/cherrypick_workflow.yml")
        );
        assert_eq!(config.working_copy, WorkingCopyPolicy::Reuse);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = RolloutConfig::from_toml_str(
            r#"
organization = "acme"
reviewers = ["alice", "bob"]
working-copy = "require-fresh"
"#,
            "inline",
        )
        .unwrap();

        assert_eq!(config.organization, "acme");
        assert_eq!(config.reviewers, vec!["alice", "bob"]);
        assert_eq!(config.working_copy, WorkingCopyPolicy::RequireFresh);
        assert_eq!(config.branch_name, "add-cherrypick-workflow");
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = RolloutConfig::from_toml_str("organisation = \"typo\"", "inline");
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn rejects_out_of_range_page_size() {
        let result = RolloutConfig::from_toml_str("per-page = 0", "inline");
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn rejects_absolute_target_directory() {
        let result = RolloutConfig::from_toml_str("target-directory = \"/etc\"", "inline");
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn rejects_invalid_branch_name() {
        let result = RolloutConfig::from_toml_str("branch-name = \"bad name\"", "inline");
        assert!(matches!(result, Err(ConfigError::InvalidBranchName { .. })));
    }
}
