//! Per-repository text rendering using Handlebars.
//!
//! Commit messages and pull request titles/bodies may reference
//! `{{owner}}`, `{{repository}}`, `{{branch}}` and `{{base_branch}}`.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::TemplateRenderer;

use serde::Serialize;

/// Variables available to rollout templates.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TemplateContext<'a> {
    /// Repository owner.
    pub owner: &'a str,

    /// Repository name.
    pub repository: &'a str,

    /// Branch carrying the change.
    pub branch: &'a str,

    /// Branch the pull request targets.
    pub base_branch: &'a str,
}
