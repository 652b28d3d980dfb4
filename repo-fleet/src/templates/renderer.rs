//! Template renderer.

use super::{TemplateContext, TemplateError};
use handlebars::{no_escape, Handlebars};

/// Registry without HTML escaping (the output is markdown) and in strict
/// mode, so a misspelled variable fails instead of rendering empty.
fn handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs
}

/// Renders commit messages and pull request text per repository.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a new template renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: handlebars_registry(),
        }
    }

    /// Renders `template` for one repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is malformed or references an
    /// unknown variable.
    pub fn render(
        &self,
        template: &str,
        context: &TemplateContext<'_>,
    ) -> Result<String, TemplateError> {
        Ok(self.handlebars.render_template(template, context)?)
    }
}
