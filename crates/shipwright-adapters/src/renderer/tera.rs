//! Tera-backed renderer.
//!
//! Every render uses a fresh one-off `Tera` instance: templates come from the
//! store as plain strings, so there is nothing worth caching between calls.
//! Autoescaping is off (the output is shell, YAML and Makefile syntax, never
//! HTML) and a reference to an unset variable is an error.

use ::tera::{Context, Tera};
use tracing::{debug, instrument};

use shipwright_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::VariableMap,
    error::ShipwrightResult,
};

/// Renders templates with [`tera`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TeraRenderer;

impl TeraRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for TeraRenderer {
    #[instrument(skip(self, template, variables), fields(vars = variables.len()))]
    fn render(
        &self,
        name: &str,
        template: &str,
        variables: &VariableMap,
    ) -> ShipwrightResult<String> {
        let context = Context::from_serialize(variables).map_err(|e| failed(name, &e))?;

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        let rendered = tera
            .render_str(template, &context)
            .map_err(|e| failed(name, &e))?;

        debug!(bytes = rendered.len(), "Rendered");
        Ok(rendered)
    }
}

fn failed(name: &str, error: &::tera::Error) -> ApplicationError {
    ApplicationError::RenderingFailed {
        template: name.to_string(),
        reason: format_tera_error(error),
    }
}

/// Flatten a tera error chain into one readable message.
///
/// Tera names one-off templates `__tera_one_off`; that name means nothing
/// to a user, so it is stripped.
fn format_tera_error(error: &::tera::Error) -> String {
    let mut messages = Vec::new();
    let mut current: Option<&dyn std::error::Error> = Some(error);

    while let Some(err) = current {
        let cleaned = err
            .to_string()
            .replace("while rendering '__tera_one_off'", "")
            .replace("Failed to render '__tera_one_off'", "")
            .replace("Failed to parse '__tera_one_off'", "")
            .replace("'__tera_one_off'", "template")
            .trim()
            .to_string();
        if !cleaned.is_empty() && !messages.contains(&cleaned) {
            messages.push(cleaned);
        }
        current = err.source();
    }

    if messages.is_empty() {
        "template syntax error".to_string()
    } else {
        messages.join(": ")
    }
}
