//! Placeholder substitution for template paths and file bodies.
use crate::context::Variables;
use crate::error::{Error, Result};
use crate::ext::PathExt;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// `{{ identifier }}` with optional whitespace inside the braces.
const PLACEHOLDER_PATTERN: &str = r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is valid"));

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given variables.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `variables` - Values for the placeholders
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, variables: &Variables) -> Result<String>;

    /// Renders a path with the given variables.
    ///
    /// # Arguments
    /// * `template_path` - Path to render
    /// * `variables` - Values for the placeholders
    ///
    /// # Returns
    /// * `Result<String>` - Rendered path as string
    fn render_path(&self, template_path: &Path, variables: &Variables) -> Result<String> {
        self.render(template_path.to_str_checked()?, variables)
    }
}

/// Single pass `{{identifier}}` substitution.
///
/// Values are inserted literally: a value that itself contains placeholder
/// syntax is not rendered again.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRenderer;

impl PlaceholderRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render(&self, template: &str, variables: &Variables) -> Result<String> {
        let mut rendered = String::with_capacity(template.len());
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(template) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let name = name.as_str();
            let value = variables
                .get(name)
                .ok_or_else(|| Error::UndefinedVariable { name: name.to_string() })?;

            rendered.push_str(&template[last..whole.start()]);
            rendered.push_str(value);
            last = whole.end();
        }
        rendered.push_str(&template[last..]);

        Ok(rendered)
    }
}
