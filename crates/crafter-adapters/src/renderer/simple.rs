//! Simple variable substitution renderer.

use std::collections::BTreeMap;

use crafter_core::{application::ports::TemplateRenderer, error::CrafterResult};
use tracing::instrument;

/// Renderer using `${key}` variable substitution.
///
/// Placeholders with no matching key are left in place untouched; the
/// template language offers no conditionals or loops.
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimpleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all)]
    fn render(&self, template: &str, data: &BTreeMap<String, String>) -> CrafterResult<String> {
        let mut rendered = template.to_string();
        for (key, value) in data {
            rendered = rendered.replace(&format!("${{{key}}}"), value);
        }
        Ok(rendered)
    }
}
