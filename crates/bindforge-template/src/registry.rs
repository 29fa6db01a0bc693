use std::collections::BTreeMap;

use crate::template::{RenderContext, TemplateDocument, TemplateError};

/// Named cache of parsed templates.
///
/// Populated once at generator construction, read-only during a generation
/// run; a document is parsed a single time however many targets render it.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    templates: BTreeMap<String, TemplateDocument>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and cache a template under `name`. Re-registering a name
    /// replaces the previous document.
    pub fn register(&mut self, name: impl Into<String>, text: &str) -> Result<(), TemplateError> {
        let document = TemplateDocument::parse(text)?;
        self.templates.insert(name.into(), document);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TemplateDocument> {
        self.templates.get(name)
    }

    /// Render a cached template by name.
    pub fn render(&self, name: &str, context: &RenderContext) -> Result<String, TemplateError> {
        let document = self
            .templates
            .get(name)
            .ok_or_else(|| TemplateError::UnknownTemplate {
                name: name.to_string(),
            })?;
        document.render(context)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
