//! Label expression rendering
//!
//! Expands the tokens of an object's label expression against the object's
//! attributes. Missing data renders as the empty string; a token the object
//! has no capability for stays in the output as literal text.

use crate::model::{Property, Renderable};
use crate::render::config::{NewlineMode, RenderConfig, DEFAULT_FEATURE};
use crate::render::tokens::{
    self, CONTENT, DOCUMENTATION, LINKED_DOCUMENTATION, NAME, NEWLINE_ESCAPE, PROPERTIES,
    PROPERTIES_VALUES,
};

/// Renders label expressions.
///
/// Holds only immutable settings, so one instance can be shared freely
/// between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRenderer {
    newline_mode: NewlineMode,
    feature: String,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(NewlineMode::default())
    }
}

impl TextRenderer {
    /// Create a renderer reading the default `labelExpression` feature
    #[must_use]
    pub fn new(newline_mode: NewlineMode) -> Self {
        Self {
            newline_mode,
            feature: DEFAULT_FEATURE.to_string(),
        }
    }

    /// Create a renderer from loaded configuration
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            newline_mode: config.render.newline_mode,
            feature: config.render.feature.clone(),
        }
    }

    /// Newline escape handling in use
    #[must_use]
    pub const fn newline_mode(&self) -> NewlineMode {
        self.newline_mode
    }

    /// Name of the feature holding the expression
    #[must_use]
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// The raw expression stored on the object, if any
    #[must_use]
    pub fn expression<'a>(&self, object: &'a dyn Renderable) -> Option<&'a str> {
        object.feature(&self.feature).filter(|e| !e.is_empty())
    }

    /// Render the object's label expression.
    ///
    /// Returns the empty string when the object has no expression.
    #[must_use]
    pub fn render(&self, object: &dyn Renderable) -> String {
        let Some(expression) = self.expression(object) else {
            return String::new();
        };

        let mut result = self.render_newlines(expression);

        // Diagram components take their attributes from the concept
        let source = object.concept().unwrap_or(object);

        result = result.replace(NAME, source.name());

        if let Some(documentation) = source.documentation() {
            result = result.replace(DOCUMENTATION, documentation);
        }

        if let Some(content) = source.content() {
            result = result.replace(CONTENT, content);
        }

        if let Some(properties) = source.properties() {
            result = render_properties(properties, &result);
        }

        // Linked documentation is resolved on the diagram object itself
        if object.note_links().is_some() {
            result = render_linked_documentation(object, &result);
        }

        result
    }

    /// Apply the newline mode to a raw expression.
    pub(crate) fn render_newlines(&self, expression: &str) -> String {
        match self.newline_mode {
            NewlineMode::MultiLine => expression.replace(NEWLINE_ESCAPE, ""),
            NewlineMode::SingleLine => expression.replace(NEWLINE_ESCAPE, "\n"),
        }
    }
}

fn render_properties(properties: &[Property], expression: &str) -> String {
    let result =
        tokens::replace_property_values(expression, |key| property_value(properties, key));
    let result = result.replace(PROPERTIES, &list_properties(properties, true));
    result.replace(PROPERTIES_VALUES, &list_properties(properties, false))
}

/// Value of the first property with exactly this key, or empty
fn property_value(properties: &[Property], key: &str) -> String {
    properties
        .iter()
        .find(|p| p.key == key)
        .map_or_else(String::new, |p| p.value.clone())
}

fn list_properties(properties: &[Property], with_keys: bool) -> String {
    properties
        .iter()
        .map(|p| {
            if with_keys {
                format!("{}: {}", p.key, p.value)
            } else {
                p.value.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_linked_documentation(object: &dyn Renderable, expression: &str) -> String {
    // Skip connection traversal unless the token is actually used
    if !expression.contains(LINKED_DOCUMENTATION) {
        return expression.to_string();
    }

    let neighbor = object
        .note_links()
        .and_then(|links| links.linked_neighbor());
    let replacement = neighbor
        .as_deref()
        .and_then(|n| n.concept())
        .and_then(|concept| concept.documentation())
        .unwrap_or_default();

    expression.replace(LINKED_DOCUMENTATION, replacement)
}
