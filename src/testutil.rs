//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use crate::model::{
    Concept, Connection, DiagramObject, Features, Model, ObjectKind, Property, Renderable,
};
use crate::render::config::DEFAULT_FEATURE;

/// A free-standing renderable with configurable capabilities.
///
/// Capabilities start absent; each builder method switches one on.
#[derive(Debug, Clone, Default)]
pub struct TestObject {
    name: String,
    features: Features,
    documentation: Option<String>,
    content: Option<String>,
    properties: Option<Vec<Property>>,
}

impl TestObject {
    /// An object with only a name
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Give the object documentation capability
    #[must_use]
    pub fn documented(mut self, documentation: &str) -> Self {
        self.documentation = Some(documentation.to_string());
        self
    }

    /// Give the object text content capability
    #[must_use]
    pub fn with_content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    /// Give the object a property list
    #[must_use]
    pub fn with_properties(mut self, pairs: &[(&str, &str)]) -> Self {
        self.properties = Some(pairs.iter().map(|(k, v)| Property::new(*k, *v)).collect());
        self
    }

    /// Store a label expression under the default feature
    #[must_use]
    pub fn with_expression(self, expression: &str) -> Self {
        self.with_feature(DEFAULT_FEATURE, expression)
    }

    /// Store an arbitrary feature
    #[must_use]
    pub fn with_feature(mut self, name: &str, value: &str) -> Self {
        self.features.set(name, value);
        self
    }
}

impl Renderable for TestObject {
    fn feature(&self, name: &str) -> Option<&str> {
        self.features.get(name)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    fn properties(&self) -> Option<&[Property]> {
        self.properties.as_deref()
    }
}

/// A concept with the given properties
#[must_use]
pub fn concept(id: &str, name: &str, documentation: &str, properties: &[(&str, &str)]) -> Concept {
    Concept {
        id: id.to_string(),
        kind: "application-component".to_string(),
        name: name.to_string(),
        documentation: documentation.to_string(),
        properties: properties
            .iter()
            .map(|(k, v)| Property::new(*k, *v))
            .collect(),
        features: Features::new(),
    }
}

fn diagram_object(id: &str, kind: ObjectKind, expression: &str) -> DiagramObject {
    let mut features = Features::new();
    if !expression.is_empty() {
        features.set(DEFAULT_FEATURE, expression);
    }
    DiagramObject {
        id: id.to_string(),
        kind,
        name: String::new(),
        properties: vec![],
        features,
        locked: false,
    }
}

/// A diagram component wrapping `concept`, with an optional expression
#[must_use]
pub fn component(id: &str, concept: &str, expression: &str) -> DiagramObject {
    diagram_object(
        id,
        ObjectKind::Component {
            concept: concept.to_string(),
        },
        expression,
    )
}

/// A note with content and an optional expression
#[must_use]
pub fn note(id: &str, content: &str, expression: &str) -> DiagramObject {
    diagram_object(
        id,
        ObjectKind::Note {
            content: content.to_string(),
        },
        expression,
    )
}

/// A named group with an optional expression
#[must_use]
pub fn group(id: &str, name: &str, expression: &str) -> DiagramObject {
    let mut object = diagram_object(
        id,
        ObjectKind::Group {
            documentation: String::new(),
        },
        expression,
    );
    object.name = name.to_string();
    object
}

/// Assemble a model from parts. Connections are `(id, source, target)`.
#[must_use]
pub fn model_with(
    concepts: Vec<Concept>,
    objects: Vec<DiagramObject>,
    connections: Vec<(&str, &str, &str)>,
) -> Model {
    Model {
        concepts,
        objects,
        connections: connections
            .into_iter()
            .map(|(id, source, target)| Connection {
                id: id.to_string(),
                source: source.to_string(),
                target: target.to_string(),
            })
            .collect(),
    }
}
