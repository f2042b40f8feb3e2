//! Diagram model snapshot
//!
//! Concepts, diagram objects and the connections between them, loaded from a
//! JSON snapshot. `ObjectRef` is the borrowed view that the renderer sees.

pub mod capability;

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

pub use capability::{NoteLinks, Renderable};

/// A key/value pair attached to a model object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Property {
    /// Lookup key, matched exactly
    pub key: String,
    /// Property value
    #[serde(default)]
    pub value: String,
}

impl Property {
    /// Create a property from a key and value
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A single named feature value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feature {
    /// Feature name
    pub name: String,
    /// Feature value
    pub value: String,
}

/// Ordered bag of named string attributes
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Features(Vec<Feature>);

impl Features {
    /// Create an empty feature bag
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Value of the named feature, if present
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Set a feature, replacing an existing value in place
    pub fn set(&mut self, name: &str, value: &str) {
        if let Some(feature) = self.0.iter_mut().find(|f| f.name == name) {
            feature.value = value.to_string();
        } else {
            self.0.push(Feature {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
    }

    /// Remove a feature. Returns true if it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|f| f.name != name);
        self.0.len() != before
    }

    /// Returns true if no features are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over features in stored order
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.0.iter()
    }
}

/// A domain concept: an element or relationship of the architecture model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Concept {
    /// Unique id
    pub id: String,
    /// Concept type, e.g. `technology-interface`
    #[serde(default)]
    pub kind: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Documentation text
    #[serde(default)]
    pub documentation: String,
    /// Ordered properties
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Feature bag
    #[serde(default)]
    pub features: Features,
}

impl Renderable for Concept {
    fn feature(&self, name: &str) -> Option<&str> {
        self.features.get(name)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn documentation(&self) -> Option<&str> {
        Some(self.documentation.as_str())
    }

    fn properties(&self) -> Option<&[Property]> {
        Some(self.properties.as_slice())
    }
}

/// What a diagram object is
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ObjectKind {
    /// Visual representation of a concept
    Component {
        /// Id of the wrapped concept
        concept: String,
    },
    /// Free-text note
    Note {
        /// Note text
        #[serde(default)]
        content: String,
    },
    /// Visual grouping box
    Group {
        /// Group documentation
        #[serde(default)]
        documentation: String,
    },
    /// Link to another diagram
    Reference {
        /// Id of the referenced diagram
        #[serde(default)]
        diagram: String,
    },
}

impl ObjectKind {
    /// Short lowercase label for messages
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Component { .. } => "component",
            Self::Note { .. } => "note",
            Self::Group { .. } => "group",
            Self::Reference { .. } => "reference",
        }
    }
}

/// An object placed on a diagram
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagramObject {
    /// Unique id
    pub id: String,
    /// Kind and kind-specific data
    #[serde(flatten)]
    pub kind: ObjectKind,
    /// Own name. Components show their concept's name instead.
    #[serde(default)]
    pub name: String,
    /// Ordered properties of notes and groups
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Feature bag, holds the label expression
    #[serde(default)]
    pub features: Features,
    /// Locked objects refuse edits
    #[serde(default)]
    pub locked: bool,
}

/// A directed connection between two diagram objects
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Connection {
    /// Unique id
    pub id: String,
    /// Id of the diagram object the connection leaves
    pub source: String,
    /// Id of the diagram object the connection arrives at
    pub target: String,
}

/// A loaded model snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Model {
    /// Domain concepts
    #[serde(default)]
    pub concepts: Vec<Concept>,
    /// Diagram objects
    #[serde(default)]
    pub objects: Vec<DiagramObject>,
    /// Connections, in display order
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Model {
    /// Load a model snapshot from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse a model snapshot from JSON text
    pub fn parse(content: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(content).context("Failed to parse model JSON")?;
        model.validate()?;
        Ok(model)
    }

    /// Find a concept by id
    #[must_use]
    pub fn concept(&self, id: &str) -> Option<&Concept> {
        self.concepts.iter().find(|c| c.id == id)
    }

    /// Find a diagram object by id
    #[must_use]
    pub fn object(&self, id: &str) -> Option<&DiagramObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Find a diagram object by id for modification
    pub fn object_mut(&mut self, id: &str) -> Option<&mut DiagramObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Renderable view of a diagram object
    #[must_use]
    pub fn object_ref(&self, id: &str) -> Option<ObjectRef<'_>> {
        self.object(id).map(|object| ObjectRef {
            model: self,
            object,
        })
    }

    /// Renderable views of all diagram objects, in stored order
    pub fn object_refs(&self) -> impl Iterator<Item = ObjectRef<'_>> {
        self.objects.iter().map(|object| ObjectRef {
            model: self,
            object,
        })
    }

    /// Connections leaving the given object, in order
    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| c.source == id)
    }

    /// Connections arriving at the given object, in order
    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| c.target == id)
    }

    /// Validate id uniqueness and references
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let ids = self
            .concepts
            .iter()
            .map(|c| c.id.as_str())
            .chain(self.objects.iter().map(|o| o.id.as_str()))
            .chain(self.connections.iter().map(|c| c.id.as_str()));
        for id in ids {
            if id.trim().is_empty() {
                bail!("Model ids cannot be empty");
            }
            if !seen.insert(id) {
                bail!("Duplicate model id: '{id}'");
            }
        }

        for object in &self.objects {
            if let ObjectKind::Component { concept } = &object.kind {
                if self.concept(concept).is_none() {
                    bail!(
                        "Component '{}' references unknown concept '{concept}'",
                        object.id
                    );
                }
            }
        }

        for connection in &self.connections {
            for end in [&connection.source, &connection.target] {
                if self.object(end).is_none() {
                    bail!(
                        "Connection '{}' references unknown diagram object '{end}'",
                        connection.id
                    );
                }
            }
        }

        Ok(())
    }
}

/// Borrowed view of a diagram object inside its model
#[derive(Debug, Clone, Copy)]
pub struct ObjectRef<'a> {
    model: &'a Model,
    object: &'a DiagramObject,
}

impl<'a> ObjectRef<'a> {
    /// The underlying diagram object
    #[must_use]
    pub const fn object(&self) -> &'a DiagramObject {
        self.object
    }

    /// The object's id
    #[must_use]
    pub fn id(&self) -> &'a str {
        &self.object.id
    }

    /// The wrapped concept, for components
    #[must_use]
    pub fn wrapped_concept(&self) -> Option<&'a Concept> {
        match &self.object.kind {
            ObjectKind::Component { concept } => self.model.concept(concept),
            _ => None,
        }
    }

    fn neighbor(&self, id: &str) -> Option<Box<dyn Renderable + 'a>> {
        self.model
            .object_ref(id)
            .map(|r| Box::new(r) as Box<dyn Renderable + 'a>)
    }
}

impl Renderable for ObjectRef<'_> {
    fn feature(&self, name: &str) -> Option<&str> {
        self.object.features.get(name)
    }

    fn name(&self) -> &str {
        self.wrapped_concept()
            .map_or(self.object.name.as_str(), |c| c.name.as_str())
    }

    fn concept(&self) -> Option<&dyn Renderable> {
        self.wrapped_concept().map(|c| c as &dyn Renderable)
    }

    fn documentation(&self) -> Option<&str> {
        match &self.object.kind {
            ObjectKind::Group { documentation } => Some(documentation.as_str()),
            _ => None,
        }
    }

    fn content(&self) -> Option<&str> {
        match &self.object.kind {
            ObjectKind::Note { content } => Some(content.as_str()),
            _ => None,
        }
    }

    fn properties(&self) -> Option<&[Property]> {
        match self.object.kind {
            ObjectKind::Note { .. } | ObjectKind::Group { .. } => {
                Some(self.object.properties.as_slice())
            }
            ObjectKind::Component { .. } | ObjectKind::Reference { .. } => None,
        }
    }

    fn note_links(&self) -> Option<&dyn NoteLinks> {
        match self.object.kind {
            ObjectKind::Note { .. } => Some(self),
            _ => None,
        }
    }
}

impl NoteLinks for ObjectRef<'_> {
    fn first_outgoing_target(&self) -> Option<Box<dyn Renderable + '_>> {
        self.model
            .outgoing(&self.object.id)
            .next()
            .and_then(|c| self.neighbor(&c.target))
    }

    fn first_incoming_source(&self) -> Option<Box<dyn Renderable + '_>> {
        self.model
            .incoming(&self.object.id)
            .next()
            .and_then(|c| self.neighbor(&c.source))
    }
}
