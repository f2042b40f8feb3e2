//! Capability traits queried by the renderer
//!
//! Not every model object exposes every capability. Optional capabilities are
//! accessors returning `Option`, and the renderer checks each one before use.

use crate::model::Property;

/// An object that can be rendered through a label expression.
///
/// `name` and `feature` are always available. The other accessors default to
/// `None`, meaning the object does not have that capability at all (which is
/// different from having it with an empty value).
pub trait Renderable {
    /// Look up a named feature in the object's feature bag
    fn feature(&self, name: &str) -> Option<&str>;

    /// The object's name, empty if unset
    fn name(&self) -> &str;

    /// The underlying concept, if this is a diagram object that wraps one
    fn concept(&self) -> Option<&dyn Renderable> {
        None
    }

    /// Documentation text, if the object is documentable
    fn documentation(&self) -> Option<&str> {
        None
    }

    /// Text content, if the object carries any
    fn content(&self) -> Option<&str> {
        None
    }

    /// Ordered properties, if the object supports a property list
    fn properties(&self) -> Option<&[Property]> {
        None
    }

    /// Connection access, if this is a note-like object
    fn note_links(&self) -> Option<&dyn NoteLinks> {
        None
    }
}

/// Connection traversal for note-like objects.
pub trait NoteLinks {
    /// Target of the first connection leaving this object
    fn first_outgoing_target(&self) -> Option<Box<dyn Renderable + '_>>;

    /// Source of the first connection arriving at this object
    fn first_incoming_source(&self) -> Option<Box<dyn Renderable + '_>>;

    /// The connected neighbor whose documentation a note borrows.
    ///
    /// Outgoing connections win over incoming ones.
    fn linked_neighbor(&self) -> Option<Box<dyn Renderable + '_>> {
        self.first_outgoing_target()
            .or_else(|| self.first_incoming_source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;

    impl Renderable for Bare {
        fn feature(&self, _name: &str) -> Option<&str> {
            None
        }

        fn name(&self) -> &str {
            "bare"
        }
    }

    struct Links {
        outgoing: Option<&'static str>,
        incoming: Option<&'static str>,
    }

    struct Named(&'static str);

    impl Renderable for Named {
        fn feature(&self, _name: &str) -> Option<&str> {
            None
        }

        fn name(&self) -> &str {
            self.0
        }
    }

    impl NoteLinks for Links {
        fn first_outgoing_target(&self) -> Option<Box<dyn Renderable + '_>> {
            self.outgoing
                .map(|n| Box::new(Named(n)) as Box<dyn Renderable>)
        }

        fn first_incoming_source(&self) -> Option<Box<dyn Renderable + '_>> {
            self.incoming
                .map(|n| Box::new(Named(n)) as Box<dyn Renderable>)
        }
    }

    #[test]
    fn test_optional_capabilities_default_to_none() {
        let bare = Bare;
        assert!(bare.concept().is_none());
        assert!(bare.documentation().is_none());
        assert!(bare.content().is_none());
        assert!(bare.properties().is_none());
        assert!(bare.note_links().is_none());
    }

    #[test]
    fn test_linked_neighbor_prefers_outgoing() {
        let links = Links {
            outgoing: Some("out"),
            incoming: Some("in"),
        };
        assert_eq!(links.linked_neighbor().unwrap().name(), "out");
    }

    #[test]
    fn test_linked_neighbor_falls_back_to_incoming() {
        let links = Links {
            outgoing: None,
            incoming: Some("in"),
        };
        assert_eq!(links.linked_neighbor().unwrap().name(), "in");
    }

    #[test]
    fn test_linked_neighbor_none_without_connections() {
        let links = Links {
            outgoing: None,
            incoming: None,
        };
        assert!(links.linked_neighbor().is_none());
    }
}
