//! Label expression editing
//!
//! Decides which diagram objects may carry a label expression and applies an
//! edit to a selection of objects as one batch.

use std::fmt;

use anyhow::{bail, Result};

use crate::model::{DiagramObject, Model, ObjectKind};

/// Why an object in the selection was left unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The object kind cannot carry a label expression
    NotAccepted,
    /// The object is locked
    Locked,
    /// The object already holds this expression
    Unchanged,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAccepted => write!(f, "does not accept label expressions"),
            Self::Locked => write!(f, "is locked"),
            Self::Unchanged => write!(f, "already has this expression"),
        }
    }
}

/// Result of applying an expression to a selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpressionEdit {
    /// Ids of objects whose expression changed, in selection order
    pub changed: Vec<String>,
    /// Ids left alone, with the reason
    pub skipped: Vec<(String, SkipReason)>,
}

impl ExpressionEdit {
    /// Returns true if nothing was changed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Whether this kind of diagram object can carry a label expression.
///
/// Components, notes and groups can; diagram references cannot.
#[must_use]
pub const fn accepts_expression(object: &DiagramObject) -> bool {
    matches!(
        object.kind,
        ObjectKind::Component { .. } | ObjectKind::Note { .. } | ObjectKind::Group { .. }
    )
}

/// Whether the expression of this object may be edited right now
#[must_use]
pub const fn is_editable(object: &DiagramObject) -> bool {
    accepts_expression(object) && !object.locked
}

/// Set `expression` under `feature` on every listed object.
///
/// Unknown ids fail the whole edit before anything changes. Setting the empty
/// string removes the feature.
pub fn set_expression(
    model: &mut Model,
    ids: &[&str],
    feature: &str,
    expression: &str,
) -> Result<ExpressionEdit> {
    for id in ids {
        if model.object(id).is_none() {
            bail!("Unknown diagram object '{id}'");
        }
    }

    let mut edit = ExpressionEdit::default();

    for id in ids {
        let Some(object) = model.object_mut(id) else {
            continue;
        };

        if !is_editable(object) {
            let reason = if accepts_expression(object) {
                SkipReason::Locked
            } else {
                SkipReason::NotAccepted
            };
            edit.skipped.push(((*id).to_string(), reason));
            continue;
        }
        if object.features.get(feature).unwrap_or_default() == expression {
            edit.skipped.push(((*id).to_string(), SkipReason::Unchanged));
            continue;
        }

        if expression.is_empty() {
            object.features.remove(feature);
        } else {
            object.features.set(feature, expression);
        }
        edit.changed.push((*id).to_string());
    }

    Ok(edit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::config::DEFAULT_FEATURE;
    use crate::testutil::{component, concept, group, model_with, note};

    fn test_model() -> Model {
        let mut locked = note("locked", "", "");
        locked.locked = true;
        let mut reference = note("ref", "", "");
        reference.kind = ObjectKind::Reference {
            diagram: "view-2".to_string(),
        };

        model_with(
            vec![concept("c1", "API", "", &[])],
            vec![
                component("o1", "c1", ""),
                note("n1", "text", "old"),
                group("g1", "Backend", ""),
                locked,
                reference,
            ],
            vec![],
        )
    }

    fn expression_of<'a>(model: &'a Model, id: &str) -> Option<&'a str> {
        model.object(id).unwrap().features.get(DEFAULT_FEATURE)
    }

    #[test]
    fn test_accepts_expression_by_kind() {
        let model = test_model();
        assert!(accepts_expression(model.object("o1").unwrap()));
        assert!(accepts_expression(model.object("n1").unwrap()));
        assert!(accepts_expression(model.object("g1").unwrap()));
        assert!(!accepts_expression(model.object("ref").unwrap()));
    }

    #[test]
    fn test_locked_object_not_editable() {
        let model = test_model();
        assert!(accepts_expression(model.object("locked").unwrap()));
        assert!(!is_editable(model.object("locked").unwrap()));
        assert!(is_editable(model.object("o1").unwrap()));
    }

    #[test]
    fn test_set_expression_on_selection() {
        let mut model = test_model();
        let edit =
            set_expression(&mut model, &["o1", "g1"], DEFAULT_FEATURE, "${name}").unwrap();

        assert_eq!(edit.changed, vec!["o1", "g1"]);
        assert!(edit.skipped.is_empty());
        assert_eq!(expression_of(&model, "o1"), Some("${name}"));
        assert_eq!(expression_of(&model, "g1"), Some("${name}"));
    }

    #[test]
    fn test_set_expression_replaces_existing() {
        let mut model = test_model();
        set_expression(&mut model, &["n1"], DEFAULT_FEATURE, "new").unwrap();
        assert_eq!(expression_of(&model, "n1"), Some("new"));
    }

    #[test]
    fn test_set_empty_expression_removes_feature() {
        let mut model = test_model();
        let edit = set_expression(&mut model, &["n1"], DEFAULT_FEATURE, "").unwrap();

        assert_eq!(edit.changed, vec!["n1"]);
        assert_eq!(expression_of(&model, "n1"), None);
        assert!(model.object("n1").unwrap().features.is_empty());
    }

    #[test]
    fn test_set_empty_expression_on_unset_is_unchanged() {
        let mut model = test_model();
        let edit = set_expression(&mut model, &["o1"], DEFAULT_FEATURE, "").unwrap();

        assert!(edit.is_empty());
        assert_eq!(
            edit.skipped,
            vec![("o1".to_string(), SkipReason::Unchanged)]
        );
    }

    #[test]
    fn test_skips_locked_unaccepted_and_unchanged() {
        let mut model = test_model();
        let edit = set_expression(
            &mut model,
            &["locked", "ref", "n1", "o1"],
            DEFAULT_FEATURE,
            "old",
        )
        .unwrap();

        assert_eq!(edit.changed, vec!["o1"]);
        assert_eq!(
            edit.skipped,
            vec![
                ("locked".to_string(), SkipReason::Locked),
                ("ref".to_string(), SkipReason::NotAccepted),
                ("n1".to_string(), SkipReason::Unchanged),
            ]
        );
        assert_eq!(expression_of(&model, "locked"), None);
        assert_eq!(expression_of(&model, "ref"), None);
    }

    #[test]
    fn test_unknown_id_changes_nothing() {
        let mut model = test_model();
        let err = set_expression(&mut model, &["o1", "missing"], DEFAULT_FEATURE, "x")
            .unwrap_err();

        assert!(err.to_string().contains("Unknown diagram object 'missing'"));
        assert_eq!(expression_of(&model, "o1"), None);
    }

    #[test]
    fn test_custom_feature_name() {
        let mut model = test_model();
        set_expression(&mut model, &["g1"], "caption", "${name}").unwrap();

        let features = &model.object("g1").unwrap().features;
        assert_eq!(features.get("caption"), Some("${name}"));
        assert_eq!(features.get(DEFAULT_FEATURE), None);
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::Locked.to_string(), "is locked");
        assert_eq!(
            SkipReason::NotAccepted.to_string(),
            "does not accept label expressions"
        );
    }
}
