//! Label expression doctor — diagnostics for stored expressions
//!
//! Checks every expression in a model against the object that carries it and
//! reports tokens that will not expand the way the author probably expects.
//! Findings are grouped as errors (must fix), warnings (should fix) and
//! info (suggestions).

use std::collections::HashSet;

use crate::edit::accepts_expression;
use crate::model::{Model, ObjectRef, Renderable};
use crate::render::config::NewlineMode;
use crate::render::tokens::{self, Token, NEWLINE_ESCAPE};
use crate::render::TextRenderer;

/// Severity level for a diagnostic finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Must fix — the expression can never render
    Error,
    /// Should fix — part of the expression stays literal or empty
    Warning,
    /// Suggestion — informational
    Info,
}

/// A single diagnostic finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Severity of the finding
    pub severity: Severity,
    /// Short code for the finding (e.g., "L001")
    pub code: String,
    /// Id of the object carrying the expression
    pub object: String,
    /// Human-readable message
    pub message: String,
    /// Suggested fix (optional)
    pub suggestion: Option<String>,
}

/// Diagnostic report from `labelexpr doctor`
#[derive(Debug, Clone)]
pub struct DiagnosticReport {
    /// All findings, in order of severity (errors first)
    pub findings: Vec<Finding>,
}

impl DiagnosticReport {
    /// Returns true if the report has no findings at all
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Returns the number of errors
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Returns the number of warnings
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Returns the number of info items
    #[must_use]
    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}

/// Run all diagnostic checks and return a report.
#[must_use]
pub fn diagnose(model: &Model, renderer: &TextRenderer) -> DiagnosticReport {
    let mut findings = Vec::new();

    check_concept_expressions(model, renderer, &mut findings);
    for object in model.object_refs() {
        let Some(expression) = renderer.expression(&object) else {
            continue;
        };
        if !accepts_expression(object.object()) {
            findings.push(Finding {
                severity: Severity::Error,
                code: "L005".to_string(),
                object: object.id().to_string(),
                message: format!(
                    "A {} cannot carry a label expression",
                    object.object().kind.label()
                ),
                suggestion: Some(format!("Remove the '{}' feature", renderer.feature())),
            });
            continue;
        }
        // Lint what the renderer sees after newline handling
        let expanded = renderer.render_newlines(expression);
        check_tokens(&object, &expanded, &mut findings);
        check_newline_escapes(&object, expression, renderer, &mut findings);
    }

    // Sort: errors first, then warnings, then info
    findings.sort_by_key(|f| match f.severity {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    });

    DiagnosticReport { findings }
}

/// L005: expressions stored on concepts are never rendered
fn check_concept_expressions(model: &Model, renderer: &TextRenderer, findings: &mut Vec<Finding>) {
    for concept in &model.concepts {
        if renderer.expression(concept).is_some() {
            findings.push(Finding {
                severity: Severity::Error,
                code: "L005".to_string(),
                object: concept.id.clone(),
                message: format!(
                    "Concept '{}' carries a label expression; only diagram objects render labels",
                    concept.name
                ),
                suggestion: Some(
                    "Move the expression to the diagram components that show this concept"
                        .to_string(),
                ),
            });
        }
    }
}

/// L001-L004: per-token checks
fn check_tokens(object: &ObjectRef<'_>, expression: &str, findings: &mut Vec<Finding>) {
    let source: &dyn Renderable = object.concept().unwrap_or(object);
    let mut seen = HashSet::new();

    for span in tokens::scan(expression) {
        if !seen.insert(span.raw) {
            continue;
        }
        let id = object.id().to_string();

        let Some(token) = Token::parse(span.raw) else {
            findings.push(Finding {
                severity: Severity::Warning,
                code: "L001".to_string(),
                object: id,
                message: format!("Unknown token {} will be shown literally", span.raw),
                suggestion: Some("Run `labelexpr tokens` to list supported tokens".to_string()),
            });
            continue;
        };

        let supported = match &token {
            Token::Name => true,
            Token::Documentation => source.documentation().is_some(),
            Token::Content => source.content().is_some(),
            Token::Properties | Token::PropertiesValues | Token::PropertyValue(_) => {
                source.properties().is_some()
            }
            Token::LinkedDocumentation => object.note_links().is_some(),
        };
        if !supported {
            findings.push(Finding {
                severity: Severity::Warning,
                code: "L002".to_string(),
                object: id,
                message: format!(
                    "Token {} is not supported on a {} and will be shown literally",
                    span.raw,
                    object.object().kind.label()
                ),
                suggestion: None,
            });
            continue;
        }

        match token {
            Token::PropertyValue(key) => check_property_key(source, &key, id, findings),
            Token::LinkedDocumentation => check_linked_neighbor(object, id, findings),
            _ => {}
        }
    }
}

/// L003: `${property:KEY}` with no such property
fn check_property_key(
    source: &dyn Renderable,
    key: &str,
    object: String,
    findings: &mut Vec<Finding>,
) {
    let exists = source
        .properties()
        .is_some_and(|props| props.iter().any(|p| p.key == key));
    if !exists {
        findings.push(Finding {
            severity: Severity::Info,
            code: "L003".to_string(),
            object,
            message: format!("No property '{key}'; the token renders as empty"),
            suggestion: Some(format!("Add a '{key}' property or check the key's spelling")),
        });
    }
}

/// L004: `${linkeddoc}` on a note with nothing useful to borrow from
fn check_linked_neighbor(object: &ObjectRef<'_>, id: String, findings: &mut Vec<Finding>) {
    let Some(links) = object.note_links() else {
        return;
    };
    let message = match links.linked_neighbor() {
        None => "Note has no connections; ${linkeddoc} renders as empty",
        Some(neighbor) if neighbor.concept().is_none() => {
            "Note is connected to an object without a concept; ${linkeddoc} renders as empty"
        }
        Some(_) => return,
    };
    findings.push(Finding {
        severity: Severity::Warning,
        code: "L004".to_string(),
        object: id,
        message: message.to_string(),
        suggestion: Some("Connect the note to a diagram component".to_string()),
    });
}

/// L006: `\n` escapes are deleted in multi-line mode
fn check_newline_escapes(
    object: &ObjectRef<'_>,
    expression: &str,
    renderer: &TextRenderer,
    findings: &mut Vec<Finding>,
) {
    if renderer.newline_mode() == NewlineMode::MultiLine && expression.contains(NEWLINE_ESCAPE) {
        findings.push(Finding {
            severity: Severity::Info,
            code: "L006".to_string(),
            object: object.id().to_string(),
            message: "Expression contains \\n escapes, which multi-line mode deletes".to_string(),
            suggestion: Some(
                "Use real line breaks, or set `newline_mode = \"single-line\"`".to_string(),
            ),
        });
    }
}
