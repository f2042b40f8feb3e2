//! labelexpr - Label expression renderer for diagram models
//!
//! Diagram objects can carry a label expression: a format string with tokens
//! such as `${name}` or `${property:cost}` that expand against the object's
//! attributes to produce the text shown on the diagram.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod doctor;
pub mod edit;
pub mod log;
pub mod model;
pub mod render;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use cli::{LabelDisplay, render_diagnostic_report};
pub use doctor::{diagnose, DiagnosticReport, Finding, Severity};
pub use edit::{accepts_expression, is_editable, set_expression, ExpressionEdit, SkipReason};
pub use log::{RenderLog, RenderRecord};
pub use model::{Model, NoteLinks, ObjectRef, Property, Renderable};
pub use render::{NewlineMode, RenderConfig, TextRenderer};
