//! CLI output formatting
//!
//! Provides human-readable terminal display for rendered labels and
//! expression diagnostics.

pub mod display;

pub use display::format_label;
pub use display::render_diagnostic_report;
pub use display::render_token_table;
pub use display::LabelDisplay;
