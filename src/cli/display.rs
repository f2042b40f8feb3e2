//! Terminal display for rendered labels and diagnostics
//!
//! Labels go to stdout as plain text so they can be piped. Headers, summaries
//! and diagnostics are colored and meant for stderr.

use colored::Colorize;

use crate::doctor::{DiagnosticReport, Severity};
use crate::render::tokens::FIXED_TOKENS;

/// Display handler for a render run
pub struct LabelDisplay {
    source: String,
}

impl LabelDisplay {
    /// Create a display handler for labels read from `source`
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }

    /// Print the run header
    pub fn print_header(&self) {
        eprintln!(
            "\n{} {}",
            "===".bold().cyan(),
            format!("Labels: {}", self.source).bold().cyan()
        );
        eprintln!("{}", "─".repeat(50).dimmed());
    }

    /// Print one rendered label to stdout
    pub fn print_label(&self, id: &str, label: &str) {
        println!("{}", format_label(id, label));
    }

    /// Print the closing summary
    pub fn print_summary(&self, rendered: usize, empty: usize) {
        eprintln!("{}", "─".repeat(50).dimmed());
        eprintln!(
            "  {} {rendered} label(s) from {}",
            "Rendered:".dimmed(),
            self.source.bold()
        );
        if empty > 0 {
            eprintln!(
                "  {} {empty} object(s) rendered an empty label",
                "⚠".yellow().bold()
            );
        }
        eprintln!();
    }
}

/// Format a label as `id: text`, indenting continuation lines under the text
#[must_use]
pub fn format_label(id: &str, label: &str) -> String {
    let indent = " ".repeat(id.chars().count() + 2);
    let mut lines = label.lines();
    let first = lines.next().unwrap_or_default();
    let mut out = format!("{id}: {first}");
    for line in lines {
        out.push('\n');
        out.push_str(&indent);
        out.push_str(line);
    }
    out
}

/// Render a diagnostic report as colored, human-readable text
#[must_use]
pub fn render_diagnostic_report(report: &DiagnosticReport) -> String {
    if report.is_clean() {
        return format!("{} No issues found", "✓".green().bold());
    }

    let mut out = String::new();
    for finding in &report.findings {
        let tag = match finding.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".blue(),
        };
        out.push_str(&format!(
            "{tag} {} [{}] {}\n",
            finding.code.dimmed(),
            finding.object,
            finding.message
        ));
        if let Some(suggestion) = &finding.suggestion {
            out.push_str(&format!("      {} {suggestion}\n", "fix:".dimmed()));
        }
    }
    out.push_str(&format!(
        "{} error(s), {} warning(s), {} info",
        report.error_count(),
        report.warning_count(),
        report.info_count()
    ));
    out
}

/// Render the list of supported tokens
#[must_use]
pub fn render_token_table() -> String {
    let mut lines: Vec<String> = FIXED_TOKENS
        .iter()
        .map(|(token, description)| format!("  {:<22}{description}", token.bold()))
        .collect();
    lines.push(format!(
        "  {:<22}value of the first property with key KEY",
        "${property:KEY}".bold()
    ));
    lines.push(String::new());
    lines.push(format!(
        "  {} is deleted in multi-line mode and becomes a line break in single-line mode",
        "\\n".bold()
    ));
    lines.join("\n")
}
