//! Renderer configuration parser
//!
//! Parses `labelexpr.toml` into a `RenderConfig`.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Feature name that holds the label expression by default
pub const DEFAULT_FEATURE: &str = "labelExpression";

/// How `\n` escapes in an expression are treated
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NewlineMode {
    /// Expressions are edited in a multi-line control; escapes are deleted
    #[default]
    MultiLine,
    /// Expressions are edited in a single-line control; escapes become newlines
    SingleLine,
}

/// Render settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderSection {
    /// Newline escape handling (default: multi-line)
    #[serde(default)]
    pub newline_mode: NewlineMode,
    /// Feature holding the expression (default: `labelExpression`)
    #[serde(default = "default_feature")]
    pub feature: String,
}

fn default_feature() -> String {
    DEFAULT_FEATURE.to_string()
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            newline_mode: NewlineMode::default(),
            feature: default_feature(),
        }
    }
}

/// Top-level configuration parsed from labelexpr.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderConfig {
    /// Render settings
    #[serde(default)]
    pub render: RenderSection,
}

impl RenderConfig {
    /// Parse a labelexpr.toml file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse labelexpr.toml content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse labelexpr.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an optional path, falling back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_path)
    }

    fn validate(&self) -> Result<()> {
        let feature = &self.render.feature;
        if feature.is_empty() {
            bail!("Feature name cannot be empty");
        }
        if feature.contains(char::is_whitespace) {
            bail!("Invalid feature name '{feature}': must not contain whitespace");
        }
        Ok(())
    }
}
