//! Label expression rendering
//!
//! This module handles renderer configuration, token scanning and rendering.

pub mod config;
pub mod renderer;
pub mod tokens;

pub use config::{NewlineMode, RenderConfig};
pub use renderer::TextRenderer;
