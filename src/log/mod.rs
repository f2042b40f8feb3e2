//! Logging and observability
//!
//! This module provides JSONL logging of rendered labels.

pub mod jsonl;

pub use jsonl::{RenderLog, RenderRecord};
