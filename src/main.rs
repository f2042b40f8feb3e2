//! labelexpr - Label expression renderer
//!
//! CLI entry point: render, lint and list label expression tokens.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use labelexpr::cli::{render_diagnostic_report, render_token_table, LabelDisplay};
use labelexpr::doctor::diagnose;
use labelexpr::log::{RenderLog, RenderRecord};
use labelexpr::model::{Model, ObjectRef};
use labelexpr::render::{RenderConfig, TextRenderer};

/// Label expression renderer
///
/// Expands `${...}` tokens in the label expressions stored on diagram
/// objects of a model snapshot.
#[derive(Parser, Debug)]
#[command(name = "labelexpr", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the labels of diagram objects
    Render {
        /// Path to the model snapshot (JSON)
        #[arg(long)]
        model: PathBuf,

        /// Path to labelexpr.toml (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Only render these objects (repeatable)
        #[arg(long = "id")]
        ids: Vec<String>,

        /// Append a JSONL record per rendered label to DIR/render.jsonl
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },
    /// Check stored expressions for problems
    Doctor {
        /// Path to the model snapshot (JSON)
        #[arg(long)]
        model: PathBuf,

        /// Path to labelexpr.toml (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the supported tokens
    Tokens,
}

/// Load the model and build a renderer from the optional config file.
fn load(model: &Path, config: Option<&Path>) -> Result<(Model, TextRenderer)> {
    let config = RenderConfig::load(config).context("Failed to load config")?;
    let model = Model::from_path(model)
        .with_context(|| format!("Failed to load model from '{}'", model.display()))?;
    Ok((model, TextRenderer::from_config(&config)))
}

/// Pick the objects to render: the listed ids, or every object with an expression.
fn select_objects<'a>(
    model: &'a Model,
    renderer: &TextRenderer,
    ids: &[String],
) -> Result<Vec<ObjectRef<'a>>> {
    if ids.is_empty() {
        return Ok(model
            .object_refs()
            .filter(|o| renderer.expression(o).is_some())
            .collect());
    }

    ids.iter()
        .map(|id| {
            model.object_ref(id).with_context(|| {
                format!(
                    "Unknown diagram object '{id}'. Available objects: {}",
                    available_object_ids(model)
                )
            })
        })
        .collect()
}

fn run_render(
    model_path: &Path,
    config: Option<&Path>,
    ids: &[String],
    log_dir: Option<&Path>,
) -> Result<()> {
    let (model, renderer) = load(model_path, config)?;
    let objects = select_objects(&model, &renderer, ids)?;
    let log = log_dir
        .map(RenderLog::new)
        .transpose()
        .context("Failed to initialize render log")?;

    let display = LabelDisplay::new(&model_path.display().to_string());
    display.print_header();

    let mut empty = 0;
    for object in &objects {
        let label = renderer.render(object);
        if label.is_empty() {
            empty += 1;
        }
        display.print_label(object.id(), &label);

        if let Some(log) = &log {
            let expression = renderer.expression(object).unwrap_or_default();
            log.append(&RenderRecord::now(object.id(), expression, &label))
                .context("Failed to write to render log")?;
        }
    }

    display.print_summary(objects.len(), empty);
    Ok(())
}

fn run_doctor(model_path: &Path, config: Option<&Path>) -> Result<()> {
    let (model, renderer) = load(model_path, config)?;
    let report = diagnose(&model, &renderer);
    eprintln!("{}", render_diagnostic_report(&report));

    if report.error_count() > 0 {
        bail!("{} expression error(s) found", report.error_count());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            model,
            config,
            ids,
            log_dir,
        } => run_render(&model, config.as_deref(), &ids, log_dir.as_deref()),
        Command::Doctor { model, config } => run_doctor(&model, config.as_deref()),
        Command::Tokens => {
            println!("{}", render_token_table());
            Ok(())
        }
    }
}

/// Format available object ids for error messages.
fn available_object_ids(model: &Model) -> String {
    model
        .objects
        .iter()
        .map(|o| o.id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
