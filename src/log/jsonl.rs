//! JSONL (JSON Lines) logging for rendered labels
//!
//! Provides append-only logging of render results to `<dir>/render.jsonl`

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// One rendered label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderRecord {
    /// ISO 8601 timestamp of when the label was rendered
    pub timestamp: DateTime<Utc>,
    /// Id of the rendered diagram object
    pub object: String,
    /// The expression as stored on the object
    pub expression: String,
    /// The rendered label
    pub label: String,
}

impl RenderRecord {
    /// Create a record stamped with the current time
    #[must_use]
    pub fn now(object: &str, expression: &str, label: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            object: object.to_string(),
            expression: expression.to_string(),
            label: label.to_string(),
        }
    }
}

/// JSONL logger for render history
///
/// Each line of `render.jsonl` is a JSON object for a single rendered label.
pub struct RenderLog {
    log_path: PathBuf,
}

impl RenderLog {
    /// Create a new render log
    ///
    /// # Arguments
    /// * `log_dir` - Directory where render.jsonl will be stored
    ///
    /// # Errors
    /// Returns an error if the log directory cannot be created
    pub fn new<P: AsRef<Path>>(log_dir: P) -> Result<Self> {
        let log_dir = log_dir.as_ref();

        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        Ok(Self {
            log_path: log_dir.join("render.jsonl"),
        })
    }

    /// Append a record to the log
    ///
    /// # Errors
    /// Returns an error if the log file cannot be opened, the record cannot be
    /// serialized, or writing fails
    pub fn append(&self, record: &RenderRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open log file: {}", self.log_path.display()))?;

        let json =
            serde_json::to_string(record).context("Failed to serialize render record to JSON")?;

        writeln!(file, "{json}").context("Failed to write to log file")?;

        Ok(())
    }

    /// Read all records from the log, oldest first
    ///
    /// # Errors
    /// Returns an error if the log file cannot be read or a line is not valid JSON
    pub fn read_all(&self) -> Result<Vec<RenderRecord>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.log_path)
            .with_context(|| format!("Failed to read log file: {}", self.log_path.display()))?;

        let mut records = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let record: RenderRecord = serde_json::from_str(line)
                .with_context(|| format!("Failed to parse line {} as JSON", line_num + 1))?;

            records.push(record);
        }

        Ok(records)
    }

    /// Get the path to the log file
    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}
