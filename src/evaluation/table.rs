//! Joined per-user evaluation table and its on-disk form.

use super::report::{metric_key, metric_value, METRIC_NAMES};
use crate::error::Result;
use crate::metrics::UserMetrics;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One joined user.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRow {
    /// User identifier.
    pub user_id: String,
    /// Full recommendation list, before truncation to `k`.
    pub recommendations: Vec<usize>,
    /// Ground-truth items, ascending.
    pub items: Vec<usize>,
    /// Scores; `None` when the ground truth is empty.
    pub metrics: Option<UserMetrics>,
}

/// Per-user rows of one evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationTable {
    k: usize,
    rows: Vec<EvaluationRow>,
}

impl EvaluationTable {
    /// Creates a table.
    #[must_use]
    pub fn new(k: usize, rows: Vec<EvaluationRow>) -> Self {
        Self { k, rows }
    }

    /// Cutoff the rows were scored at.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Rows in recommendation order.
    #[must_use]
    pub fn rows(&self) -> &[EvaluationRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for `user_id`, if joined.
    #[must_use]
    pub fn get(&self, user_id: &str) -> Option<&EvaluationRow> {
        self.rows.iter().find(|r| r.user_id == user_id)
    }

    /// Column-oriented JSON: one array per column, undefined metrics as `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut columns = Map::new();
        columns.insert(
            "user_id".into(),
            self.rows.iter().map(|r| Value::from(r.user_id.as_str())).collect(),
        );
        columns.insert(
            "recommendations".into(),
            self.rows.iter().map(|r| Value::from(r.recommendations.clone())).collect(),
        );
        columns.insert(
            "items".into(),
            self.rows.iter().map(|r| Value::from(r.items.clone())).collect(),
        );
        for name in METRIC_NAMES {
            let column: Value = self
                .rows
                .iter()
                .map(|r| {
                    r.metrics
                        .as_ref()
                        .and_then(|m| metric_value(name, m))
                        .map_or(Value::Null, Value::from)
                })
                .collect();
            columns.insert(metric_key(name, self.k), column);
        }
        Value::Object(columns)
    }

    /// Writes [`EvaluationTable::to_json`] to `path`, creating parent
    /// directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &self.to_json())?;
        writer.flush()?;
        Ok(())
    }
}
