//! Mean metrics and join diagnostics.

use super::table::EvaluationTable;
use crate::metrics::UserMetrics;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Metric names, in report order.
pub const METRIC_NAMES: [&str; 5] = ["HR", "nDCG", "recall", "ideal_recall", "nRecall"];

/// Report key for a metric at cutoff `k`, e.g. `"nDCG@10"`.
#[must_use]
pub fn metric_key(name: &str, k: usize) -> String {
    format!("{name}@{k}")
}

pub(super) fn metric_value(name: &str, m: &UserMetrics) -> Option<f64> {
    match name {
        "HR" => Some(m.hit_rate),
        "nDCG" => m.ndcg,
        "recall" => Some(m.recall),
        "ideal_recall" => Some(m.ideal_recall),
        "nRecall" => m.normalized_recall,
        _ => None,
    }
}

/// Result of one evaluation run.
///
/// Means are simple averages over the users for whom a metric is defined.
/// A metric no user defines is absent from [`EvaluationReport::metrics`].
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    metrics: BTreeMap<String, f64>,
    evaluated_users: usize,
    unmatched_recommendations: Vec<String>,
    unmatched_ground_truth: Vec<String>,
    empty_ground_truth: Vec<String>,
    table: EvaluationTable,
}

impl EvaluationReport {
    pub(super) fn from_table(
        table: EvaluationTable,
        unmatched_recommendations: Vec<String>,
        unmatched_ground_truth: Vec<String>,
        empty_ground_truth: Vec<String>,
    ) -> Self {
        let scored: Vec<&UserMetrics> = table.rows().iter().filter_map(|r| r.metrics.as_ref()).collect();
        let mut metrics = BTreeMap::new();
        for name in METRIC_NAMES {
            let values: Vec<f64> = scored.iter().filter_map(|m| metric_value(name, m)).collect();
            if !values.is_empty() {
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                metrics.insert(metric_key(name, table.k()), mean);
            }
        }
        Self {
            metrics,
            evaluated_users: scored.len(),
            unmatched_recommendations,
            unmatched_ground_truth,
            empty_ground_truth,
            table,
        }
    }

    /// Mean metrics keyed by `"<metric>@<k>"`.
    #[must_use]
    pub fn metrics(&self) -> &BTreeMap<String, f64> {
        &self.metrics
    }

    /// One mean metric by key.
    #[must_use]
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).copied()
    }

    /// Cutoff used.
    #[must_use]
    pub fn k(&self) -> usize {
        self.table.k()
    }

    /// Users included in the means.
    #[must_use]
    pub fn evaluated_users(&self) -> usize {
        self.evaluated_users
    }

    /// Users with recommendations but no ground-truth record.
    #[must_use]
    pub fn unmatched_recommendations(&self) -> &[String] {
        &self.unmatched_recommendations
    }

    /// Users with ground truth but no recommendations.
    #[must_use]
    pub fn unmatched_ground_truth(&self) -> &[String] {
        &self.unmatched_ground_truth
    }

    /// Matched users whose ground-truth set is empty.
    #[must_use]
    pub fn empty_ground_truth(&self) -> &[String] {
        &self.empty_ground_truth
    }

    /// Joined per-user table.
    #[must_use]
    pub fn table(&self) -> &EvaluationTable {
        &self.table
    }

    /// Formatted summary.
    #[must_use]
    pub fn report(&self) -> String {
        let mut out = format!(
            "Evaluation @{} (n={})\n─────────────────────\n",
            self.k(),
            self.evaluated_users
        );
        for name in METRIC_NAMES {
            let key = metric_key(name, self.k());
            let _ = match self.metric(&key) {
                Some(v) => writeln!(out, "{key:<16}{v:>8.4}"),
                None => writeln!(out, "{key:<16}{:>8}", "n/a"),
            };
        }
        let _ = write!(
            out,
            "Excluded: {} without ground truth, {} without recommendations, {} with empty ground truth",
            self.unmatched_recommendations.len(),
            self.unmatched_ground_truth.len(),
            self.empty_ground_truth.len()
        );
        out
    }
}
