//! Joins recommendations with held-out ground truth and scores them.
//!
//! Users are matched on `user_id`. Users that appear on only one side are
//! never dropped silently: they are listed in the [`EvaluationReport`], and
//! [`UnmatchedUserPolicy`] decides whether recommended-but-unmatched users
//! count as zeros in the means.
//!
//! # Example
//!
//! ```
//! use gamerec::data::{GroundTruth, Recommendation};
//! use gamerec::evaluation::Evaluator;
//!
//! let recs = vec![
//!     Recommendation::new("alice", vec![1, 2]),
//!     Recommendation::new("bob", vec![4, 5]),
//! ];
//! let truth = vec![
//!     GroundTruth::new("alice", vec![1, 3]),
//!     GroundTruth::new("carol", vec![9]),
//! ];
//!
//! let report = Evaluator::new(2).expect("k > 0").evaluate(&recs, &truth);
//! assert_eq!(report.evaluated_users(), 1);
//! assert_eq!(report.metric("HR@2"), Some(1.0));
//! assert_eq!(report.metric("recall@2"), Some(0.5));
//! assert_eq!(report.unmatched_recommendations(), &["bob"]);
//! assert_eq!(report.unmatched_ground_truth(), &["carol"]);
//! ```

mod report;
mod table;

pub use report::{metric_key, EvaluationReport, METRIC_NAMES};
pub use table::{EvaluationRow, EvaluationTable};

use crate::data::{Dataset, GroundTruth, Recommendation, Split};
use crate::error::{RecError, Result};
use crate::metrics::UserMetrics;
use crate::recommend::RecommendationTable;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// Treatment of users that have recommendations but no ground-truth record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedUserPolicy {
    /// Leave them out of every mean and list them in the report.
    #[default]
    Exclude,
    /// Score them 0 on every metric and include them in the means.
    ///
    /// nDCG and nRecall are 0 here rather than undefined, even though the
    /// ideal recall is also 0.
    ScoreAsZero,
}

/// Top-K evaluation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    k: usize,
    unmatched: UnmatchedUserPolicy,
}

impl Evaluator {
    /// Creates an evaluator for cutoff `k`.
    ///
    /// # Errors
    ///
    /// Returns an error if `k` is zero.
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(RecError::invalid_config("k", 0, ">0"));
        }
        Ok(Self {
            k,
            unmatched: UnmatchedUserPolicy::Exclude,
        })
    }

    /// Sets the unmatched-user policy.
    #[must_use]
    pub fn with_unmatched_policy(mut self, policy: UnmatchedUserPolicy) -> Self {
        self.unmatched = policy;
        self
    }

    /// Cutoff.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Scores `recommendations` against `ground_truth`.
    ///
    /// Inputs are only borrowed. Ground-truth records sharing a user id are
    /// merged.
    #[must_use]
    pub fn evaluate(
        &self,
        recommendations: &[Recommendation],
        ground_truth: &[GroundTruth],
    ) -> EvaluationReport {
        let mut truth: HashMap<&str, HashSet<usize>> = HashMap::new();
        for gt in ground_truth {
            truth
                .entry(gt.user_id.as_str())
                .or_default()
                .extend(gt.items.iter().copied());
        }

        let mut rows = Vec::with_capacity(recommendations.len());
        let mut unmatched_recommendations = Vec::new();
        let mut empty_ground_truth = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for rec in recommendations {
            seen.insert(rec.user_id.as_str());
            let Some(relevant) = truth.get(rec.user_id.as_str()) else {
                unmatched_recommendations.push(rec.user_id.clone());
                if self.unmatched == UnmatchedUserPolicy::ScoreAsZero {
                    rows.push(EvaluationRow {
                        user_id: rec.user_id.clone(),
                        recommendations: rec.items.clone(),
                        items: Vec::new(),
                        metrics: Some(UserMetrics::zero()),
                    });
                }
                continue;
            };

            let metrics = UserMetrics::compute(&rec.items, relevant, self.k);
            if metrics.is_none() {
                empty_ground_truth.push(rec.user_id.clone());
            }
            let mut items: Vec<usize> = relevant.iter().copied().collect();
            items.sort_unstable();
            rows.push(EvaluationRow {
                user_id: rec.user_id.clone(),
                recommendations: rec.items.clone(),
                items,
                metrics,
            });
        }

        let mut unmatched_ground_truth: Vec<String> = Vec::new();
        let mut listed: HashSet<&str> = HashSet::new();
        for gt in ground_truth {
            let id = gt.user_id.as_str();
            if !seen.contains(id) && listed.insert(id) {
                unmatched_ground_truth.push(gt.user_id.clone());
            }
        }

        if !unmatched_recommendations.is_empty() || !unmatched_ground_truth.is_empty() {
            warn!(
                recommendations_only = unmatched_recommendations.len(),
                ground_truth_only = unmatched_ground_truth.len(),
                policy = ?self.unmatched,
                "users present in only one input"
            );
        }
        if !empty_ground_truth.is_empty() {
            warn!(
                users = empty_ground_truth.len(),
                "users with empty ground truth excluded from metric means"
            );
        }

        let report = EvaluationReport::from_table(
            EvaluationTable::new(self.k, rows),
            unmatched_recommendations,
            unmatched_ground_truth,
            empty_ground_truth,
        );
        info!(
            k = self.k,
            evaluated = report.evaluated_users(),
            "evaluation finished"
        );
        report
    }

    /// Scores a generation table against one split of `dataset`.
    #[must_use]
    pub fn evaluate_split(
        &self,
        recommendations: &RecommendationTable,
        dataset: &Dataset,
        split: Split,
    ) -> EvaluationReport {
        self.evaluate(&recommendations.records, dataset.ground_truth(split))
    }
}
