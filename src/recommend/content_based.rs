//! Content-based recommendation from owned-item feature vectors.

use super::cancel::CancellationToken;
use super::retrieval::retrieve;
use super::weighting::ItemWeighting;
use super::RecommendationTable;
use crate::config::{EmptyHistoryPolicy, RecommenderConfig};
use crate::data::{Recommendation, UserInteractions, UserReviews};
use crate::error::{RecError, Result};
use crate::features::{EncodedItems, FeatureEncoder, Item};
use crate::index::{ExactCosineIndex, NeighborIndex};
use crate::primitives::Vector;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Recommends items whose features are closest to the (weighted) mean of
/// the items a user owns.
///
/// The catalog is encoded and indexed once in [`ContentRecommender::fit`];
/// generation only reads from it and processes users in parallel when the
/// `parallel` feature is enabled.
///
/// # Examples
///
/// ```
/// use gamerec::config::RecommenderConfig;
/// use gamerec::data::UserInteractions;
/// use gamerec::features::Item;
/// use gamerec::recommend::ContentRecommender;
///
/// let items = vec![
///     Item::new(0).with_genres(["rpg"]),
///     Item::new(1).with_genres(["rpg"]),
///     Item::new(2).with_genres(["shooter"]),
/// ];
/// let mut config = RecommenderConfig::default();
/// config.generation.amount = 1;
///
/// let recommender = ContentRecommender::fit(&items, config).expect("fit should succeed");
/// let users = vec![UserInteractions::new("alice", vec![0])];
/// let table = recommender.generate(&users, &[]).expect("generation should succeed");
///
/// assert_eq!(table.get("alice"), Some(&[1][..]));
/// ```
#[derive(Debug, Clone)]
pub struct ContentRecommender {
    config: RecommenderConfig,
    encoded: EncodedItems,
    index: ExactCosineIndex,
    sentiments: Vec<Option<f64>>,
}

enum Outcome {
    Recommended(Recommendation),
    Skipped(String),
}

impl ContentRecommender {
    /// Encodes and indexes the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or encoding fails.
    pub fn fit(items: &[Item], config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        let encoded = FeatureEncoder::new(config.encoder.clone())?.encode(items)?;
        let index = ExactCosineIndex::new(encoded.shared_features());
        let sentiments = items.iter().map(|it| it.sentiment).collect();
        info!(
            items = index.len(),
            dims = index.dim(),
            "fitted content recommender"
        );
        Ok(Self {
            config,
            encoded,
            index,
            sentiments,
        })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Encoded catalog.
    #[must_use]
    pub fn encoded(&self) -> &EncodedItems {
        &self.encoded
    }

    /// Neighbor index over the encoded catalog.
    #[must_use]
    pub fn index(&self) -> &ExactCosineIndex {
        &self.index
    }

    /// Builds the query vector for one user.
    ///
    /// `feedback` maps reviewed item ids to the user's recommend flag.
    ///
    /// # Errors
    ///
    /// Returns [`RecError::EmptyHistory`] if the user owns nothing,
    /// [`RecError::UnknownItem`] for ids outside the catalog, or
    /// [`RecError::MisalignedRecord`] for misaligned playtime.
    pub fn user_vector(
        &self,
        user: &UserInteractions,
        feedback: &HashMap<usize, bool>,
    ) -> Result<Vector<f64>> {
        if user.items.is_empty() {
            return Err(RecError::EmptyHistory {
                user_id: user.user_id.clone(),
            });
        }
        user.validate()?;
        let catalog_size = self.index.len();
        if let Some(&item_id) = user.items.iter().find(|&&i| i >= catalog_size) {
            return Err(RecError::UnknownItem {
                user_id: user.user_id.clone(),
                item_id,
                catalog_size,
            });
        }

        let weighting = ItemWeighting::new(&self.config.generation, &self.sentiments);
        let weights = weighting.weights(&user.items, user.playtime.as_deref(), feedback);
        let mean = self.encoded.features().weighted_row_mean(&user.items, &weights)?;
        self.encoded.finish_query(mean)
    }

    /// Recommends for a single user.
    ///
    /// Owned items and reviewed catalog items are never recommended.
    ///
    /// # Errors
    ///
    /// See [`ContentRecommender::user_vector`].
    pub fn recommend_user(
        &self,
        user: &UserInteractions,
        reviews: Option<&UserReviews>,
    ) -> Result<Recommendation> {
        let feedback: HashMap<usize, bool> = reviews
            .map(|r| r.feedback().collect())
            .unwrap_or_default();
        let query = self.user_vector(user, &feedback)?;

        let catalog_size = self.index.len();
        let exclude: HashSet<usize> = user
            .items
            .iter()
            .copied()
            .chain(reviews.into_iter().flat_map(|r| r.items.iter().copied()))
            .filter(|&i| i < catalog_size)
            .collect();

        let items = retrieve(&self.index, &query, self.config.generation.amount, &exclude)?;
        Ok(Recommendation::new(user.user_id.clone(), items))
    }

    /// Generates recommendations for every user (or the first `read_max`).
    ///
    /// # Errors
    ///
    /// Returns the first per-user error in input order; empty histories
    /// are skipped instead when the policy is `skip`.
    pub fn generate(
        &self,
        users: &[UserInteractions],
        reviews: &[UserReviews],
    ) -> Result<RecommendationTable> {
        self.generate_with_cancel(users, reviews, &CancellationToken::new())
    }

    /// Like [`ContentRecommender::generate`], checking `token` before each
    /// user.
    ///
    /// # Errors
    ///
    /// Returns [`RecError::Cancelled`] if the token is cancelled during the
    /// run, otherwise as [`ContentRecommender::generate`].
    pub fn generate_with_cancel(
        &self,
        users: &[UserInteractions],
        reviews: &[UserReviews],
        token: &CancellationToken,
    ) -> Result<RecommendationTable> {
        for r in reviews {
            r.validate()?;
        }
        let by_user: HashMap<&str, &UserReviews> =
            reviews.iter().map(|r| (r.user_id.as_str(), r)).collect();
        let users = match self.config.generation.read_max {
            Some(n) => &users[..n.min(users.len())],
            None => users,
        };
        info!(
            users = users.len(),
            amount = self.config.generation.amount,
            feedback = self.config.generation.use_feedback,
            "generating recommendations"
        );

        let run_user = |user: &UserInteractions| -> Result<Outcome> {
            if token.is_cancelled() {
                return Err(RecError::Cancelled { completed: 0 });
            }
            match self.recommend_user(user, by_user.get(user.user_id.as_str()).copied()) {
                Ok(rec) => Ok(Outcome::Recommended(rec)),
                Err(RecError::EmptyHistory { user_id })
                    if self.config.generation.on_empty_history == EmptyHistoryPolicy::Skip =>
                {
                    debug!(%user_id, "skipping user with no owned items");
                    Ok(Outcome::Skipped(user_id))
                }
                Err(e) => Err(e),
            }
        };

        #[cfg(feature = "parallel")]
        let outcomes: Vec<Result<Outcome>> = users.par_iter().map(run_user).collect();
        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<Result<Outcome>> = users.iter().map(run_user).collect();

        let completed = outcomes.iter().filter(|o| o.is_ok()).count();
        if outcomes
            .iter()
            .any(|o| matches!(o, Err(RecError::Cancelled { .. })))
        {
            return Err(RecError::Cancelled { completed });
        }

        let mut table = RecommendationTable::default();
        for outcome in outcomes {
            match outcome? {
                Outcome::Recommended(rec) => table.records.push(rec),
                Outcome::Skipped(user_id) => table.skipped.push(user_id),
            }
        }
        info!(
            recommended = table.records.len(),
            skipped = table.skipped.len(),
            "generation finished"
        );
        Ok(table)
    }
}

#[cfg(test)]
#[path = "content_based_tests.rs"]
mod tests;
