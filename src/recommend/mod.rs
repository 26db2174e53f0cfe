//! Recommendation generation.
//!
//! - [`ContentRecommender`]: nearest items to the mean feature vector of a
//!   user's owned items, optionally weighted by review feedback.
//! - [`PopularityRecommender`]: most-owned items the user does not have.
//!
//! # Quick Start
//!
//! ```
//! use gamerec::config::RecommenderConfig;
//! use gamerec::data::{UserInteractions, UserReviews};
//! use gamerec::features::Item;
//! use gamerec::recommend::ContentRecommender;
//!
//! let items = vec![
//!     Item::new(0).with_genres(["rpg"]).with_sentiment(0.9),
//!     Item::new(1).with_genres(["shooter"]).with_sentiment(0.8),
//!     Item::new(2).with_genres(["rpg", "fantasy"]),
//!     Item::new(3).with_genres(["shooter", "arena"]),
//! ];
//! let mut config = RecommenderConfig::default();
//! config.generation.amount = 1;
//! config.generation.use_feedback = true;
//!
//! let recommender = ContentRecommender::fit(&items, config).expect("fit should succeed");
//! let users = vec![UserInteractions::new("u1", vec![0, 1])];
//! // Disliking the shooter leaves only the rpg in the query vector.
//! let reviews = vec![UserReviews::new("u1", vec![1], vec![false])];
//!
//! let table = recommender.generate(&users, &reviews).expect("generation should succeed");
//! assert_eq!(table.get("u1"), Some(&[2][..]));
//! ```

mod cancel;
mod content_based;
mod popularity;
mod retrieval;
mod weighting;

pub use cancel::CancellationToken;
pub use content_based::ContentRecommender;
pub use popularity::PopularityRecommender;
pub use retrieval::retrieve;
pub use weighting::{ItemWeighting, WeightSource};

use crate::data::Recommendation;

/// Output of one generation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationTable {
    /// One record per processed user, in input order.
    pub records: Vec<Recommendation>,
    /// Users left out because they own no items.
    pub skipped: Vec<String>,
}

impl RecommendationTable {
    /// Recommendations for `user_id`, if present.
    #[must_use]
    pub fn get(&self, user_id: &str) -> Option<&[usize]> {
        self.records
            .iter()
            .find(|r| r.user_id == user_id)
            .map(|r| r.items.as_slice())
    }

    /// Number of users with recommendations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no user has recommendations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Recommendation> {
        self.records.iter()
    }
}
