//! Ownership-count baseline.

use super::RecommendationTable;
use crate::config::GenerationConfig;
use crate::data::{Recommendation, UserInteractions};
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Recommends the most-owned items a user does not already own.
///
/// Items are ranked by how many training records contain them; equal
/// counts are ordered by ascending item id.
///
/// # Examples
///
/// ```
/// use gamerec::data::UserInteractions;
/// use gamerec::recommend::PopularityRecommender;
///
/// let train = vec![
///     UserInteractions::new("a", vec![1, 2]),
///     UserInteractions::new("b", vec![2, 3]),
///     UserInteractions::new("c", vec![2]),
/// ];
/// let pop = PopularityRecommender::fit(&train);
/// assert_eq!(pop.ranking(), &[2, 1, 3]);
///
/// let rec = pop.recommend_user(&train[2], 2);
/// assert_eq!(rec.items, vec![1, 3]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PopularityRecommender {
    ranking: Vec<usize>,
}

impl PopularityRecommender {
    /// Counts item occurrences over the training records.
    #[must_use]
    pub fn fit(train: &[UserInteractions]) -> Self {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for item in train.iter().flat_map(|u| &u.items) {
            *counts.entry(*item).or_insert(0) += 1;
        }
        let mut ranked: Vec<(usize, usize)> = counts.into_iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        info!(items = ranked.len(), users = train.len(), "fitted popularity baseline");
        Self {
            ranking: ranked.into_iter().map(|(item, _)| item).collect(),
        }
    }

    /// Counts over only the first `read_max` training records, if set.
    #[must_use]
    pub fn fit_with_config(train: &[UserInteractions], config: &GenerationConfig) -> Self {
        Self::fit(first_users(train, config.read_max))
    }

    /// Items from most to least popular.
    #[must_use]
    pub fn ranking(&self) -> &[usize] {
        &self.ranking
    }

    /// Top `amount` items the user does not own.
    #[must_use]
    pub fn recommend_user(&self, user: &UserInteractions, amount: usize) -> Recommendation {
        let owned: HashSet<usize> = user.items.iter().copied().collect();
        let items = self
            .ranking
            .iter()
            .copied()
            .filter(|i| !owned.contains(i))
            .take(amount)
            .collect();
        Recommendation::new(user.user_id.clone(), items)
    }

    /// Recommends for every user.
    #[must_use]
    pub fn generate(&self, users: &[UserInteractions], amount: usize) -> RecommendationTable {
        RecommendationTable {
            records: users
                .iter()
                .map(|u| self.recommend_user(u, amount))
                .collect(),
            skipped: Vec::new(),
        }
    }

    /// Recommends `config.amount` items for the first `read_max` users.
    #[must_use]
    pub fn generate_with_config(
        &self,
        users: &[UserInteractions],
        config: &GenerationConfig,
    ) -> RecommendationTable {
        self.generate(first_users(users, config.read_max), config.amount)
    }
}

fn first_users(users: &[UserInteractions], read_max: Option<usize>) -> &[UserInteractions] {
    match read_max {
        Some(n) => &users[..n.min(users.len())],
        None => users,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_by_ascending_id() {
        let train = vec![
            UserInteractions::new("a", vec![9, 4]),
            UserInteractions::new("b", vec![7]),
        ];
        assert_eq!(PopularityRecommender::fit(&train).ranking(), &[4, 7, 9]);
    }

    #[test]
    fn test_owned_items_excluded() {
        let train = vec![
            UserInteractions::new("a", vec![0, 1]),
            UserInteractions::new("b", vec![0]),
        ];
        let pop = PopularityRecommender::fit(&train);
        let table = pop.generate(&train, 10);
        assert!(table.records[0].items.is_empty());
        assert_eq!(table.records[1].items, vec![1]);
    }

    #[test]
    fn test_amount_caps_length() {
        let train = vec![UserInteractions::new("a", vec![0, 1, 2, 3])];
        let pop = PopularityRecommender::fit(&train);
        let user = UserInteractions::new("new", vec![]);
        assert_eq!(pop.recommend_user(&user, 2).items, vec![0, 1]);
    }

    #[test]
    fn test_read_max_limits_counting_and_generation() {
        let train = vec![
            UserInteractions::new("a", vec![5]),
            UserInteractions::new("b", vec![1, 2]),
            UserInteractions::new("c", vec![2]),
        ];
        let config = GenerationConfig::default().with_read_max(2).with_amount(1);
        let pop = PopularityRecommender::fit_with_config(&train, &config);
        assert_eq!(pop.ranking(), &[1, 2, 5]);

        let table = pop.generate_with_config(&train, &config);
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].items, vec![1]);
        assert_eq!(table.records[1].items, vec![5]);
    }

    #[test]
    fn test_empty_training_set() {
        let pop = PopularityRecommender::fit(&[]);
        assert!(pop.ranking().is_empty());
    }
}
