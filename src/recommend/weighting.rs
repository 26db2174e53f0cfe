//! Per-item weights for the user query vector.

use crate::config::GenerationConfig;
use std::collections::HashMap;

/// Where an owned item's weight comes from.
///
/// Each item gets exactly one source; nothing is overwritten afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightSource {
    /// Feedback weighting disabled: every item counts once.
    Uniform,
    /// The user reviewed the item and recommends it.
    Liked,
    /// The user reviewed the item and does not recommend it.
    Disliked,
    /// No review; the item's sentiment score.
    Sentiment(f64),
    /// No review and no sentiment score.
    MissingSentiment(f64),
}

impl WeightSource {
    /// Numeric weight.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Uniform | Self::Liked => 1.0,
            Self::Disliked => 0.0,
            Self::Sentiment(s) | Self::MissingSentiment(s) => s,
        }
    }
}

/// Chooses owned-item weights from feedback, sentiment and playtime.
///
/// # Examples
///
/// ```
/// use gamerec::config::GenerationConfig;
/// use gamerec::recommend::{ItemWeighting, WeightSource};
/// use std::collections::HashMap;
///
/// let config = GenerationConfig::default().with_feedback(true);
/// let sentiments = [Some(0.6), Some(0.9)];
/// let weighting = ItemWeighting::new(&config, &sentiments);
///
/// let feedback = HashMap::from([(1, true)]);
/// assert_eq!(weighting.source(0, &feedback), WeightSource::Sentiment(0.6));
/// assert_eq!(weighting.source(1, &feedback), WeightSource::Liked);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ItemWeighting<'a> {
    config: &'a GenerationConfig,
    sentiments: &'a [Option<f64>],
}

impl<'a> ItemWeighting<'a> {
    /// Creates a weighting over the catalog's sentiment scores.
    #[must_use]
    pub fn new(config: &'a GenerationConfig, sentiments: &'a [Option<f64>]) -> Self {
        Self { config, sentiments }
    }

    /// Weight source for one owned item.
    #[must_use]
    pub fn source(&self, item: usize, feedback: &HashMap<usize, bool>) -> WeightSource {
        if !self.config.use_feedback {
            return WeightSource::Uniform;
        }
        match feedback.get(&item) {
            Some(true) => WeightSource::Liked,
            Some(false) => WeightSource::Disliked,
            None => match self.sentiments.get(item).copied().flatten() {
                Some(s) => WeightSource::Sentiment(s),
                None => WeightSource::MissingSentiment(self.config.missing_sentiment_weight),
            },
        }
    }

    /// Weights for `items`, aligned by position.
    ///
    /// With playtime weighting on, each weight is multiplied by
    /// `log2(playtime + 1)`; negative playtime counts as 0. If every weight
    /// ends up zero the plain mean is used instead.
    #[must_use]
    pub fn weights(
        &self,
        items: &[usize],
        playtime: Option<&[f64]>,
        feedback: &HashMap<usize, bool>,
    ) -> Vec<f64> {
        let mut weights: Vec<f64> = items
            .iter()
            .map(|&item| self.source(item, feedback).value())
            .collect();

        if self.config.use_playtime {
            if let Some(playtime) = playtime {
                for (w, &p) in weights.iter_mut().zip(playtime) {
                    *w *= (p.max(0.0) + 1.0).log2();
                }
            }
        }

        if weights.iter().all(|&w| w == 0.0) {
            weights.iter_mut().for_each(|w| *w = 1.0);
        }
        weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback_config() -> GenerationConfig {
        GenerationConfig::default().with_feedback(true)
    }

    #[test]
    fn test_uniform_without_feedback() {
        let config = GenerationConfig::default();
        let weighting = ItemWeighting::new(&config, &[Some(0.2)]);
        let feedback = HashMap::from([(0, false)]);
        assert_eq!(weighting.weights(&[0], None, &feedback), vec![1.0]);
    }

    #[test]
    fn test_unreviewed_uses_sentiment_and_liked_uses_one() {
        let config = feedback_config();
        let sentiments = [Some(0.25), Some(0.75)];
        let weighting = ItemWeighting::new(&config, &sentiments);
        let feedback = HashMap::from([(1, true)]);
        assert_eq!(weighting.weights(&[0, 1], None, &feedback), vec![0.25, 1.0]);
    }

    #[test]
    fn test_disliked_is_zero() {
        let config = feedback_config();
        let sentiments = [Some(0.9), Some(0.5)];
        let weighting = ItemWeighting::new(&config, &sentiments);
        let feedback = HashMap::from([(0, false)]);
        assert_eq!(weighting.weights(&[0, 1], None, &feedback), vec![0.0, 0.5]);
    }

    #[test]
    fn test_missing_sentiment_default() {
        let config = feedback_config().with_missing_sentiment_weight(0.3);
        let weighting = ItemWeighting::new(&config, &[None]);
        assert_eq!(
            weighting.source(0, &HashMap::new()),
            WeightSource::MissingSentiment(0.3)
        );
    }

    #[test]
    fn test_all_zero_falls_back_to_mean() {
        let config = feedback_config();
        let weighting = ItemWeighting::new(&config, &[Some(0.0), Some(0.0)]);
        let feedback = HashMap::from([(1, false)]);
        assert_eq!(weighting.weights(&[0, 1], None, &feedback), vec![1.0, 1.0]);
    }

    #[test]
    fn test_playtime_multiplier() {
        let config = GenerationConfig::default().with_playtime(true);
        let weighting = ItemWeighting::new(&config, &[None, None]);
        let w = weighting.weights(&[0, 1], Some(&[1.0, 3.0]), &HashMap::new());
        assert_eq!(w, vec![1.0, 2.0]);
    }

    #[test]
    fn test_playtime_ignored_when_disabled() {
        let config = GenerationConfig::default();
        let weighting = ItemWeighting::new(&config, &[None]);
        assert_eq!(
            weighting.weights(&[0], Some(&[7.0]), &HashMap::new()),
            vec![1.0]
        );
    }
}
