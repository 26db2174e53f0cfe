//! gamerec: content-based game recommendation and top-K evaluation.
//!
//! Items are encoded from their categorical metadata into a shared feature
//! space, users are represented by the (optionally feedback-weighted) mean
//! of the items they own, and recommendations are the nearest unseen items
//! by cosine distance. Recommendation lists are scored against held-out
//! interactions with HR@k, nDCG@k, recall@k, ideal recall@k and nRecall@k.
//!
//! # Quick Start
//!
//! ```
//! use gamerec::prelude::*;
//! use gamerec::data::{GroundTruth, UserInteractions};
//! use gamerec::features::Item;
//!
//! let items = vec![
//!     Item::new(0).with_genres(["rpg"]),
//!     Item::new(1).with_genres(["rpg"]),
//!     Item::new(2).with_genres(["shooter"]),
//! ];
//! let mut config = RecommenderConfig::default();
//! config.generation.amount = 1;
//!
//! let recommender = ContentRecommender::fit(&items, config).expect("fit should succeed");
//! let train = vec![UserInteractions::new("alice", vec![0])];
//! let table = recommender.generate(&train, &[]).expect("generation should succeed");
//!
//! let test = vec![GroundTruth::new("alice", vec![1])];
//! let report = Evaluator::new(1).expect("k > 0").evaluate(&table.records, &test);
//! assert_eq!(report.metric("HR@1"), Some(1.0));
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Vector, dense and sparse matrices
//! - [`features`]: Item cleaning and tag-set encoding
//! - [`preprocessing`]: Term weighting, dimensionality reduction, normalization
//! - [`index`]: Exact cosine nearest-neighbor retrieval
//! - [`data`]: User records and JSON Lines loaders
//! - [`recommend`]: Content-based and popularity recommenders
//! - [`metrics`]: Top-K ranking metrics
//! - [`evaluation`]: Joining recommendations with ground truth
//! - [`config`]: TOML configuration

pub mod config;
pub mod data;
pub mod error;
pub mod evaluation;
pub mod features;
pub mod index;
pub mod metrics;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod recommend;
pub mod traits;

pub use error::{RecError, Result};
pub use primitives::{Matrix, Vector};
