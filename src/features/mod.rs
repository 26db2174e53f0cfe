//! Item metadata and its encoding into a shared feature space.
//!
//! # Quick Start
//!
//! ```
//! use gamerec::features::{EncoderConfig, FeatureEncoder, Item};
//!
//! let items = vec![
//!     Item::new(0).with_genres(["rpg"]),
//!     Item::new(1).with_genres(["rpg"]).with_tags(["fantasy"]),
//!     Item::new(2).with_genres(["shooter"]),
//! ];
//!
//! let encoder = FeatureEncoder::new(EncoderConfig::default()).expect("valid config");
//! let encoded = encoder.encode(&items).expect("encoding should succeed");
//!
//! assert_eq!(encoded.features().n_rows(), 3);
//! assert_eq!(encoded.vocabulary(), &["fantasy", "rpg", "shooter"]);
//! ```

mod binarizer;
mod encoder;
mod item;

pub use binarizer::MultiLabelBinarizer;
pub use encoder::{EncodedItems, EncoderConfig, FeatureEncoder, TagFields};
pub use item::{normalize_token, parse_metascore, parse_price, Item, RawItem};
