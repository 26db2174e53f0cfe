//! Catalog items and the cleaning of raw metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token added for items flagged as early access.
pub const EARLY_ACCESS_TOKEN: &str = "earlyaccess";

/// A cleaned catalog item.
///
/// `id` is the item's row in every feature matrix built from the catalog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Item {
    /// Row index in the catalog.
    pub id: usize,
    /// Normalized genre tokens.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Normalized user tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Normalized store specs ("singleplayer", "steamachievements", ...).
    #[serde(default)]
    pub specs: Vec<String>,
    /// Developer names.
    #[serde(default)]
    pub developer: Vec<String>,
    /// Publisher names.
    #[serde(default)]
    pub publisher: Vec<String>,
    /// Early-access flag.
    #[serde(default)]
    pub early_access: bool,
    /// Price; 0 when unknown or free.
    #[serde(default)]
    pub price: f64,
    /// Metascore, if published.
    #[serde(default)]
    pub metascore: Option<f64>,
    /// Review sentiment in [0, 1], if known.
    #[serde(default)]
    pub sentiment: Option<f64>,
}

impl Item {
    /// Creates an item with no metadata.
    #[must_use]
    pub fn new(id: usize) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Sets genre tokens.
    #[must_use]
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    /// Sets tag tokens.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets spec tokens.
    #[must_use]
    pub fn with_specs<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specs = specs.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the sentiment score.
    #[must_use]
    pub fn with_sentiment(mut self, sentiment: f64) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    /// Synthetic early-access token, if flagged.
    #[must_use]
    pub fn early_access_token(&self) -> Option<&'static str> {
        self.early_access.then_some(EARLY_ACCESS_TOKEN)
    }
}

/// Item metadata as scraped from the store, before cleaning.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItem {
    /// Row index in the catalog.
    pub id: usize,
    /// Price as published: a number or free text such as "Free to Play".
    #[serde(default)]
    pub price: Value,
    /// Metascore: a number, numeric text, or "NA".
    #[serde(default)]
    pub metascore: Value,
    /// Comma-separated developer names.
    #[serde(default)]
    pub developer: Option<String>,
    /// Comma-separated publisher names.
    #[serde(default)]
    pub publisher: Option<String>,
    /// Genre labels.
    #[serde(default)]
    pub genres: Vec<String>,
    /// User tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Store specs.
    #[serde(default)]
    pub specs: Vec<String>,
    /// Early-access flag.
    #[serde(default)]
    pub early_access: bool,
    /// Review sentiment in [0, 1].
    #[serde(default)]
    pub sentiment: Option<f64>,
}

impl RawItem {
    /// Cleans the raw metadata into an [`Item`].
    ///
    /// # Examples
    ///
    /// ```
    /// use gamerec::features::RawItem;
    /// use serde_json::json;
    ///
    /// let raw: RawItem = serde_json::from_value(json!({
    ///     "id": 0,
    ///     "price": "Free to Play",
    ///     "metascore": "NA",
    ///     "developer": "Valve, Hidden Path",
    ///     "genres": ["Action", "Free to Play"],
    /// })).expect("valid raw item");
    ///
    /// let item = raw.clean();
    /// assert_eq!(item.price, 0.0);
    /// assert_eq!(item.metascore, None);
    /// assert_eq!(item.developer, vec!["valve", "hidden path"]);
    /// assert_eq!(item.genres, vec!["action", "freetoplay"]);
    /// ```
    #[must_use]
    pub fn clean(self) -> Item {
        Item {
            id: self.id,
            genres: normalize_tokens(&self.genres),
            tags: normalize_tokens(&self.tags),
            specs: normalize_tokens(&self.specs),
            developer: split_names(self.developer.as_deref()),
            publisher: split_names(self.publisher.as_deref()),
            early_access: self.early_access,
            price: parse_price(&self.price),
            metascore: parse_metascore(&self.metascore),
            sentiment: self.sentiment.filter(|s| s.is_finite()),
        }
    }
}

/// Lower-cases a label and keeps only `[a-z0-9]`.
///
/// # Examples
///
/// ```
/// use gamerec::features::normalize_token;
///
/// assert_eq!(normalize_token("Single-player"), "singleplayer");
/// assert_eq!(normalize_token("Free to Play"), "freetoplay");
/// ```
#[must_use]
pub fn normalize_token(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

fn normalize_tokens(labels: &[String]) -> Vec<String> {
    labels
        .iter()
        .map(|l| normalize_token(l))
        .filter(|t| !t.is_empty())
        .collect()
}

fn split_names(names: Option<&str>) -> Vec<String> {
    names
        .unwrap_or_default()
        .to_lowercase()
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a published price; anything that is not a number is 0.
///
/// # Examples
///
/// ```
/// use gamerec::features::parse_price;
/// use serde_json::json;
///
/// assert_eq!(parse_price(&json!("19.99")), 19.99);
/// assert_eq!(parse_price(&json!(4.99)), 4.99);
/// assert_eq!(parse_price(&json!("Free To Play")), 0.0);
/// assert_eq!(parse_price(&json!(null)), 0.0);
/// ```
#[must_use]
pub fn parse_price(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.starts_with(|c: char| c.is_ascii_digit()) {
                s.parse::<f64>().ok()
            } else {
                None
            }
        }
        _ => None,
    };
    parsed.filter(|p| p.is_finite()).unwrap_or(0.0)
}

/// Parses a metascore; `"NA"`, blanks and non-numbers are missing.
///
/// # Examples
///
/// ```
/// use gamerec::features::parse_metascore;
/// use serde_json::json;
///
/// assert_eq!(parse_metascore(&json!(81)), Some(81.0));
/// assert_eq!(parse_metascore(&json!("73")), Some(73.0));
/// assert_eq!(parse_metascore(&json!("NA")), None);
/// ```
#[must_use]
pub fn parse_metascore(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim() != "NA" => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|m| m.is_finite())
}
