//! User-level records and their JSON Lines loaders.
//!
//! Every table is one JSON object per line. Item ids refer to catalog rows.
//!
//! # Examples
//!
//! ```
//! use gamerec::data::UserInteractions;
//!
//! let record: UserInteractions = serde_json::from_str(
//!     r#"{"user_id": "u1", "items": [0, 4], "playtime": [12.0, 0.0]}"#,
//! ).expect("valid record");
//! assert!(record.validate().is_ok());
//! ```

use crate::error::{RecError, Result};
use crate::features::{Item, RawItem};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Items a user owns, in inventory order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInteractions {
    /// User identifier.
    pub user_id: String,
    /// Owned item ids.
    pub items: Vec<usize>,
    /// Playtime per owned item, aligned with `items`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playtime: Option<Vec<f64>>,
}

impl UserInteractions {
    /// Creates a record without playtime.
    #[must_use]
    pub fn new(user_id: impl Into<String>, items: Vec<usize>) -> Self {
        Self {
            user_id: user_id.into(),
            items,
            playtime: None,
        }
    }

    /// Attaches aligned playtime values.
    #[must_use]
    pub fn with_playtime(mut self, playtime: Vec<f64>) -> Self {
        self.playtime = Some(playtime);
        self
    }

    /// Checks that playtime is aligned with `items`.
    ///
    /// # Errors
    ///
    /// Returns [`RecError::MisalignedRecord`] on a length mismatch.
    pub fn validate(&self) -> Result<()> {
        match &self.playtime {
            Some(p) if p.len() != self.items.len() => Err(RecError::MisalignedRecord {
                user_id: self.user_id.clone(),
                field: "playtime",
                expected: self.items.len(),
                actual: p.len(),
            }),
            _ => Ok(()),
        }
    }
}

/// Explicit feedback: reviewed items and whether the user recommends each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserReviews {
    /// User identifier.
    pub user_id: String,
    /// Reviewed item ids.
    pub items: Vec<usize>,
    /// Recommend flag per reviewed item, aligned with `items`.
    pub recommend: Vec<bool>,
}

impl UserReviews {
    /// Creates a review record.
    #[must_use]
    pub fn new(user_id: impl Into<String>, items: Vec<usize>, recommend: Vec<bool>) -> Self {
        Self {
            user_id: user_id.into(),
            items,
            recommend,
        }
    }

    /// Checks that flags are aligned with `items`.
    ///
    /// # Errors
    ///
    /// Returns [`RecError::MisalignedRecord`] on a length mismatch.
    pub fn validate(&self) -> Result<()> {
        if self.recommend.len() != self.items.len() {
            return Err(RecError::MisalignedRecord {
                user_id: self.user_id.clone(),
                field: "recommend",
                expected: self.items.len(),
                actual: self.recommend.len(),
            });
        }
        Ok(())
    }

    /// `(item, recommend)` pairs.
    pub fn feedback(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.items.iter().copied().zip(self.recommend.iter().copied())
    }
}

/// Held-out items for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruth {
    /// User identifier.
    pub user_id: String,
    /// Held-out item ids.
    pub items: Vec<usize>,
}

impl GroundTruth {
    /// Creates a ground-truth record.
    #[must_use]
    pub fn new(user_id: impl Into<String>, items: Vec<usize>) -> Self {
        Self {
            user_id: user_id.into(),
            items,
        }
    }
}

/// Ranked recommendations for one user, nearest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// User identifier.
    pub user_id: String,
    /// Recommended item ids.
    pub items: Vec<usize>,
}

impl Recommendation {
    /// Creates a recommendation record.
    #[must_use]
    pub fn new(user_id: impl Into<String>, items: Vec<usize>) -> Self {
        Self {
            user_id: user_id.into(),
            items,
        }
    }
}

/// Which held-out split to evaluate against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Split {
    /// Test split.
    #[default]
    Test,
    /// Validation split.
    Validation,
}

/// Train interactions plus the test and validation ground truth.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Interactions used to build query vectors.
    pub train: Vec<UserInteractions>,
    /// Test ground truth.
    pub test: Vec<GroundTruth>,
    /// Validation ground truth.
    pub val: Vec<GroundTruth>,
}

impl Dataset {
    /// Loads the three splits from JSON Lines files.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or a record is malformed.
    pub fn load(
        train: impl AsRef<Path>,
        test: impl AsRef<Path>,
        val: impl AsRef<Path>,
    ) -> Result<Self> {
        Ok(Self {
            train: read_interactions(train)?,
            test: read_ground_truth(test)?,
            val: read_ground_truth(val)?,
        })
    }

    /// Ground truth for the requested split.
    #[must_use]
    pub fn ground_truth(&self, split: Split) -> &[GroundTruth] {
        match split {
            Split::Test => &self.test,
            Split::Validation => &self.val,
        }
    }
}

/// Reads one JSON object per non-blank line.
///
/// # Errors
///
/// Returns an I/O error, or a serialization error naming the line.
pub fn read_jsonl<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| {
            RecError::Serialization(format!("{}:{}: {e}", path.display(), n + 1))
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Reads raw item metadata and cleans it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a line is malformed.
pub fn read_items(path: impl AsRef<Path>) -> Result<Vec<Item>> {
    let raw: Vec<RawItem> = read_jsonl(path)?;
    Ok(raw.into_iter().map(RawItem::clean).collect())
}

/// Reads interaction records, validating playtime alignment.
///
/// # Errors
///
/// Returns an error on malformed or misaligned records.
pub fn read_interactions(path: impl AsRef<Path>) -> Result<Vec<UserInteractions>> {
    let records: Vec<UserInteractions> = read_jsonl(path)?;
    records.iter().try_for_each(UserInteractions::validate)?;
    Ok(records)
}

/// Reads review records, validating flag alignment.
///
/// # Errors
///
/// Returns an error on malformed or misaligned records.
pub fn read_reviews(path: impl AsRef<Path>) -> Result<Vec<UserReviews>> {
    let records: Vec<UserReviews> = read_jsonl(path)?;
    records.iter().try_for_each(UserReviews::validate)?;
    Ok(records)
}

/// Reads ground-truth records.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a line is malformed.
pub fn read_ground_truth(path: impl AsRef<Path>) -> Result<Vec<GroundTruth>> {
    read_jsonl(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_lines(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        for line in lines {
            writeln!(file, "{line}").expect("write");
        }
        file
    }

    #[test]
    fn test_read_interactions() {
        let file = write_lines(&[
            r#"{"user_id": "a", "items": [0, 1]}"#,
            "",
            r#"{"user_id": "b", "items": [2], "playtime": [30.0]}"#,
        ]);
        let records = read_interactions(file.path()).expect("valid file");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].playtime, None);
        assert_eq!(records[1].playtime, Some(vec![30.0]));
    }

    #[test]
    fn test_misaligned_playtime_rejected() {
        let file = write_lines(&[r#"{"user_id": "a", "items": [0, 1], "playtime": [1.0]}"#]);
        let err = read_interactions(file.path()).expect_err("misaligned");
        assert!(matches!(
            err,
            RecError::MisalignedRecord {
                field: "playtime",
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_misaligned_reviews_rejected() {
        let file = write_lines(&[r#"{"user_id": "a", "items": [0], "recommend": [true, false]}"#]);
        assert!(read_reviews(file.path()).is_err());
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let file = write_lines(&[r#"{"user_id": "a", "items": []}"#, "{not json"]);
        let err = read_ground_truth(file.path()).expect_err("malformed");
        assert!(err.to_string().contains(":2:"));
    }

    #[test]
    fn test_read_items_cleans_metadata() {
        let file = write_lines(&[
            r#"{"id": 0, "genres": ["Action"], "price": "Free", "metascore": "NA"}"#,
            r#"{"id": 1, "genres": ["Indie"], "price": 9.99, "metascore": 70}"#,
        ]);
        let items = read_items(file.path()).expect("valid file");
        assert_eq!(items[0].genres, vec!["action"]);
        assert_eq!(items[0].price, 0.0);
        assert_eq!(items[1].metascore, Some(70.0));
    }

    #[test]
    fn test_dataset_split_selection() {
        let dataset = Dataset {
            train: vec![UserInteractions::new("a", vec![0])],
            test: vec![GroundTruth::new("a", vec![1])],
            val: vec![GroundTruth::new("a", vec![2])],
        };
        assert_eq!(dataset.ground_truth(Split::Test)[0].items, vec![1]);
        assert_eq!(dataset.ground_truth(Split::Validation)[0].items, vec![2]);
    }

    #[test]
    fn test_dataset_load() {
        let train = write_lines(&[r#"{"user_id": "a", "items": [0]}"#]);
        let test = write_lines(&[r#"{"user_id": "a", "items": [1]}"#]);
        let val = write_lines(&[r#"{"user_id": "a", "items": [2, 3]}"#]);
        let dataset = Dataset::load(train.path(), test.path(), val.path()).expect("load");
        assert_eq!(dataset.train.len(), 1);
        assert_eq!(dataset.val[0].items, vec![2, 3]);
    }

    #[test]
    fn test_review_feedback_pairs() {
        let reviews = UserReviews::new("a", vec![3, 5], vec![true, false]);
        let pairs: Vec<_> = reviews.feedback().collect();
        assert_eq!(pairs, vec![(3, true), (5, false)]);
    }
}
