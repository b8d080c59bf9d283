// File: src/core/scores.rs
use crate::core::types::{Rating, DEFAULT_RATING};
use crate::fuzzy::normalizer::candidate_keys;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Learned ratings keyed by normalized lookup key.
///
/// A missing key means the item is unknown, which is not the same thing as a
/// rating of zero. Keys are kept sorted so persisted tables diff cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable {
    ratings: BTreeMap<String, Rating>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Rating> {
        self.ratings.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.ratings.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Rating)> {
        self.ratings.iter().map(|(key, rating)| (key.as_str(), *rating))
    }

    /// Rating for an item name.
    ///
    /// Of the candidate keys present in the table, the longest wins; on equal
    /// length the earlier candidate is kept, so the full key beats a single
    /// word. Unknown names get [`DEFAULT_RATING`].
    pub fn lookup(&self, name: &str) -> Rating {
        let candidates = candidate_keys(name);
        let mut best: Option<(&str, Rating)> = None;
        for key in &candidates {
            let Some(rating) = self.get(key) else {
                continue;
            };
            let longer = match best {
                Some((current, _)) => key.chars().count() > current.chars().count(),
                None => true,
            };
            if longer {
                best = Some((key.as_str(), rating));
            }
        }

        match best {
            Some((key, rating)) => {
                debug!(item = name, key, rating, "lookup hit");
                rating
            }
            None => DEFAULT_RATING,
        }
    }

    /// Writes `rating` under every candidate key of `name`: the full key and
    /// each word. Word entries end up holding whatever item touched them last.
    pub fn update(&mut self, name: &str, rating: Rating) {
        for key in candidate_keys(name) {
            self.ratings.insert(key, rating);
        }
    }
}

impl FromIterator<(String, Rating)> for ScoreTable {
    fn from_iter<I: IntoIterator<Item = (String, Rating)>>(iter: I) -> Self {
        Self {
            ratings: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, Rating)]) -> ScoreTable {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn unknown_name_gets_default() {
        assert_eq!(ScoreTable::new().lookup("Unknown Item"), DEFAULT_RATING);
    }

    #[test]
    fn zero_is_a_real_rating() {
        let scores = table(&[("milk", 0.0)]);
        assert_eq!(scores.get("milk"), Some(0.0));
        assert_eq!(scores.get("bread"), None);
        assert_eq!(scores.lookup("milk"), 0.0);
    }

    #[test]
    fn exact_match() {
        let scores = table(&[("milk,whole", 500.0)]);
        assert_eq!(scores.lookup("Whole Milk"), 500.0);
    }

    #[test]
    fn partial_match_uses_longest_word() {
        let scores = table(&[("milk", 400.0), ("whole", 600.0)]);
        assert_eq!(scores.lookup("Whole Milk"), 600.0);
    }

    #[test]
    fn full_key_preferred_over_partial() {
        let scores = table(&[("milk,whole", 500.0), ("whole", 600.0), ("milk", 700.0)]);
        assert_eq!(scores.lookup("Whole Milk"), 500.0);
    }

    #[test]
    fn equal_length_keeps_earlier_candidate() {
        // "tea" and "ham" are both three characters; "ham" sorts first.
        let scores = table(&[("ham", 10.0), ("tea", 20.0)]);
        assert_eq!(scores.lookup("tea ham"), 10.0);
    }

    #[test]
    fn update_writes_every_candidate() {
        let mut scores = ScoreTable::new();
        scores.update("Whole Milk", 500.0);
        assert_eq!(scores.get("milk,whole"), Some(500.0));
        assert_eq!(scores.get("milk"), Some(500.0));
        assert_eq!(scores.get("whole"), Some(500.0));
        assert_eq!(scores.len(), 3);
    }

    #[test]
    fn update_overwrites_shared_words() {
        let mut scores = ScoreTable::new();
        scores.update("whole milk", 500.0);
        scores.update("oat milk", 900.0);
        assert_eq!(scores.get("milk"), Some(900.0));
        assert_eq!(scores.lookup("whole milk"), 500.0);
        assert_eq!(scores.lookup("skim milk"), 900.0);
    }

    #[test]
    fn serializes_as_plain_map() {
        let scores = table(&[("milk", 984.0)]);
        let json = serde_json::to_string(&scores).unwrap();
        assert_eq!(json, r#"{"milk":984.0}"#);
        let back: ScoreTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scores);
    }
}
