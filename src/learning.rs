// File: src/learning.rs
use crate::core::scores::ScoreTable;
use crate::core::types::{Checklist, ChecklistItem, Rating, DEFAULT_K_FACTOR};
use tracing::info;

/// Plain logistic Elo.
#[derive(Debug, Clone, Copy)]
pub struct EloRank {
    k_factor: f64,
}

impl EloRank {
    pub fn new(k_factor: f64) -> Self {
        Self { k_factor }
    }

    /// Expected score of a player rated `rating` against `opponent`, in (0, 1).
    pub fn expected(&self, rating: Rating, opponent: Rating) -> f64 {
        1.0 / (1.0 + 10f64.powf((opponent - rating) / 400.0))
    }

    /// New rating after a game with the given `actual` outcome (0 loss, 1 win).
    pub fn rate(&self, rating: Rating, opponent: Rating, actual: f64) -> Rating {
        rating + self.k_factor * (actual - self.expected(rating, opponent))
    }
}

impl Default for EloRank {
    fn default() -> Self {
        Self::new(DEFAULT_K_FACTOR)
    }
}

/// Learns ratings from checklists a person has already put in order.
pub struct LearningEngine {
    elo: EloRank,
}

/// Outcome for `item` against `other`. Placing an item earlier counts as a
/// loss so its rating drops and an ascending sort puts it first.
fn outcome(item: &ChecklistItem, other: &ChecklistItem) -> f64 {
    if item.position < other.position {
        0.0
    } else {
        1.0
    }
}

impl LearningEngine {
    pub fn new() -> Self {
        Self::with_k_factor(DEFAULT_K_FACTOR)
    }

    pub fn with_k_factor(k_factor: f64) -> Self {
        Self {
            elo: EloRank::new(k_factor),
        }
    }

    /// Plays every ordered pair of distinct items against each other.
    ///
    /// Both ratings of a pair are read before either is written. Pairs whose
    /// items share a position carry no ordering and are skipped. Cost is
    /// O(n²) rating writes, fine for human-sized checklists.
    pub fn train<'t>(&self, scores: &'t mut ScoreTable, items: &[ChecklistItem]) -> &'t mut ScoreTable {
        info!(items = items.len(), "training");
        for (i, current) in items.iter().enumerate() {
            for (j, compare) in items.iter().enumerate() {
                if i == j || current.position == compare.position {
                    continue;
                }

                let current_score = scores.lookup(&current.name);
                let compare_score = scores.lookup(&compare.name);

                let new_current = self.elo.rate(current_score, compare_score, outcome(current, compare));
                let new_compare = self.elo.rate(compare_score, current_score, outcome(compare, current));

                scores.update(&current.name, new_current);
                scores.update(&compare.name, new_compare);
            }
        }
        scores
    }

    /// Trains on each checklist in turn; later checklists start from the
    /// ratings the earlier ones produced.
    pub fn train_all<'t>(&self, scores: &'t mut ScoreTable, checklists: &[Checklist]) -> &'t mut ScoreTable {
        for checklist in checklists {
            info!(checklist = %checklist.id, "training on checklist");
            self.train(scores, &checklist.items);
        }
        scores
    }
}

impl Default for LearningEngine {
    fn default() -> Self {
        Self::new()
    }
}
