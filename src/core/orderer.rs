// File: src/core/orderer.rs
use crate::core::scores::ScoreTable;
use crate::core::types::{ChecklistItem, POSITION_OFFSET, UNSORTED_TAG};
use crate::fuzzy::normalizer::{full_key, has_unsorted_marker};

/// A proposed change to one checklist item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemUpdate {
    pub item_id: String,
    pub name: String,
    pub position: i64,
}

/// Position the item should take, truncated toward zero.
pub fn compute_target_position(scores: &ScoreTable, item: &ChecklistItem) -> i64 {
    (scores.lookup(&item.name) + POSITION_OFFSET) as i64
}

/// Only the full key counts here, not single words: an item can get a rating
/// through one of its words and still be flagged because its exact name was
/// never trained.
pub fn should_tag_unsorted(scores: &ScoreTable, item: &ChecklistItem) -> bool {
    !scores.contains(&full_key(&item.name)) && !has_unsorted_marker(&item.name)
}

/// The item's name with the unsorted tag appended when it needs one.
pub fn tagged_name(scores: &ScoreTable, item: &ChecklistItem) -> String {
    if should_tag_unsorted(scores, item) {
        format!("{}{}", item.name, UNSORTED_TAG)
    } else {
        item.name.clone()
    }
}

/// Proposes a new position (and possibly a tagged name) for an item, or
/// nothing when it already sits where the ratings put it.
pub fn propose(scores: &ScoreTable, item: &ChecklistItem) -> Option<ItemUpdate> {
    let position = compute_target_position(scores, item);
    if position == item.position {
        return None;
    }
    Some(ItemUpdate {
        item_id: item.id.clone(),
        name: tagged_name(scores, item),
        position,
    })
}
