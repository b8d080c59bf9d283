// src/core/types.rs
use serde::{Deserialize, Serialize};

/// An Elo-style rating. Lower ratings sort earlier in a checklist.
pub type Rating = f64;

/// Rating used for any item the score table knows nothing about.
pub const DEFAULT_RATING: Rating = 1000.0;

/// Tag marking an item that was placed without a learned rating.
pub const UNSORTED_MARKER: &str = "[unsorted]";

/// What gets appended to an item name when it is tagged.
pub const UNSORTED_TAG: &str = " [unsorted]";

/// Added to every rating to produce a checklist position, keeping positions
/// positive and above anything the checklist service assigns on its own.
pub const POSITION_OFFSET: Rating = 100_000.0;

/// Elo step size used when none is configured.
pub const DEFAULT_K_FACTOR: f64 = 32.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Complete,
    #[default]
    Incomplete,
}

/// A single line of a checklist, as held by the checklist service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub name: String,
    /// Lower positions come first.
    #[serde(rename = "pos")]
    pub position: i64,
    #[serde(default)]
    pub state: ItemState,
}

impl ChecklistItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            state: ItemState::Incomplete,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == ItemState::Complete
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    pub id: String,
    #[serde(rename = "idCard")]
    pub card_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "checkItems", default)]
    pub items: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(rename = "idList")]
    pub list_id: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(rename = "idChecklists", default)]
    pub checklist_ids: Vec<String>,
}

impl Card {
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardList {
    pub id: String,
    pub name: String,
}
