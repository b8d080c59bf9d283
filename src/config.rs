// File: src/config.rs
use crate::core::types::DEFAULT_K_FACTOR;
use crate::error::{ShoprError, ShoprResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = ".shopr.json";

fn default_scores_path() -> PathBuf {
    PathBuf::from("scores.json")
}

fn default_k_factor() -> f64 {
    DEFAULT_K_FACTOR
}

fn default_shopping_list_name() -> String {
    "Shopping List".to_string()
}

/// Which labels and lists drive a run, and where its state lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prefs {
    /// Board snapshot the run reads and writes back.
    pub board_file: PathBuf,
    pub train_label: String,
    pub order_label: String,
    pub populate_label: String,
    /// Where recipe cards rest when they are not selected.
    pub available_list: String,
    /// Recipe cards chosen for the next shopping trip.
    pub selected_list: String,
    #[serde(default = "default_scores_path")]
    pub scores_path: PathBuf,
    #[serde(default = "default_k_factor")]
    pub k_factor: f64,
    /// Name given to the checklist created on a populate card without one.
    #[serde(default = "default_shopping_list_name")]
    pub shopping_list_name: String,
}

impl Prefs {
    pub fn load(path: &Path) -> ShoprResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| ShoprError::Config {
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> ShoprResult<Self> {
        let prefs: Prefs = serde_json::from_str(text).map_err(|e| ShoprError::Config {
            reason: e.to_string(),
        })?;
        if !(prefs.k_factor.is_finite() && prefs.k_factor > 0.0) {
            return Err(ShoprError::Config {
                reason: format!("kFactor must be a positive number, got {}", prefs.k_factor),
            });
        }
        Ok(prefs)
    }
}
