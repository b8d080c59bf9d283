// File: src/error.rs

/// Failures from the collaborators around the ranking core: files, config
/// and the checklist service.
#[derive(Debug, thiserror::Error)]
pub enum ShoprError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("config error: {reason}")]
    Config { reason: String },

    #[error("unknown card: {id}")]
    UnknownCard { id: String },

    #[error("unknown checklist: {id}")]
    UnknownChecklist { id: String },

    #[error("unknown item {item_id} in checklist {checklist_id}")]
    UnknownItem {
        checklist_id: String,
        item_id: String,
    },

    #[error("unknown list: {id}")]
    UnknownList { id: String },
}

pub type ShoprResult<T> = Result<T, ShoprError>;
