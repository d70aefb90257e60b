use crate::dataset::model::RowKey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Required input column or guideline key is missing or malformed.
    /// Fatal for the current load.
    #[error("schema error: {0}")]
    Schema(String),

    /// A queue referenced a row key the dataset does not hold.
    #[error("unknown row key {0}")]
    UnknownRow(RowKey),

    /// Cursor does not address an entry of the current review queue.
    #[error("cursor {cursor} out of range for review queue of length {len}")]
    CursorOutOfRange { cursor: usize, len: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CoreError {
    /// Errors a running session reports to the annotator and moves past.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CoreError::CursorOutOfRange { .. } | CoreError::InvalidInput(_)
        )
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
