use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid entity name: {0:?}")]
    InvalidEntityName(String),

    #[error("Invalid player name: {0:?}")]
    InvalidIdentity(String),

    #[error("Settings error: {0}")]
    Settings(String),
}
