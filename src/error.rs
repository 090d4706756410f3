use thiserror::Error;

/// Fatal errors only. Per-record malformation is handled as a
/// skip-and-continue `ingest::records::Skip`, never as an `AppError`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Every record in the data directory was skipped or unreadable.
    /// The only malformation condition that surfaces to the caller.
    #[error("no valid match records found in {0}")]
    EmptyDataset(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
