use thiserror::Error;

/// Error type that captures storage and synchronization failures.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Remote store error: {0}")]
    Remote(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("no snapshot loaded")]
    NoSnapshot,
}
