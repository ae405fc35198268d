use thiserror::Error;

/// Application-level error type.
///
/// None of these are fatal to an editing session: storage errors are swallowed
/// by the store (in-memory state stays authoritative) and render errors leave
/// the previously published artifact in place.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
