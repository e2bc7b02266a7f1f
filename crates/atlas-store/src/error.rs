use thiserror::Error;

/// Errors produced by the persistence layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The local storage area cannot be written (quota exceeded, area
    /// disabled). Callers fall back to in-memory-only operation.
    #[error("Local storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A stored or imported blob failed to parse or failed shape
    /// validation.
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    /// An imported file lacks the required numeric `lastSyncTimestamp`
    /// field.
    #[error("Invalid format: missing numeric lastSyncTimestamp")]
    InvalidFormat,

    /// Unexpected fault from the underlying file I/O.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Envelope serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
