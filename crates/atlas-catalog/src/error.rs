use thiserror::Error;

/// Errors from the shared-catalog gateway.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Transport-level failure (connect, timeout, decode).
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The table store answered with a non-success status.
    #[error("Catalog responded with status {0}")]
    Status(u16),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CatalogError>;
