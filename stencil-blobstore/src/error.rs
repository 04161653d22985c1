use thiserror::Error;

/// Result type for blob store operations.
pub type BlobStoreResult<T> = Result<T, BlobStoreError>;

#[derive(Debug, Error)]
pub enum BlobStoreError {
    /// No blob under this key in this bucket.
    #[error("blob not found: {0}/{1}")]
    NotFound(String, String),

    /// A presigned URL failed verification.
    #[error("invalid presigned url: {0}")]
    InvalidSignature(String),

    /// A presigned URL is past its expiry.
    #[error("presigned url expired at {0}")]
    Expired(String),

    #[error("invalid blob key: {0}")]
    InvalidKey(#[from] stencil_types::Error),

    #[error("storage error: {0}")]
    Storage(String),
}
