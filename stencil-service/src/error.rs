//! Error types for the service layer.

use stencil_blobstore::BlobStoreError;
use stencil_model::ModelError;
use stencil_storage::StorageError;
use thiserror::Error;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Validation, mapping or variable error from the model.
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Blob(#[from] BlobStoreError),

    /// Upload body was not valid base64.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Which side of the boundary an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The request was wrong; resending it unchanged fails the same way.
    BadRequest,
    /// The addressed template or blob does not exist.
    NotFound,
    /// The process or a collaborator is misbehaving.
    Internal,
}

impl Fault {
    /// Matching HTTP status code.
    pub fn status_code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }
}

impl ServiceError {
    pub fn fault(&self) -> Fault {
        match self {
            Self::Model(e) if e.is_server_fault() => Fault::Internal,
            Self::Model(_) | Self::Base64(_) => Fault::BadRequest,
            Self::Storage(StorageError::NotFound(_)) => Fault::NotFound,
            Self::Storage(StorageError::InvalidPattern(_)) => Fault::BadRequest,
            Self::Storage(_) => Fault::Internal,
            Self::Blob(BlobStoreError::NotFound(..)) => Fault::NotFound,
            Self::Blob(
                BlobStoreError::InvalidKey(_)
                | BlobStoreError::InvalidSignature(_)
                | BlobStoreError::Expired(_),
            ) => Fault::BadRequest,
            Self::Blob(BlobStoreError::Storage(_)) => Fault::Internal,
        }
    }
}
