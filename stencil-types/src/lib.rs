//! Core identifier types for Stencil.
//!
//! This crate is the identity codec used by every other crate:
//! - [`TemplateId`]: persisted template identity (UUID v7)
//! - [`BlobKey`]: key under which uploaded file bytes are stored (UUID v4)
//!
//! Domain types (documents, resources, payloads) live in `stencil-model`.

mod ids;

pub use ids::{BlobKey, TemplateId};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid identifier {input:?}: {source}")]
    InvalidId {
        input: String,
        #[source]
        source: uuid::Error,
    },
}
