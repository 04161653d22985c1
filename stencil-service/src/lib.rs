//! Template service for Stencil.
//!
//! Wires the pure model (`stencil-model`) to its collaborators: a
//! [`TemplateRepository`](stencil_storage::TemplateRepository) for records and
//! a [`BlobStore`](stencil_blobstore::BlobStore) for uploaded files. Every write
//! runs extract (uploads only) -> map -> validate before any collaborator is
//! called.
//!
//! There are no globals: the entry point builds one [`ServiceConfig`] and the
//! collaborators, then hands them to [`TemplateService::new`].

mod config;
mod error;
mod service;

pub use config::ServiceConfig;
pub use error::{Fault, ServiceError, ServiceResult};
pub use service::{TemplateService, UploadRequest};
