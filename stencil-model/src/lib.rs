//! Template model for Stencil.
//!
//! Defines the types and pure operations every other Stencil crate builds on:
//! - [`TemplateEntity`] / [`Resource`]: the persisted template and its content
//! - [`TemplatePayload`] / [`ResourcePayload`]: the unvalidated wire mirror
//! - [`validate`]: the document-type x content-type rule matrix
//! - [`Registry`] / [`ResourceStrategy`]: per-content-type resource conversion
//! - [`TemplateMapper`]: payload <-> entity conversion through the registry
//! - [`extract`] / [`render`]: `{{placeholder}}` discovery and substitution
//!
//! Nothing here performs I/O or holds mutable state, so every item is safe to
//! share across threads. Callers own the ordering:
//! extract (optional) -> map to entity -> validate -> persist.

mod document;
mod error;
mod mapper;
mod payload;
mod registry;
mod validate;
mod variables;

pub use document::{ContentType, DocumentType, Resource, TemplateEntity};
pub use error::{ModelError, ModelResult};
pub use mapper::TemplateMapper;
pub use payload::{ResourcePayload, TemplatePayload};
pub use registry::{Registry, ResourceStrategy};
pub use validate::validate;
pub use variables::{extract, placeholders, render};
