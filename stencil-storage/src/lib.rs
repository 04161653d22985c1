//! Template persistence boundary for Stencil.
//!
//! The engine never talks to a database directly. Services depend on
//! `Arc<dyn TemplateRepository>`; deployments plug in their own backend and
//! tests use [`MemoryTemplateStore`].
//!
//! Only validated entities should reach [`TemplateRepository::insert`] and
//! [`TemplateRepository::update_by_id`]; the store does not re-check them.

mod error;
mod memory;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryTemplateStore;

use stencil_model::TemplateEntity;
use stencil_types::TemplateId;

/// Persistence operations for templates.
pub trait TemplateRepository: Send + Sync {
    /// Stores a new template and returns the identity minted for it.
    ///
    /// Any identity already on `entity` is ignored.
    fn insert(&self, entity: TemplateEntity) -> StorageResult<TemplateId>;

    fn find_by_id(&self, id: TemplateId) -> StorageResult<TemplateEntity>;

    /// Exact, case-sensitive name match.
    fn find_by_name(&self, name: &str) -> StorageResult<TemplateEntity>;

    /// First template (in identity order) whose summary matches `pattern`,
    /// a case-insensitive regular expression.
    fn find_by_summary(&self, pattern: &str) -> StorageResult<TemplateEntity>;

    /// Replaces every stored field of `id` with `entity`. The identity is kept.
    fn update_by_id(&self, id: TemplateId, entity: TemplateEntity) -> StorageResult<()>;

    fn delete_by_id(&self, id: TemplateId) -> StorageResult<()>;
}
