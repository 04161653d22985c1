use crate::{StorageError, StorageResult, TemplateRepository};
use regex::RegexBuilder;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use stencil_model::TemplateEntity;
use stencil_types::TemplateId;
use tracing::debug;

/// In-process template store.
///
/// Keyed by identity; UUID v7 identities make iteration order match insertion
/// order, which is what summary search relies on for "first match".
#[derive(Debug, Default)]
pub struct MemoryTemplateStore {
    templates: RwLock<BTreeMap<TemplateId, TemplateEntity>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> StorageResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, BTreeMap<TemplateId, TemplateEntity>>> {
        self.templates.read().map_err(|_| StorageError::Poisoned)
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, BTreeMap<TemplateId, TemplateEntity>>> {
        self.templates.write().map_err(|_| StorageError::Poisoned)
    }

    fn find_first(
        &self,
        what: impl FnOnce() -> String,
        predicate: impl Fn(&TemplateEntity) -> bool,
    ) -> StorageResult<TemplateEntity> {
        self.read()?
            .values()
            .find(|entity| predicate(entity))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(what()))
    }
}

impl TemplateRepository for MemoryTemplateStore {
    fn insert(&self, mut entity: TemplateEntity) -> StorageResult<TemplateId> {
        let id = TemplateId::new();
        entity.id = Some(id);
        self.write()?.insert(id, entity);
        debug!(template_id = %id, "Template inserted");
        Ok(id)
    }

    fn find_by_id(&self, id: TemplateId) -> StorageResult<TemplateEntity> {
        self.read()?
            .get(&id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("id={id}")))
    }

    fn find_by_name(&self, name: &str) -> StorageResult<TemplateEntity> {
        self.find_first(|| format!("name={name}"), |entity| entity.name == name)
    }

    fn find_by_summary(&self, pattern: &str) -> StorageResult<TemplateEntity> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        self.find_first(
            || format!("summary~{pattern}"),
            |entity| regex.is_match(&entity.summary),
        )
    }

    fn update_by_id(&self, id: TemplateId, mut entity: TemplateEntity) -> StorageResult<()> {
        let mut templates = self.write()?;
        let slot = templates
            .get_mut(&id)
            .ok_or_else(|| StorageError::NotFound(format!("id={id}")))?;
        entity.id = Some(id);
        *slot = entity;
        debug!(template_id = %id, "Template overwritten");
        Ok(())
    }

    fn delete_by_id(&self, id: TemplateId) -> StorageResult<()> {
        self.write()?
            .remove(&id)
            .map(|_| debug!(template_id = %id, "Template deleted"))
            .ok_or_else(|| StorageError::NotFound(format!("id={id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn poisoned_lock_is_reported() {
        let store = Arc::new(MemoryTemplateStore::new());
        let held = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = held.templates.write().unwrap();
            panic!("writer dies holding the lock");
        })
        .join();

        assert!(matches!(store.len(), Err(StorageError::Poisoned)));
        assert!(matches!(store.is_empty(), Err(StorageError::Poisoned)));
        assert!(matches!(
            store.find_by_id(TemplateId::new()),
            Err(StorageError::Poisoned)
        ));
    }
}
