use crate::document::TemplateEntity;
use crate::error::ModelResult;
use crate::payload::TemplatePayload;
use crate::registry::Registry;
use stencil_types::TemplateId;

/// Converts between wire payloads and entities through a [`Registry`].
///
/// Mapping never validates. Callers run [`validate`](crate::validate) on the
/// entity from [`to_entity`](Self::to_entity) before persisting it.
#[derive(Debug, Clone, Default)]
pub struct TemplateMapper {
    registry: Registry,
}

impl TemplateMapper {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Builds a candidate entity from a payload.
    ///
    /// An absent identity stays unset (create flows); a present one must parse.
    pub fn to_entity(&self, payload: &TemplatePayload) -> ModelResult<TemplateEntity> {
        let strategy = self.registry.get(&payload.content)?;
        let resource = strategy.to_entity(&payload.resource);
        let id = payload.id.as_deref().map(TemplateId::parse).transpose()?;

        Ok(TemplateEntity {
            id,
            name: payload.name.clone(),
            summary: payload.summary.clone(),
            doc_type: payload.doc_type.clone(),
            content: payload.content.clone(),
            resource,
        })
    }

    pub fn to_payload(&self, entity: &TemplateEntity) -> ModelResult<TemplatePayload> {
        let strategy = self.registry.get(&entity.content)?;

        Ok(TemplatePayload {
            id: entity.id.map(|id| id.to_string()),
            name: entity.name.clone(),
            summary: entity.summary.clone(),
            doc_type: entity.doc_type.clone(),
            content: entity.content.clone(),
            resource: strategy.to_payload(&entity.resource),
        })
    }
}
