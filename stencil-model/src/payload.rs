use crate::document::{ContentType, DocumentType};
use serde::{Deserialize, Serialize};

/// Wire-facing mirror of [`TemplateEntity`](crate::TemplateEntity).
///
/// Never validated itself: map it with [`TemplateMapper::to_entity`](crate::TemplateMapper::to_entity)
/// and validate the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatePayload {
    /// Canonical identity string; absent on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub content: ContentType,
    #[serde(default)]
    pub resource: ResourcePayload,
}

/// Wire form of [`Resource`](crate::Resource). Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<String>>,
}
