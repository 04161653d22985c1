//! Error types for the template model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Every way validation, mapping or variable handling can fail.
///
/// All of these are deterministic outcomes of pure functions: retrying with
/// the same input reproduces the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Unknown document type, or a type/content pair that is never supported.
    #[error("invalid document type: {0}")]
    InvalidType(String),

    /// Unknown content type on an entity.
    #[error("invalid content type: {0:?}")]
    InvalidContent(String),

    /// A field is empty, malformed or not allowed for this template kind.
    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("static template cannot have variables")]
    StaticCannotHaveVars,

    #[error("static template cannot have a url")]
    StaticCannotHaveUrl,

    /// The required text or url source is empty.
    #[error("template must have a {0} source")]
    TemplateMustHaveSource(&'static str),

    #[error("template cannot have a url")]
    TemplateCannotHaveUrl,

    #[error("template cannot have inline text")]
    TemplateCannotHaveText,

    /// The registry has no resource strategy for this content type.
    #[error("no resource mapping registered for content type {0:?}")]
    ContentTypeUnsupported(String),

    /// Variable extraction is not defined for this content type.
    #[error("unsupported content type for variable extraction: {0:?}")]
    UnsupportedContentType(String),

    /// Defined for this content type but not available yet.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    #[error("invalid identity: {0}")]
    InvalidIdentity(#[from] stencil_types::Error),

    /// Rendering referenced variables that have no binding.
    #[error("missing bindings for variables: {}", missing.join(", "))]
    VariablesMismatch { missing: Vec<String> },
}

impl ModelError {
    /// Whether the error points at a misconfigured process rather than bad input.
    pub fn is_server_fault(&self) -> bool {
        matches!(self, Self::ContentTypeUnsupported(_))
    }

    pub(crate) fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
