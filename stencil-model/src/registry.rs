//! Content-type-specific conversion between [`ResourcePayload`] and [`Resource`].

use crate::document::{ContentType, Resource};
use crate::error::{ModelError, ModelResult};
use crate::payload::ResourcePayload;
use std::collections::{HashMap, HashSet};

/// How a resource crosses the wire boundary for a given content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceStrategy {
    /// Inline text content. Carries `text` and `variables`; `url` is dropped.
    PlainText,
    /// Content stored elsewhere. Carries `url` and `variables`; `text` is dropped.
    FileReference,
}

impl ResourceStrategy {
    pub fn to_entity(self, payload: &ResourcePayload) -> Resource {
        let variables = copy_variables(payload.variables.as_deref());
        match self {
            Self::PlainText => Resource {
                url: None,
                text: payload.text.clone(),
                variables,
            },
            Self::FileReference => Resource {
                url: payload.url.clone(),
                text: None,
                variables,
            },
        }
    }

    pub fn to_payload(self, resource: &Resource) -> ResourcePayload {
        let variables = Some(copy_variables(Some(&resource.variables)));
        match self {
            Self::PlainText => ResourcePayload {
                url: None,
                text: resource.text.clone(),
                variables,
            },
            Self::FileReference => ResourcePayload {
                url: resource.url.clone(),
                text: None,
                variables,
            },
        }
    }
}

/// Deep copy with absent normalized to empty and repeats dropped in place.
fn copy_variables(source: Option<&[String]>) -> Vec<String> {
    let source = source.unwrap_or_default();
    let mut seen = HashSet::with_capacity(source.len());
    source
        .iter()
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}

/// Fixed table from content type to resource strategy.
///
/// Built once before any request is served; there is no way to add or remove
/// bindings afterwards. Cloning is cheap enough to hand one to each mapper.
#[derive(Debug, Clone)]
pub struct Registry {
    table: HashMap<ContentType, ResourceStrategy>,
}

impl Registry {
    /// The standard bindings: plain text inline, everything else by reference.
    pub fn new() -> Self {
        Self::with_bindings([
            (ContentType::PlainText, ResourceStrategy::PlainText),
            (ContentType::Pdf, ResourceStrategy::FileReference),
            (ContentType::Html, ResourceStrategy::FileReference),
            (ContentType::Image, ResourceStrategy::FileReference),
        ])
    }

    /// Builds a registry from explicit bindings. Later bindings for the same
    /// content type replace earlier ones.
    pub fn with_bindings(
        bindings: impl IntoIterator<Item = (ContentType, ResourceStrategy)>,
    ) -> Self {
        Self {
            table: bindings.into_iter().collect(),
        }
    }

    pub fn get(&self, content: &ContentType) -> ModelResult<ResourceStrategy> {
        self.table
            .get(content)
            .copied()
            .ok_or_else(|| ModelError::ContentTypeUnsupported(content.to_string()))
    }

    /// Startup check that every recognized content type resolves.
    ///
    /// A failure here is a configuration defect and should stop the process.
    pub fn verify(&self) -> ModelResult<()> {
        ContentType::ALL
            .iter()
            .try_for_each(|content| self.get(content).map(|_| ()))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
