//! The document-type x content-type rule matrix.
//!
//! | type     | content        | variables | url                  | text        |
//! |----------|----------------|-----------|----------------------|-------------|
//! | STATIC   | PLAIN_TEXT     | empty     | empty                | any         |
//! | STATIC   | IMAGE          | empty     | required, http(s)    | empty       |
//! | TEMPLATE | PLAIN_TEXT     | any       | empty                | required    |
//! | TEMPLATE | PDF, HTML      | any       | required, http(s)    | empty       |
//!
//! Every other pair is rejected with [`ModelError::InvalidType`].

use crate::document::{ContentType, DocumentType, Resource, TemplateEntity};
use crate::error::{ModelError, ModelResult};
use url::Url;

/// Checks an assembled entity against the rule matrix.
///
/// Checks run in a fixed order and the first failure wins, so the outcome for
/// a given entity never changes between calls.
pub fn validate(entity: &TemplateEntity) -> ModelResult<()> {
    if !entity.doc_type.is_recognized() {
        return Err(ModelError::InvalidType(format!(
            "{:?} is not a known document type",
            entity.doc_type.as_str()
        )));
    }
    if !entity.content.is_recognized() {
        return Err(ModelError::InvalidContent(entity.content.to_string()));
    }
    require_non_blank("name", &entity.name)?;
    require_non_blank("summary", &entity.summary)?;

    let resource = &entity.resource;
    match (&entity.doc_type, &entity.content) {
        (DocumentType::Static, ContentType::PlainText) => {
            reject_variables(resource)?;
            if resource.url().is_some() {
                return Err(ModelError::StaticCannotHaveUrl);
            }
            Ok(())
        }
        (DocumentType::Static, ContentType::Image) => {
            reject_variables(resource)?;
            let url = resource
                .url()
                .ok_or_else(|| ModelError::invalid_field("resource.url", "image requires a url"))?;
            require_web_url(url)?;
            if resource.text().is_some() {
                return Err(ModelError::invalid_field(
                    "resource.text",
                    "image cannot carry inline text",
                ));
            }
            Ok(())
        }
        (DocumentType::Template, ContentType::PlainText) => {
            if resource.text().is_none() {
                return Err(ModelError::TemplateMustHaveSource("text"));
            }
            if resource.url().is_some() {
                return Err(ModelError::TemplateCannotHaveUrl);
            }
            Ok(())
        }
        (DocumentType::Template, ContentType::Pdf | ContentType::Html) => {
            let url = resource.url().ok_or(ModelError::TemplateMustHaveSource("url"))?;
            require_web_url(url)?;
            if resource.text().is_some() {
                return Err(ModelError::TemplateCannotHaveText);
            }
            Ok(())
        }
        (doc_type, content) => Err(ModelError::InvalidType(format!(
            "{doc_type} documents cannot hold {content} content"
        ))),
    }
}

fn require_non_blank(field: &'static str, value: &str) -> ModelResult<()> {
    if value.trim().is_empty() {
        return Err(ModelError::invalid_field(field, "must not be blank"));
    }
    Ok(())
}

fn reject_variables(resource: &Resource) -> ModelResult<()> {
    if resource.variables.is_empty() {
        Ok(())
    } else {
        Err(ModelError::StaticCannotHaveVars)
    }
}

/// Accepts only absolute `http`/`https` URLs with a host.
fn require_web_url(raw: &str) -> ModelResult<()> {
    let parsed =
        Url::parse(raw).map_err(|e| ModelError::invalid_field("resource.url", e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(()),
        "http" | "https" => Err(ModelError::invalid_field("resource.url", "missing host")),
        other => Err(ModelError::invalid_field(
            "resource.url",
            format!("scheme {other:?} is not http or https"),
        )),
    }
}
