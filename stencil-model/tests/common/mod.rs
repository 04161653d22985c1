#![allow(dead_code)]

use stencil_model::{ContentType, DocumentType, Resource, TemplateEntity};

pub fn entity(doc_type: DocumentType, content: ContentType, resource: Resource) -> TemplateEntity {
    TemplateEntity {
        id: None,
        name: "welcome".to_string(),
        summary: "Welcome message for new customers".to_string(),
        doc_type,
        content,
        resource,
    }
}

pub fn text(value: &str) -> Resource {
    Resource {
        text: Some(value.to_string()),
        ..Resource::default()
    }
}

pub fn url(value: &str) -> Resource {
    Resource {
        url: Some(value.to_string()),
        ..Resource::default()
    }
}

pub fn with_vars(mut resource: Resource, vars: &[&str]) -> Resource {
    resource.variables = vars.iter().map(|v| v.to_string()).collect();
    resource
}

pub fn static_text() -> TemplateEntity {
    entity(DocumentType::Static, ContentType::PlainText, text("Thanks for signing up."))
}

pub fn static_image() -> TemplateEntity {
    entity(DocumentType::Static, ContentType::Image, url("https://cdn.example.com/logo.png"))
}

pub fn template_text() -> TemplateEntity {
    entity(
        DocumentType::Template,
        ContentType::PlainText,
        with_vars(text("Hello {{name}}"), &["name"]),
    )
}

pub fn template_file(content: ContentType) -> TemplateEntity {
    entity(
        DocumentType::Template,
        content,
        with_vars(url("https://files.example.com/invoice"), &["total"]),
    )
}
