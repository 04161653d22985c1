mod common;

use common::*;
use stencil_model::{ContentType, DocumentType, ModelError, Resource, validate};

fn err_of(e: &stencil_model::TemplateEntity) -> ModelError {
    validate(e).unwrap_err()
}

// ── Accepted shapes ──────────────────────────────────────────────

#[test]
fn accepts_each_supported_combination() {
    assert!(validate(&static_text()).is_ok());
    assert!(validate(&static_image()).is_ok());
    assert!(validate(&template_text()).is_ok());
    assert!(validate(&template_file(ContentType::Pdf)).is_ok());
    assert!(validate(&template_file(ContentType::Html)).is_ok());
}

#[test]
fn static_text_may_have_no_text() {
    let e = entity(DocumentType::Static, ContentType::PlainText, Resource::default());
    assert!(validate(&e).is_ok());
}

#[test]
fn empty_url_string_counts_as_absent() {
    let mut e = template_text();
    e.resource.url = Some(String::new());
    assert!(validate(&e).is_ok());
}

#[test]
fn validation_is_repeatable() {
    let e = entity(DocumentType::Static, ContentType::Image, url("ftp://x"));
    assert_eq!(validate(&e), validate(&e));
}

// ── Type, content and common fields ─────────────────────────────

#[test]
fn unknown_document_type_is_invalid_type() {
    let e = entity(DocumentType::from("DRAFT"), ContentType::PlainText, text("x"));
    assert!(matches!(err_of(&e), ModelError::InvalidType(msg) if msg.contains("DRAFT")));
}

#[test]
fn unknown_content_type_is_invalid_content() {
    let e = entity(DocumentType::Static, ContentType::from("DOCX"), text("x"));
    assert_eq!(err_of(&e), ModelError::InvalidContent("DOCX".to_string()));
}

#[test]
fn type_is_checked_before_content() {
    let e = entity(DocumentType::from("?"), ContentType::from("?"), Resource::default());
    assert!(matches!(err_of(&e), ModelError::InvalidType(_)));
}

#[test]
fn blank_name_is_invalid_field() {
    let mut e = static_text();
    e.name = "   ".to_string();
    assert!(matches!(err_of(&e), ModelError::InvalidField { field: "name", .. }));
}

#[test]
fn blank_summary_is_invalid_field() {
    let mut e = template_text();
    e.summary = "\n\t".to_string();
    assert!(matches!(err_of(&e), ModelError::InvalidField { field: "summary", .. }));
}

// ── STATIC + PLAIN_TEXT ──────────────────────────────────────────

#[test]
fn static_text_rejects_variables() {
    let e = entity(
        DocumentType::Static,
        ContentType::PlainText,
        with_vars(text("Hi {{name}}"), &["name"]),
    );
    assert_eq!(err_of(&e), ModelError::StaticCannotHaveVars);
}

#[test]
fn static_text_rejects_url() {
    let mut e = static_text();
    e.resource.url = Some("https://example.com/t.txt".to_string());
    assert_eq!(err_of(&e), ModelError::StaticCannotHaveUrl);
}

#[test]
fn static_text_reports_variables_before_url() {
    let mut e = static_text();
    e.resource.url = Some("https://example.com".to_string());
    e.resource.variables = vec!["x".to_string()];
    assert_eq!(err_of(&e), ModelError::StaticCannotHaveVars);
}

// ── STATIC + IMAGE ───────────────────────────────────────────────

#[test]
fn static_image_rejects_variables() {
    let e = entity(
        DocumentType::Static,
        ContentType::Image,
        with_vars(url("https://cdn.example.com/a.png"), &["v"]),
    );
    assert_eq!(err_of(&e), ModelError::StaticCannotHaveVars);
}

#[test]
fn static_image_rejects_ftp_scheme() {
    let e = entity(DocumentType::Static, ContentType::Image, url("ftp://x"));
    assert!(matches!(err_of(&e), ModelError::InvalidField { field: "resource.url", .. }));
}

#[test]
fn static_image_requires_url() {
    let e = entity(DocumentType::Static, ContentType::Image, Resource::default());
    assert!(matches!(err_of(&e), ModelError::InvalidField { field: "resource.url", .. }));
}

#[test]
fn static_image_rejects_relative_url() {
    let e = entity(DocumentType::Static, ContentType::Image, url("images/logo.png"));
    assert!(matches!(err_of(&e), ModelError::InvalidField { .. }));
}

#[test]
fn static_image_rejects_text() {
    let mut e = static_image();
    e.resource.text = Some("alt text".to_string());
    assert!(matches!(err_of(&e), ModelError::InvalidField { field: "resource.text", .. }));
}

// ── TEMPLATE + PLAIN_TEXT ────────────────────────────────────────

#[test]
fn template_text_without_any_source() {
    let e = entity(
        DocumentType::Template,
        ContentType::PlainText,
        Resource {
            text: Some(String::new()),
            url: Some(String::new()),
            variables: vec![],
        },
    );
    assert_eq!(err_of(&e), ModelError::TemplateMustHaveSource("text"));
}

#[test]
fn template_text_rejects_url() {
    let mut e = template_text();
    e.resource.url = Some("https://example.com/t".to_string());
    assert_eq!(err_of(&e), ModelError::TemplateCannotHaveUrl);
}

#[test]
fn template_text_without_variables_is_fine() {
    let e = entity(DocumentType::Template, ContentType::PlainText, text("no tokens here"));
    assert!(validate(&e).is_ok());
}

// ── TEMPLATE + PDF / HTML ────────────────────────────────────────

#[test]
fn template_file_requires_url() {
    for content in [ContentType::Pdf, ContentType::Html] {
        let e = entity(DocumentType::Template, content, Resource::default());
        assert_eq!(err_of(&e), ModelError::TemplateMustHaveSource("url"));
    }
}

#[test]
fn template_file_rejects_malformed_url() {
    for bad in ["not a url", "file:///etc/passwd", "s3://bucket/key", "http://"] {
        let e = entity(DocumentType::Template, ContentType::Html, url(bad));
        assert!(
            matches!(err_of(&e), ModelError::InvalidField { .. }),
            "expected InvalidField for {bad:?}"
        );
    }
}

#[test]
fn template_file_rejects_text() {
    let mut e = template_file(ContentType::Pdf);
    e.resource.text = Some("inline".to_string());
    assert_eq!(err_of(&e), ModelError::TemplateCannotHaveText);
}

// ── Unsupported combinations ─────────────────────────────────────

#[test]
fn unsupported_pairs_are_invalid_type_whatever_the_resource() {
    let resources = [
        Resource::default(),
        text("hello"),
        url("https://example.com/doc.pdf"),
        with_vars(url("https://example.com"), &["a"]),
    ];
    let pairs = [
        (DocumentType::Static, ContentType::Pdf),
        (DocumentType::Static, ContentType::Html),
        (DocumentType::Template, ContentType::Image),
    ];
    for (doc_type, content) in pairs {
        for resource in resources.clone() {
            let e = entity(doc_type.clone(), content.clone(), resource);
            assert!(matches!(err_of(&e), ModelError::InvalidType(_)));
        }
    }
}

#[test]
fn client_errors_are_not_server_faults() {
    let e = entity(DocumentType::Static, ContentType::Pdf, Resource::default());
    assert!(!err_of(&e).is_server_fault());
}
