use serde::{Deserialize, Serialize};
use std::fmt;
use stencil_types::TemplateId;

/// Whether a template is fixed content or parameterized by variables.
///
/// Values outside the known set are kept verbatim in `Unrecognized` so that a
/// payload naming an unknown type still decodes and is rejected by
/// [`validate`](crate::validate) with a precise error instead of a JSON error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    Static,
    Template,
    Unrecognized(String),
}

impl DocumentType {
    /// Every recognized document type.
    pub const ALL: [DocumentType; 2] = [DocumentType::Static, DocumentType::Template];

    /// The wire name of this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static => "STATIC",
            Self::Template => "TEMPLATE",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Parses user-typed input: surrounding whitespace is dropped and case is ignored.
    pub fn parse_lenient(input: &str) -> Self {
        Self::from(input.trim().to_ascii_uppercase())
    }
}

impl From<String> for DocumentType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "STATIC" => Self::Static,
            "TEMPLATE" => Self::Template,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<&str> for DocumentType {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<DocumentType> for String {
    fn from(value: DocumentType) -> Self {
        match value {
            DocumentType::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoding of the underlying template content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    PlainText,
    Html,
    Pdf,
    Image,
    Unrecognized(String),
}

impl ContentType {
    /// Every recognized content type.
    pub const ALL: [ContentType; 4] = [
        ContentType::PlainText,
        ContentType::Html,
        ContentType::Pdf,
        ContentType::Image,
    ];

    /// The wire name of this content type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::PlainText => "PLAIN_TEXT",
            Self::Html => "HTML",
            Self::Pdf => "PDF",
            Self::Image => "IMAGE",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Content whose bytes are UTF-8 text that may carry placeholders.
    pub fn is_text_like(&self) -> bool {
        matches!(self, Self::PlainText | Self::Html)
    }

    /// MIME type recorded alongside uploaded bytes.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::PlainText => "text/plain; charset=utf-8",
            Self::Html => "text/html; charset=utf-8",
            Self::Pdf => "application/pdf",
            Self::Image | Self::Unrecognized(_) => "application/octet-stream",
        }
    }

    /// Parses user-typed input: surrounding whitespace is dropped and case is ignored.
    pub fn parse_lenient(input: &str) -> Self {
        Self::from(input.trim().to_ascii_uppercase())
    }
}

impl From<String> for ContentType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PLAIN_TEXT" => Self::PlainText,
            "HTML" => Self::Html,
            "PDF" => Self::Pdf,
            "IMAGE" => Self::Image,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<&str> for ContentType {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<ContentType> for String {
    fn from(value: ContentType) -> Self {
        match value {
            ContentType::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inline text, external reference and placeholder variables of a template.
///
/// `variables` is never absent: an empty list means "no variables".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub variables: Vec<String>,
}

impl Resource {
    /// The URL, unless absent or empty.
    pub fn url(&self) -> Option<&str> {
        non_empty(self.url.as_deref())
    }

    /// The inline text, unless absent or empty.
    pub fn text(&self) -> Option<&str> {
        non_empty(self.text.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// A reusable content template as handed to and returned from persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntity {
    /// Assigned by the persistence layer on insert; `None` for candidates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TemplateId>,
    pub name: String,
    pub summary: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub content: ContentType,
    #[serde(default)]
    pub resource: Resource,
}

impl TemplateEntity {
    /// Runs the validation rules against this entity.
    pub fn validate(&self) -> crate::ModelResult<()> {
        crate::validate(self)
    }
}
