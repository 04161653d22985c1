//! `{{placeholder}}` discovery and substitution.

use crate::document::ContentType;
use crate::error::{ModelError, ModelResult};
use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// `{{ name }}` or `{{user.name}}`; whitespace inside the braces is ignored.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*)\s*\}\}").unwrap()
});

/// Every placeholder identifier in `text`, in order, repeats included.
pub fn placeholders(text: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Distinct placeholder identifiers in first-occurrence order.
///
/// Defined for `PLAIN_TEXT` and `HTML`. `PDF` reports
/// [`ModelError::NotImplemented`] rather than an empty list, so "no
/// variables" is never confused with "cannot look". The content type is
/// checked before the text.
pub fn extract(text: &str, content: &ContentType) -> ModelResult<Vec<String>> {
    match content {
        ContentType::PlainText | ContentType::Html => Ok(distinct(placeholders(text))),
        ContentType::Pdf => Err(ModelError::NotImplemented(
            "variable extraction from PDF content".to_string(),
        )),
        other => Err(ModelError::UnsupportedContentType(other.to_string())),
    }
}

/// Substitutes every placeholder in `text` with its binding.
///
/// Fails with [`ModelError::VariablesMismatch`] listing each unbound name
/// once, in first-occurrence order. Unused bindings are ignored.
pub fn render(text: &str, bindings: &HashMap<String, String>) -> ModelResult<String> {
    let missing = distinct(placeholders(text).filter(|name| !bindings.contains_key(*name)));
    if !missing.is_empty() {
        return Err(ModelError::VariablesMismatch { missing });
    }

    let rendered = PLACEHOLDER_RE.replace_all(text, |caps: &Captures<'_>| {
        bindings.get(&caps[1]).cloned().unwrap_or_default()
    });
    Ok(rendered.into_owned())
}

fn distinct<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}
