//! Placeholder substitution for templates.
//!
//! Replaces `{{name}}` placeholders with bound values in the request URL,
//! header values and every string leaf of the JSON body. Substitution is a
//! single left-to-right scan of the original text: inserted values are never
//! rescanned, and placeholders without a binding are left exactly as written.

use super::Bindings;
use crate::models::Template;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::borrow::Cow;

/// Cached regex pattern for matching `{{name}}`.
static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("Failed to compile placeholder regex"));

/// Substitutes bound placeholders in a single string.
///
/// The name between the braces is matched exactly, without trimming. A bound
/// name containing `{` or `}` never matches; `--var` parsing rejects such names.
///
/// # Examples
///
/// ```
/// use llm_caller::variables::{substitute_str, Bindings};
///
/// let mut bindings = Bindings::new();
/// bindings.insert("lang".to_string(), "Rust".to_string());
///
/// assert_eq!(substitute_str("Write {{lang}} {{other}}", &bindings), "Write Rust {{other}}");
/// ```
pub fn substitute_str(text: &str, bindings: &Bindings) -> String {
    // Fast path: nothing to replace
    if bindings.is_empty() || !text.contains("{{") {
        return text.to_string();
    }

    let replaced: Cow<'_, str> = PLACEHOLDER_REGEX.replace_all(text, |caps: &Captures<'_>| {
        match bindings.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        }
    });
    replaced.into_owned()
}

/// Substitutes placeholders in every string leaf of a JSON value.
///
/// Objects and arrays are walked recursively. Object keys and non-string
/// scalars are left untouched.
pub fn substitute_value(value: &Value, bindings: &Bindings) -> Value {
    match value {
        Value::String(s) => Value::String(substitute_str(s, bindings)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| substitute_value(item, bindings))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), substitute_value(item, bindings)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Produces a new template with placeholders resolved.
///
/// # Arguments
///
/// * `template` - A validated template
/// * `bindings` - Resolved variable values
///
/// # Returns
///
/// A copy of `template` with `request.url`, header values and body string
/// leaves substituted. Everything else is carried over unchanged.
pub fn substitute_template(template: &Template, bindings: &Bindings) -> Template {
    let mut substituted = template.clone();

    substituted.request.url = substitute_str(&template.request.url, bindings);
    substituted.request.headers = template
        .request
        .headers
        .iter()
        .map(|(name, value)| (name.clone(), substitute_str(value, bindings)))
        .collect();
    substituted.request.body = template
        .request
        .body
        .as_ref()
        .map(|body| substitute_value(body, bindings));

    substituted
}
