//! Template parsing and validation.
//!
//! [`parse_template`] turns raw JSON into a validated [`Template`]: it
//! deserializes, applies defaults for the method and response path, and
//! checks the required fields. Locating the raw JSON (files, inline text,
//! base64) lives in [`source`].

pub mod error;
pub mod source;

pub use error::TemplateError;
pub use source::{list_templates, load_template, TemplateSource};

use crate::models::Template;

/// Parses and validates a template from raw JSON.
///
/// # Arguments
///
/// * `raw` - Template JSON text
///
/// # Returns
///
/// The validated template with defaults applied, or
/// `MalformedTemplate` / `InvalidTemplate`.
///
/// # Examples
///
/// ```
/// use llm_caller::template::parse_template;
///
/// let template = parse_template(
///     r#"{"provider":"p","request":{"url":"https://x/y","body":{"m":"{{v}}"}}}"#,
/// )
/// .unwrap();
/// assert_eq!(template.request.method, "POST");
/// assert_eq!(template.response.path, "choices[0].message.content");
/// ```
pub fn parse_template(raw: &str) -> Result<Template, TemplateError> {
    let mut template: Template = serde_json::from_str(raw)
        .map_err(|e| TemplateError::MalformedTemplate(e.to_string()))?;

    template.apply_defaults();
    validate_template(&template)?;

    Ok(template)
}

/// Checks that `provider`, `request.url` and `request.body` are present.
pub fn validate_template(template: &Template) -> Result<(), TemplateError> {
    match template.missing_required_field() {
        Some(field) => Err(TemplateError::InvalidTemplate { field }),
        None => Ok(()),
    }
}
