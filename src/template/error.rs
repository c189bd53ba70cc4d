//! Error types for template loading and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, parsing or validating a template.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The template is not valid JSON, or a field has the wrong type.
    #[error("failed to parse template JSON: {0}")]
    MalformedTemplate(String),

    /// A required field is missing or empty.
    #[error("template validation failed: {field} is required in template")]
    InvalidTemplate {
        /// Dotted name of the missing field (`provider`, `request.url`, `request.body`)
        field: &'static str,
    },

    /// No template file was found in any search location.
    #[error("template file not found, tried paths: {}", format_paths(.tried))]
    NotFound {
        /// Every path that was attempted, in search order
        tried: Vec<PathBuf>,
    },

    /// A template file exists but could not be read.
    #[error("failed to load template from '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The base64-encoded template could not be decoded.
    #[error("failed to decode Base64 template: {0}")]
    InvalidBase64(String),

    /// An inline template source was given but empty.
    #[error("{0} cannot be empty")]
    EmptySource(&'static str),
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
