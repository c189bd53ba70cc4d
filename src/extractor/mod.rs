//! Response extraction.
//!
//! Turns a raw response body into the single result string, either by
//! navigating the template's `response.path` or, when `response.auto_detect`
//! is set, by first trying the known response shapes in [`detect`].
//!
//! # Fallback
//!
//! With auto-detection enabled, a body that matches no known shape (or
//! fails to parse) is handed to path navigation, and the path error is the
//! one reported.
//!
//! # Examples
//!
//! ```
//! use llm_caller::extractor::extract;
//! use llm_caller::models::ResponseConfig;
//!
//! let body = br#"{"choices":[{"message":{"content":"hi"}}]}"#;
//! let result = extract(body, &ResponseConfig::default()).unwrap();
//! assert_eq!(result, "hi");
//! ```

pub mod detect;
pub mod error;
pub mod path;

pub use detect::{auto_detect, Detected, ResponseShape, RESPONSE_SHAPES};
pub use error::ExtractError;

use crate::models::ResponseConfig;
use log::debug;
use serde_json::{Map, Value};

/// Extracts the result string from `raw` according to `config`.
pub fn extract(raw: &[u8], config: &ResponseConfig) -> Result<String, ExtractError> {
    if config.auto_detect {
        if let Ok(document) = parse_document(raw) {
            if let Some(detected) =
                auto_detect(&document, config.response_field_name.as_deref())
            {
                debug!("auto-detected response shape '{}'", detected.shape);
                return Ok(detected.text);
            }
        }
        debug!(
            "auto-detection found no known shape, falling back to path '{}'",
            config.path
        );
    } else {
        debug!("extracting response with path '{}'", config.path);
    }

    extract_by_path(raw, &config.path)
}

/// Extracts the value at `path` from the raw JSON body.
///
/// # Arguments
///
/// * `raw` - Response body, which must be a JSON object
/// * `path` - Dot/bracket expression such as `choices[0].message.content`
///
/// # Returns
///
/// The final node rendered as text, or the first parse or navigation error.
pub fn extract_by_path(raw: &[u8], path: &str) -> Result<String, ExtractError> {
    let document = Value::Object(parse_document(raw)?);
    path::navigate(&document, path).map(path::render_value)
}

fn parse_document(raw: &[u8]) -> Result<Map<String, Value>, ExtractError> {
    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ExtractError::ResponseParseError(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
        Err(e) => Err(ExtractError::ResponseParseError(e.to_string())),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
