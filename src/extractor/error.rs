//! Error types for response extraction.

use thiserror::Error;

/// Errors that can occur while extracting the result from a response body.
///
/// Navigation errors carry a pretty-printed (and possibly truncated) copy of
/// the whole response so the caller can see what the API actually returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// The body is not a JSON object.
    #[error("failed to parse response JSON: {0}")]
    ResponseParseError(String),

    #[error("field '{field}' not found at path '{path}'. Response: {response}")]
    FieldNotFound {
        field: String,
        path: String,
        response: String,
    },

    #[error("field '{field}' at path '{path}' is not an array. Response: {response}")]
    NotAnArray {
        field: String,
        path: String,
        response: String,
    },

    #[error("array index {index} out of bounds (length {length}) at path '{path}'. Response: {response}")]
    IndexOutOfBounds {
        index: usize,
        length: usize,
        path: String,
        response: String,
    },

    /// A bracket segment does not hold a non-negative integer.
    #[error("invalid array index '{index}' in response path segment '{segment}'")]
    InvalidIndex { index: String, segment: String },
}
