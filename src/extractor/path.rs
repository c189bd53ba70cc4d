//! Dot/bracket path navigation over response documents.
//!
//! A path is split on `.` into segments. A segment is either a field name
//! (`message`) or a field name followed by one or more array indices
//! (`choices[0]`, `[1]`, `matrix[0][2]`). An empty field name before an
//! index means "index the current node".

use super::ExtractError;
use serde_json::Value;

/// Maximum number of characters of the response included in error messages.
pub const MAX_RESPONSE_PREVIEW: usize = 1000;

const TRUNCATION_MARKER: &str = "... (truncated)";

/// One dot-separated component of a response path.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PathSegment<'a> {
    /// Field to navigate to first; empty means stay on the current node.
    field: &'a str,
    /// Array indices applied after the field, in order.
    indices: Vec<usize>,
}

/// Parses one segment such as `choices[0]`.
///
/// A segment without a closing bracket is treated as a plain field name.
fn parse_segment(segment: &str) -> Result<PathSegment<'_>, ExtractError> {
    let open = match segment.find('[') {
        Some(open) if segment[open..].contains(']') => open,
        _ => {
            return Ok(PathSegment {
                field: segment,
                indices: Vec::new(),
            })
        }
    };

    let field = &segment[..open];
    let mut indices = Vec::new();
    let mut rest = &segment[open..];

    while !rest.is_empty() {
        let invalid = |index: &str| ExtractError::InvalidIndex {
            index: index.to_string(),
            segment: segment.to_string(),
        };

        let inner = rest.strip_prefix('[').ok_or_else(|| invalid(rest))?;
        let close = inner.find(']').ok_or_else(|| invalid(inner))?;
        let index_str = &inner[..close];
        let index = index_str
            .parse::<usize>()
            .map_err(|_| invalid(index_str))?;

        indices.push(index);
        rest = &inner[close + 1..];
    }

    Ok(PathSegment { field, indices })
}

/// Navigates `document` along `path`.
///
/// # Arguments
///
/// * `document` - The parsed response (normally a JSON object)
/// * `path` - Dot/bracket expression such as `choices[0].message.content`
///
/// # Returns
///
/// The node at the end of the path, or the first navigation error. Error
/// paths name the portion of `path` walked so far, including the failing
/// segment.
pub fn navigate<'a>(document: &'a Value, path: &str) -> Result<&'a Value, ExtractError> {
    let mut current = document;
    let mut walked: Vec<&str> = Vec::new();

    for raw_segment in path.split('.') {
        walked.push(raw_segment);
        let segment = parse_segment(raw_segment)?;
        let path_so_far = || walked.join(".");

        if !segment.field.is_empty() || segment.indices.is_empty() {
            current = current
                .as_object()
                .and_then(|object| object.get(segment.field))
                .ok_or_else(|| ExtractError::FieldNotFound {
                    field: segment.field.to_string(),
                    path: path_so_far(),
                    response: preview_response(document),
                })?;
        }

        for index in segment.indices {
            let items = current.as_array().ok_or_else(|| ExtractError::NotAnArray {
                field: segment.field.to_string(),
                path: path_so_far(),
                response: preview_response(document),
            })?;

            current = items
                .get(index)
                .ok_or_else(|| ExtractError::IndexOutOfBounds {
                    index,
                    length: items.len(),
                    path: path_so_far(),
                    response: preview_response(document),
                })?;
        }
    }

    Ok(current)
}

/// Converts the final node of a path to the result string.
///
/// - Strings: returned as-is (without quotes)
/// - Numbers, booleans, null: converted to string
/// - Objects, arrays: serialized as compact JSON
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Pretty-prints the response for error messages, capped at
/// [`MAX_RESPONSE_PREVIEW`] characters.
pub fn preview_response(document: &Value) -> String {
    let pretty = serde_json::to_string_pretty(document).unwrap_or_else(|_| document.to_string());
    if pretty.chars().count() <= MAX_RESPONSE_PREVIEW {
        return pretty;
    }

    let mut preview: String = pretty.chars().take(MAX_RESPONSE_PREVIEW).collect();
    preview.push_str(TRUNCATION_MARKER);
    preview
}
