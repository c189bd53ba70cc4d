//! Best-effort detection of known response shapes.
//!
//! Providers wrap the generated text differently. [`RESPONSE_SHAPES`] lists
//! the shapes we recognise, in the order they are probed; the first shape
//! that yields a string wins.

use serde_json::{Map, Value};

/// A recognised response layout and how to pull the text out of it.
pub struct ResponseShape {
    pub name: &'static str,
    pub extract: fn(&Map<String, Value>) -> Option<String>,
}

/// Known response shapes, in probe order.
pub static RESPONSE_SHAPES: &[ResponseShape] = &[
    ResponseShape {
        name: "response",
        extract: top_level_response,
    },
    ResponseShape {
        name: "chat_completion",
        extract: chat_completion,
    },
    ResponseShape {
        name: "legacy_completion",
        extract: legacy_completion,
    },
    ResponseShape {
        name: "content",
        extract: top_level_content,
    },
    ResponseShape {
        name: "completion",
        extract: top_level_completion,
    },
    ResponseShape {
        name: "generations",
        extract: generations,
    },
    ResponseShape {
        name: "content_blocks",
        extract: content_blocks,
    },
];

/// Outcome of a successful detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detected {
    /// Name of the shape that matched, or `"response_field_name"` for the hint.
    pub shape: &'static str,
    pub text: String,
}

/// Tries the field hint, then every entry of [`RESPONSE_SHAPES`].
///
/// Returns `None` when nothing matches.
pub fn auto_detect(document: &Map<String, Value>, field_hint: Option<&str>) -> Option<Detected> {
    if let Some(text) = field_hint.and_then(|field| string_field(document, field)) {
        return Some(Detected {
            shape: "response_field_name",
            text,
        });
    }

    RESPONSE_SHAPES.iter().find_map(|shape| {
        (shape.extract)(document).map(|text| Detected {
            shape: shape.name,
            text,
        })
    })
}

fn string_field(object: &Map<String, Value>, field: &str) -> Option<String> {
    object.get(field)?.as_str().map(str::to_string)
}

/// First element of a non-empty array field, as an object.
fn first_object<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a Map<String, Value>> {
    object.get(field)?.as_array()?.first()?.as_object()
}

// Ollama /api/generate: {"response": "..."}
fn top_level_response(doc: &Map<String, Value>) -> Option<String> {
    string_field(doc, "response")
}

// OpenAI-compatible chat: {"choices": [{"message": {"content": "..."}}]}
fn chat_completion(doc: &Map<String, Value>) -> Option<String> {
    let message = first_object(doc, "choices")?.get("message")?.as_object()?;
    string_field(message, "content")
}

// {"choices": [{"text": "..."}]}
fn legacy_completion(doc: &Map<String, Value>) -> Option<String> {
    string_field(first_object(doc, "choices")?, "text")
}

fn top_level_content(doc: &Map<String, Value>) -> Option<String> {
    string_field(doc, "content")
}

fn top_level_completion(doc: &Map<String, Value>) -> Option<String> {
    string_field(doc, "completion")
}

// Cohere: {"generations": [{"text": "..."}]}
fn generations(doc: &Map<String, Value>) -> Option<String> {
    string_field(first_object(doc, "generations")?, "text")
}

// Anthropic messages: {"content": [{"type": "text", "text": "..."}]}
fn content_blocks(doc: &Map<String, Value>) -> Option<String> {
    string_field(first_object(doc, "content")?, "text")
}
