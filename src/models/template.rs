//! Template data models.
//!
//! A template describes one HTTP API invocation: where to send it, which
//! headers and JSON body to use, and how to pull the result text out of the
//! response. Any string in the request may contain `{{name}}` placeholders
//! that are filled in at invocation time.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// HTTP method used when a template does not name one.
pub const DEFAULT_METHOD: &str = "POST";

/// Response path used when a template does not name one (chat-completion style).
pub const DEFAULT_RESPONSE_PATH: &str = "choices[0].message.content";

/// The unit of configuration for one API call.
///
/// Templates are loaded from JSON. `title`, `description`, `api_document` and
/// `instructions` are documentation for humans and play no part in execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Provider identifier (e.g. "deepseek", "openai", "ollama").
    ///
    /// Also used to look up provider-specific API keys.
    #[serde(default)]
    pub provider: String,

    /// Optional human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional longer description of what the template does.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Link to the provider's API documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_document: Option<String>,

    /// Usage notes for whoever fills in the variables.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<String>,

    /// The HTTP request to issue.
    #[serde(default)]
    pub request: RequestConfig,

    /// How to extract the result from the response.
    #[serde(default)]
    pub response: ResponseConfig,
}

/// HTTP request section of a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Target URL. May contain placeholders.
    #[serde(default)]
    pub url: String,

    /// HTTP method. Empty means [`DEFAULT_METHOD`].
    #[serde(default)]
    pub method: String,

    /// Request headers. Values may contain placeholders; names are used as-is.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    /// JSON request body. Any string leaf may contain placeholders.
    ///
    /// `None` when the template omits the body or sets it to `null`.
    #[serde(default)]
    pub body: Option<Value>,
}

/// Response extraction section of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseConfig {
    /// Dot/bracket path to the result, e.g. `choices[0].message.content`.
    #[serde(default)]
    pub path: String,

    /// Try the known response shapes before falling back to `path`.
    #[serde(default)]
    pub auto_detect: bool,

    /// Top-level field to prefer during auto-detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_field_name: Option<String>,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_RESPONSE_PATH.to_string(),
            auto_detect: false,
            response_field_name: None,
        }
    }
}

impl ResponseConfig {
    /// Creates a config that navigates `path` without auto-detection.
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

impl Template {
    /// Fills in the method and response path when they are missing or empty.
    pub fn apply_defaults(&mut self) {
        if self.request.method.trim().is_empty() {
            self.request.method = DEFAULT_METHOD.to_string();
        }
        if self.response.path.trim().is_empty() {
            self.response.path = DEFAULT_RESPONSE_PATH.to_string();
        }
    }

    /// Returns the first missing required field, checked in the order
    /// `provider`, `request.url`, `request.body`.
    ///
    /// # Returns
    ///
    /// `None` if the template is complete, otherwise the dotted field name.
    pub fn missing_required_field(&self) -> Option<&'static str> {
        if self.provider.is_empty() {
            return Some("provider");
        }
        if self.request.url.is_empty() {
            return Some("request.url");
        }
        match &self.request.body {
            None | Some(Value::Null) => Some("request.body"),
            Some(_) => None,
        }
    }

    /// Returns the request body, or `Value::Null` for an unvalidated template.
    pub fn body(&self) -> &Value {
        self.request.body.as_ref().unwrap_or(&Value::Null)
    }
}
