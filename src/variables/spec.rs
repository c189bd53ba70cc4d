//! Parsing of `--var` specifications.
//!
//! A specification is either `name:value` (a text variable) or
//! `name:kind:value`. The string is split on `:` into at most three parts,
//! so any further colons stay in the value. Names may not contain `{` or
//! `}`, since such a name could never appear inside a `{{name}}` placeholder.

use super::VariableError;
use std::fmt;

/// The literal value that means "read from standard input".
pub const STDIN_SENTINEL: &str = "-";

/// Where a variable's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// The value is used verbatim.
    Text,
    /// The value is a path whose contents become the variable's value.
    File,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableKind::Text => write!(f, "text"),
            VariableKind::File => write!(f, "file"),
        }
    }
}

/// A parsed `--var` specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSpec {
    pub name: String,
    pub kind: VariableKind,
    /// Literal text, a file path, or [`STDIN_SENTINEL`].
    pub source: String,
}

impl VariableSpec {
    /// Parses a raw specification.
    ///
    /// # Examples
    ///
    /// ```
    /// use llm_caller::variables::{VariableKind, VariableSpec};
    ///
    /// let spec = VariableSpec::parse("prompt:file:./prompt.txt").unwrap();
    /// assert_eq!(spec.name, "prompt");
    /// assert_eq!(spec.kind, VariableKind::File);
    /// assert_eq!(spec.source, "./prompt.txt");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, VariableError> {
        let parts: Vec<&str> = raw.splitn(3, ':').collect();

        let (name, kind, source) = match parts.as_slice() {
            [name, value] => (*name, VariableKind::Text, *value),
            [name, kind, value] => (*name, parse_kind(kind, name)?, *value),
            _ => return Err(VariableError::MalformedVariableSpec(raw.to_string())),
        };

        if name.is_empty() || name.contains(['{', '}']) {
            return Err(VariableError::MalformedVariableSpec(raw.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            kind,
            source: source.to_string(),
        })
    }

    /// Returns true if the value is read from standard input.
    pub fn reads_stdin(&self) -> bool {
        self.source == STDIN_SENTINEL
    }
}

fn parse_kind(kind: &str, name: &str) -> Result<VariableKind, VariableError> {
    match kind {
        "text" => Ok(VariableKind::Text),
        "file" => Ok(VariableKind::File),
        other => Err(VariableError::UnsupportedVariableKind {
            kind: other.to_string(),
            name: name.to_string(),
        }),
    }
}
