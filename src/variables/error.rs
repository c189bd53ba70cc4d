use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while parsing or resolving `--var` specifications.
#[derive(Error, Debug)]
pub enum VariableError {
    /// The specification is not `name:value` or `name:kind:value`, or the name
    /// is empty or contains a brace.
    #[error("invalid variable format: {0} (expected name:value or name:kind:value)")]
    MalformedVariableSpec(String),

    /// The kind is neither `text` nor `file`.
    #[error("unsupported variable type '{kind}' for variable '{name}'")]
    UnsupportedVariableKind { kind: String, name: String },

    /// A `file` variable was given an empty path.
    #[error("file path cannot be empty for variable '{name}'")]
    EmptyFilePath { name: String },

    #[error("failed to read file '{}' for variable '{name}': {source}", .path.display())]
    FileRead {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read stdin for variable '{name}': {source}")]
    Stdin {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
