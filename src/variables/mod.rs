//! Template variables.
//!
//! Variables are declared as `--var` specifications, resolved once per
//! invocation from literal text, files or stdin, and substituted into the
//! template's `{{name}}` placeholders.

pub mod error;
pub mod resolver;
pub mod spec;
pub mod substitution;

pub use error::VariableError;
pub use resolver::VariableResolver;
pub use spec::{VariableKind, VariableSpec, STDIN_SENTINEL};
pub use substitution::{substitute_str, substitute_template, substitute_value};

use std::collections::BTreeMap;

/// Resolved variable values keyed by name.
pub type Bindings = BTreeMap<String, String>;

/// Binding name that receives the resolved API key.
pub const API_KEY_VARIABLE: &str = "api_key";
