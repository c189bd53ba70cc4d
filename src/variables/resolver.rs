//! Resolution of variable values from their sources.

use super::{Bindings, VariableError, VariableKind, VariableSpec};
use log::debug;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// Resolves parsed variable specifications into name/value bindings.
///
/// The resolver owns the input stream used for `-` values. The stream is read
/// to the end the first time it is needed; later `-` values read the exhausted
/// stream and resolve to an empty string.
pub struct VariableResolver<R> {
    stdin: R,
}

impl VariableResolver<io::Stdin> {
    /// Creates a resolver that reads `-` values from the process stdin.
    pub fn from_stdin() -> Self {
        Self::new(io::stdin())
    }
}

impl<R: Read> VariableResolver<R> {
    pub fn new(stdin: R) -> Self {
        Self { stdin }
    }

    /// Parses and resolves every specification in declaration order.
    ///
    /// # Arguments
    ///
    /// * `specs` - Raw `--var` values
    ///
    /// # Returns
    ///
    /// The bindings, where a repeated name keeps its last value, or the first
    /// error encountered.
    pub fn resolve_all<S: AsRef<str>>(&mut self, specs: &[S]) -> Result<Bindings, VariableError> {
        let mut bindings = Bindings::new();
        for raw in specs {
            let spec = VariableSpec::parse(raw.as_ref())?;
            let value = self.resolve(&spec)?;
            bindings.insert(spec.name, value);
        }
        Ok(bindings)
    }

    /// Resolves a single specification to its text value.
    pub fn resolve(&mut self, spec: &VariableSpec) -> Result<String, VariableError> {
        debug!(
            "resolving variable '{}' ({}{})",
            spec.name,
            spec.kind,
            if spec.reads_stdin() { ", stdin" } else { "" }
        );

        match spec.kind {
            VariableKind::Text if spec.reads_stdin() => self.read_stdin(&spec.name),
            VariableKind::Text => Ok(spec.source.clone()),
            VariableKind::File if spec.reads_stdin() => self.read_stdin(&spec.name),
            VariableKind::File => read_file(&spec.name, &spec.source),
        }
    }

    fn read_stdin(&mut self, name: &str) -> Result<String, VariableError> {
        let mut bytes = Vec::new();
        self.stdin
            .read_to_end(&mut bytes)
            .map_err(|source| VariableError::Stdin {
                name: name.to_string(),
                source,
            })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn read_file(name: &str, path: &str) -> Result<String, VariableError> {
    if path.is_empty() {
        return Err(VariableError::EmptyFilePath {
            name: name.to_string(),
        });
    }

    let bytes = fs::read(path).map_err(|source| VariableError::FileRead {
        name: name.to_string(),
        path: PathBuf::from(path),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
