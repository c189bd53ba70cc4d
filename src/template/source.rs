//! Template source resolution.
//!
//! A template can come from a named file (searched in the configured
//! template directories), from inline JSON text, or from base64-encoded JSON.
//! Whatever the origin, the raw JSON is handed to [`parse_template`].
//!
//! # Named lookup
//!
//! `.json` is appended when missing. Names that are absolute or contain a
//! path separator are read directly; bare names are searched in the user
//! template directory first and the default `~/.llm-caller/templates` second.

use super::{parse_template, TemplateError};
use crate::config::CallerConfig;
use crate::models::Template;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Where the raw template JSON comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Template name or path, e.g. `deepseek-chat` or `./my/template.json`.
    Named(String),

    /// Inline template JSON.
    Json(String),

    /// Standard base64 encoding of the template JSON.
    Base64(String),
}

impl TemplateSource {
    /// Produces the raw template JSON for this source.
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the template search directories for named lookups
    ///
    /// # Returns
    ///
    /// The raw JSON text, or an error if the source cannot be read or decoded.
    pub fn read_raw(&self, config: &CallerConfig) -> Result<String, TemplateError> {
        match self {
            TemplateSource::Named(name) => {
                let path = resolve_template_path(name, config)?;
                debug!("loading template from {}", path.display());
                fs::read_to_string(&path).map_err(|source| TemplateError::Read { path, source })
            }
            TemplateSource::Json(json) => {
                if json.is_empty() {
                    return Err(TemplateError::EmptySource("--template-json"));
                }
                Ok(json.clone())
            }
            TemplateSource::Base64(encoded) => {
                if encoded.is_empty() {
                    return Err(TemplateError::EmptySource("--template-base64"));
                }
                let bytes = STANDARD
                    .decode(encoded.trim())
                    .map_err(|e| TemplateError::InvalidBase64(e.to_string()))?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
    }
}

/// Loads, parses and validates a template from `source`.
pub fn load_template(
    source: &TemplateSource,
    config: &CallerConfig,
) -> Result<Template, TemplateError> {
    let raw = source.read_raw(config)?;
    parse_template(&raw)
}

/// Resolves a template name to an existing file path.
///
/// # Arguments
///
/// * `name` - Template name or path; `.json` is appended when missing
/// * `config` - Supplies the search directories
///
/// # Returns
///
/// The first existing path, or `NotFound` listing every attempted path.
pub fn resolve_template_path(name: &str, config: &CallerConfig) -> Result<PathBuf, TemplateError> {
    let file_name = with_json_extension(name);

    if is_direct_path(&file_name) {
        let path = PathBuf::from(&file_name);
        if path.is_file() {
            return Ok(path);
        }
        return Err(TemplateError::NotFound { tried: vec![path] });
    }

    let mut tried = Vec::new();
    for dir in config.template_search_dirs() {
        let candidate = dir.join(&file_name);
        if candidate.is_file() {
            return Ok(candidate);
        }
        tried.push(candidate);
    }

    Err(TemplateError::NotFound { tried })
}

fn with_json_extension(name: &str) -> String {
    if name.ends_with(".json") {
        name.to_string()
    } else {
        format!("{}.json", name)
    }
}

fn is_direct_path(name: &str) -> bool {
    Path::new(name).is_absolute() || name.contains('/') || name.contains('\\')
}

/// Lists the `.json` template files directly inside `dir`, sorted by name.
///
/// A missing directory yields an empty list.
pub fn list_templates(dir: &Path) -> Result<Vec<String>, TemplateError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(TemplateError::Read {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| TemplateError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.ends_with(".json") {
                names.push(name.to_string());
            }
        }
    }

    names.sort();
    Ok(names)
}
