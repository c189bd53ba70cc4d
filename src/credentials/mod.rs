//! API key resolution.
//!
//! The key for a template is looked up in priority order:
//!
//! 1. An explicit override (`--api-key`)
//! 2. The secrets file: `<provider>_api_key`, then `api_key`, then `default_api_key`
//! 3. The environment: `<PROVIDER>_API_KEY`, then `API_KEY`
//!
//! Empty values are skipped at every step. Finding no key is not an error:
//! the result is simply empty and no `api_key` binding is made.

pub mod dotenv;

pub use dotenv::{find_dotenv_file, load_dotenv, parse_dotenv};

use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Generic secrets-file keys tried after the provider-specific one.
const GENERIC_SECRET_KEYS: &[&str] = &["api_key", "default_api_key"];

/// Generic environment variable tried after the provider-specific one.
const GENERIC_ENV_KEY: &str = "API_KEY";

/// A read-only view of environment variables.
///
/// Built once per invocation: `.env` entries first, then the process
/// environment on top, so process variables win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: Vec<(String, String)>,
}

impl EnvSnapshot {
    /// Captures the process environment layered over the nearest `.env` file.
    pub fn capture() -> Self {
        let dotenv = std::env::current_dir()
            .map(|dir| load_dotenv(&dir))
            .unwrap_or_default();
        Self::layered(dotenv, std::env::vars())
    }

    /// Builds a snapshot from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Layers `upper` over `lower`; on an exact name clash `upper` wins.
    pub fn layered<L, U>(lower: L, upper: U) -> Self
    where
        L: IntoIterator<Item = (String, String)>,
        U: IntoIterator<Item = (String, String)>,
    {
        let upper: Vec<(String, String)> = upper.into_iter().collect();
        let mut vars: Vec<(String, String)> = lower
            .into_iter()
            .filter(|(name, _)| !upper.iter().any(|(upper_name, _)| upper_name == name))
            .collect();
        // Upper entries first so they are found first by a case-insensitive scan.
        let mut layered = upper;
        layered.append(&mut vars);
        Self { vars: layered }
    }

    /// Returns the non-empty value of `name`, matching exactly first and then
    /// case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        let non_empty = |(_, value): &&(String, String)| !value.is_empty();

        self.vars
            .iter()
            .filter(non_empty)
            .find(|(key, _)| key == name)
            .or_else(|| {
                self.vars
                    .iter()
                    .filter(non_empty)
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
            })
            .map(|(_, value)| value.as_str())
    }
}

/// Resolves the API key for `provider`.
///
/// # Arguments
///
/// * `provider` - Template provider, used for the provider-specific names
/// * `override_key` - Explicit key; wins when non-empty
/// * `secret_file` - Optional JSON secrets file
/// * `env` - Environment snapshot
///
/// # Returns
///
/// The first non-empty key found, or an empty string.
pub fn resolve_api_key(
    provider: &str,
    override_key: Option<&str>,
    secret_file: Option<&Path>,
    env: &EnvSnapshot,
) -> String {
    if let Some(key) = override_key.filter(|key| !key.is_empty()) {
        debug!("using API key from command line");
        return key.to_string();
    }

    if let Some(key) = secret_file.and_then(|path| key_from_secrets_file(path, provider)) {
        return key;
    }

    if let Some(key) = key_from_env(env, provider) {
        return key;
    }

    debug!("no API key found for provider '{}'", provider);
    String::new()
}

fn key_from_secrets_file(path: &Path, provider: &str) -> Option<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("skipping secrets file {}: {}", path.display(), e);
            return None;
        }
    };

    let secrets: HashMap<String, Value> = match serde_json::from_str(&content) {
        Ok(secrets) => secrets,
        Err(e) => {
            debug!("skipping unparseable secrets file {}: {}", path.display(), e);
            return None;
        }
    };

    let provider_key = (!provider.is_empty()).then(|| format!("{}_api_key", provider));
    let candidates = provider_key
        .iter()
        .map(String::as_str)
        .chain(GENERIC_SECRET_KEYS.iter().copied());

    for name in candidates {
        if let Some(key) = secrets
            .get(name)
            .and_then(Value::as_str)
            .filter(|key| !key.is_empty())
        {
            debug!("using API key '{}' from {}", name, path.display());
            return Some(key.to_string());
        }
    }

    None
}

fn key_from_env(env: &EnvSnapshot, provider: &str) -> Option<String> {
    let provider_var = (!provider.is_empty()).then(|| format!("{}_API_KEY", provider.to_uppercase()));
    let candidates = provider_var
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(GENERIC_ENV_KEY));

    for name in candidates {
        if let Some(key) = env.get(name) {
            debug!("using API key from environment variable {}", name);
            return Some(key.to_string());
        }
    }

    None
}
