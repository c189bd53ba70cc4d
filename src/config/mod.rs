//! Configuration loading for llm-caller.
//!
//! Settings live in `~/.llm-caller/config.json` (or a file given with
//! `--config`). They are merged with defaults, validated, and returned as an
//! immutable [`CallerConfig`] that callers pass to the components that need it.

pub mod schema;

pub use schema::{CallerConfig, APP_DIR_NAME, CONFIG_FILE_NAME};

use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Neither `HOME` nor `USERPROFILE` is set.
    #[error("cannot determine the home directory (HOME / USERPROFILE not set)")]
    NoHomeDir,

    /// The configuration file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The merged configuration failed validation.
    #[error("invalid configuration in {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

/// Returns the current user's home directory.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

/// Returns the application directory, `~/.llm-caller`.
pub fn app_dir() -> Result<PathBuf, ConfigError> {
    home_dir()
        .map(|home| home.join(APP_DIR_NAME))
        .ok_or(ConfigError::NoHomeDir)
}

/// Expands a leading `~` or `~/` in `path` using `home`.
pub fn expand_home_path(path: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    if let Some(str_path) = path.to_str() {
        if str_path == "~" {
            return home.to_path_buf();
        }
        if let Some(rest) = str_path
            .strip_prefix("~/")
            .or_else(|| str_path.strip_prefix("~\\"))
        {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// Loads configuration for the current user.
///
/// # Arguments
///
/// * `config_path` - Explicit config file; defaults to `~/.llm-caller/config.json`
///
/// # Returns
///
/// The merged and validated configuration.
pub fn load_config(config_path: Option<&Path>) -> Result<CallerConfig, ConfigError> {
    let app_dir = app_dir()?;
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| app_dir.join(CONFIG_FILE_NAME));
    load_config_from(&app_dir, &config_path, home_dir().as_deref())
}

/// Loads configuration rooted at `app_dir` from `config_path`.
///
/// A missing file yields the defaults. A file that is not valid JSON is
/// reported as a warning and the defaults are used instead.
///
/// # Example
///
/// ```no_run
/// use llm_caller::config::load_config_from;
/// use std::path::Path;
///
/// let config = load_config_from(
///     Path::new("/home/me/.llm-caller"),
///     Path::new("/home/me/.llm-caller/config.json"),
///     Some(Path::new("/home/me")),
/// )
/// .unwrap();
/// println!("{:?}", config.template_search_dirs());
/// ```
pub fn load_config_from(
    app_dir: &Path,
    config_path: &Path,
    home: Option<&Path>,
) -> Result<CallerConfig, ConfigError> {
    let defaults = CallerConfig::with_app_dir(app_dir);

    if !config_path.is_file() {
        debug!("no config file at {}, using defaults", config_path.display());
        return Ok(defaults);
    }

    let content = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
        path: config_path.to_path_buf(),
        source,
    })?;

    let config = match serde_json::from_str::<CallerConfig>(&content) {
        Ok(user_config) => defaults.merge(&user_config),
        Err(e) => {
            warn!(
                "failed to parse {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            defaults
        }
    };

    let config = CallerConfig {
        template_dir: config
            .template_dir
            .map(|dir| expand_home_path(&dir, home)),
        secret_file: config
            .secret_file
            .map(|file| expand_home_path(&file, home)),
        app_dir: config.app_dir,
    };

    config.validate().map_err(|message| ConfigError::Invalid {
        path: config_path.to_path_buf(),
        message,
    })?;

    Ok(config)
}
