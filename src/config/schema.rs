//! Configuration schema for llm-caller.
//!
//! This module defines the settings stored in `config.json` and the
//! validation applied after they are merged with defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-user application directory under the home directory.
pub const APP_DIR_NAME: &str = ".llm-caller";

/// Name of the configuration file inside the application directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Settings that drive template lookup and API key resolution.
///
/// A `CallerConfig` is built once at startup and handed to the components
/// that need it; nothing reads it from global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallerConfig {
    /// User template directory, searched before the default one.
    ///
    /// Unset by default. `~/` prefixes are expanded on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,

    /// JSON file mapping key names to API keys.
    ///
    /// Defaults to `<app_dir>/keys.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_file: Option<PathBuf>,

    /// Application directory (`~/.llm-caller`), resolved at load time.
    #[serde(skip)]
    pub app_dir: PathBuf,
}

impl Default for CallerConfig {
    fn default() -> Self {
        Self::with_app_dir(PathBuf::from(APP_DIR_NAME))
    }
}

impl CallerConfig {
    /// Creates the default configuration rooted at `app_dir`.
    pub fn with_app_dir(app_dir: impl Into<PathBuf>) -> Self {
        let app_dir = app_dir.into();
        Self {
            template_dir: None,
            secret_file: Some(app_dir.join("keys.json")),
            app_dir,
        }
    }

    /// Directory that holds downloaded and bundled templates.
    pub fn default_template_dir(&self) -> PathBuf {
        self.app_dir.join("templates")
    }

    /// Template directories in search order: user directory first, then the default.
    pub fn template_search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::with_capacity(2);
        if let Some(dir) = &self.template_dir {
            dirs.push(dir.clone());
        }
        dirs.push(self.default_template_dir());
        dirs
    }

    /// Path of the secrets file, if any.
    pub fn secret_file(&self) -> Option<&Path> {
        self.secret_file.as_deref()
    }

    /// Overlays settings loaded from a file onto this configuration.
    ///
    /// Only settings present in `user` replace the current values.
    pub fn merge(&self, user: &CallerConfig) -> CallerConfig {
        CallerConfig {
            template_dir: user
                .template_dir
                .clone()
                .or_else(|| self.template_dir.clone()),
            secret_file: user
                .secret_file
                .clone()
                .or_else(|| self.secret_file.clone()),
            app_dir: self.app_dir.clone(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if valid, or `Err(String)` describing the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(dir) = &self.template_dir {
            if dir.as_os_str().is_empty() {
                return Err("template_dir must not be empty".to_string());
            }
        }
        if let Some(file) = &self.secret_file {
            if file.as_os_str().is_empty() {
                return Err("secret_file must not be empty".to_string());
            }
        }
        Ok(())
    }
}
