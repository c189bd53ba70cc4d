//! `.env` file support.
//!
//! A `.env` file in the working directory (or up to 3 parent directories)
//! supplies fallback environment variables. Lines are `KEY=VALUE`; blank
//! lines and `#` comments are skipped, and matching single or double quotes
//! around the value are removed.

use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Number of parent directories searched above the start directory.
const MAX_PARENT_DIRS: usize = 3;

/// Finds the nearest `.env` file starting at `start_dir`.
pub fn find_dotenv_file(start_dir: &Path) -> Option<PathBuf> {
    let mut search_dir = Some(start_dir);

    for _ in 0..=MAX_PARENT_DIRS {
        let dir = search_dir?;
        let env_path = dir.join(".env");
        if env_path.is_file() {
            return Some(env_path);
        }
        search_dir = dir.parent();
    }

    None
}

/// Parses `.env` content into key/value pairs in file order.
///
/// # Examples
///
/// ```
/// use llm_caller::credentials::parse_dotenv;
///
/// let vars = parse_dotenv("# keys\nOPENAI_API_KEY=\"sk-1\"\n");
/// assert_eq!(vars, vec![("OPENAI_API_KEY".to_string(), "sk-1".to_string())]);
/// ```
pub fn parse_dotenv(content: &str) -> Vec<(String, String)> {
    let mut vars = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            warn!("ignoring invalid .env line {}", line_num + 1);
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        vars.push((key.to_string(), strip_quotes(value.trim()).to_string()));
    }

    vars
}

fn strip_quotes(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Loads the nearest `.env` file above `start_dir`, if any.
///
/// An unreadable file is logged and treated as absent.
pub fn load_dotenv(start_dir: &Path) -> Vec<(String, String)> {
    let Some(path) = find_dotenv_file(start_dir) else {
        return Vec::new();
    };

    match fs::read_to_string(&path) {
        Ok(content) => {
            debug!("loaded .env file from {}", path.display());
            parse_dotenv(&content)
        }
        Err(e) => {
            debug!("failed to read {}: {}", path.display(), e);
            Vec::new()
        }
    }
}
