//! Optional configuration file for the strichliste CLI
//!
//! The file is looked up at an explicit `--config` path or as `config.json` /
//! `config.toml` in a short list of directories. The format follows the file
//! extension; anything that is not `.toml` is read as JSON.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name used below the config and home directories
const APP_DIR: &str = "strichliste-cli";

/// File names tried in every search directory, in order
const CANDIDATE_FILES: [&str; 2] = ["config.json", "config.toml"];

/// Defaults read from the configuration file
///
/// Configuration precedence order (highest to lowest):
///
/// 1. CLI flags (`--user`, `--api-url`)
/// 2. Environment variables (`STRICHLISTE_USER`, `STRICHLISTE_API_URL`)
/// 3. This file
/// 4. Hardcoded defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    /// Acting username
    pub user: Option<String>,

    /// Strichliste API endpoint
    pub api_url: Option<String>,

    /// Where the values were read from, if a file was found
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl ConfigFile {
    /// Load the configuration file
    ///
    /// An explicit path must exist. Without one, the first file found in
    /// [`Self::search_dirs`] is used, or empty defaults if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => Self::discover(&Self::search_dirs())
                .map_or_else(|| Ok(Self::default()), |path| Self::load_from(&path)),
        }
    }

    /// Read and parse a specific configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        };

        debug!("Loaded config file {}", path.display());
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Directories searched for a configuration file, in order
    ///
    /// `$XDG_CONFIG_HOME/strichliste-cli/` (or the platform equivalent),
    /// `$HOME/.strichliste-cli/`, then the working directory.
    #[must_use]
    pub fn search_dirs() -> Vec<PathBuf> {
        let mut search = Vec::with_capacity(3);
        if let Some(config_dir) = dirs::config_dir() {
            search.push(config_dir.join(APP_DIR));
        }
        if let Some(home_dir) = dirs::home_dir() {
            search.push(home_dir.join(format!(".{APP_DIR}")));
        }
        search.push(PathBuf::from("."));
        search
    }

    /// First existing candidate file in the given directories
    #[must_use]
    pub fn discover(dirs: &[PathBuf]) -> Option<PathBuf> {
        dirs.iter()
            .flat_map(|dir| CANDIDATE_FILES.iter().map(move |name| dir.join(name)))
            .find(|candidate| candidate.is_file())
    }
}
