//! Configuration file support for ngimport.
//!
//! Loads optional `.ngimport/config.toml` from the project root.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::store::STORE_DIR;
use crate::types::{DEFAULT_COMPONENT_SUFFIX, DEFAULT_REFRESH_INTERVAL_SECS};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NgimportConfig {
    /// Override for the scan root; default is the directory the tool runs in.
    pub project_path: Option<PathBuf>,
    /// Seconds between automatic full rebuilds in watch mode.
    pub refresh_interval_secs: u64,
    /// File-name suffix identifying component declaration files.
    pub component_suffix: String,
}

impl Default for NgimportConfig {
    fn default() -> Self {
        Self {
            project_path: None,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            component_suffix: DEFAULT_COMPONENT_SUFFIX.to_string(),
        }
    }
}

impl NgimportConfig {
    /// Load config from `.ngimport/config.toml` in the given root directory.
    /// Returns default config if the file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(STORE_DIR).join("config.toml");
        Self::load_from_path(&config_path)
    }

    /// Load config from a specific path.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("[ngimport][warn] failed to parse {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ngimport][warn] failed to read {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Resolve the scan root: explicit CLI root wins, then the configured
    /// `project_path`, then the given fallback.
    pub fn resolve_root(&self, cli_root: Option<&Path>, fallback: &Path) -> PathBuf {
        if let Some(root) = cli_root {
            return root.to_path_buf();
        }
        if let Some(root) = &self.project_path {
            return root.clone();
        }
        fallback.to_path_buf()
    }
}
