//! # Configuration
//!
//! Loaded with [`confique`] from a TOML file and environment variables.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `TABVAULT_DATA_DIR`, `TABVAULT_BACKUP_DIR`,
//!    `TABVAULT_SKIP_DUPLICATES`
//! 2. **Config file**: `tabvault.toml` in the OS config directory (via
//!    `directories`), or the file named by `TABVAULT_CONFIG`
//! 3. **Compiled defaults**: `#[config(default = ...)]`
//!
//! A missing config file is not an error.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir | Where `documents.json` lives |
//! | `backup_dir` | current dir | Where `export` writes backups |
//! | `skip_duplicates` | `true` | Skip backup records whose name already exists |

use crate::error::{Result, TabvaultError};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "tabvault.toml";

/// Configuration for tabvault, stored in `tabvault.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Directory holding the document store.
    #[config(env = "TABVAULT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory backups are exported into.
    #[config(env = "TABVAULT_BACKUP_DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Default for import: skip records whose name is already in the store.
    #[config(env = "TABVAULT_SKIP_DUPLICATES", default = true)]
    pub skip_duplicates: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            backup_dir: None,
            skip_duplicates: true,
        }
    }
}

impl EditorConfig {
    /// Environment over `path` (when given) over defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = EditorConfig::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| TabvaultError::Config(e.to_string()))
    }

    /// The file alone, ignoring the environment.
    pub fn from_file(path: &Path) -> Result<Self> {
        EditorConfig::builder()
            .file(path)
            .load()
            .map_err(|e| TabvaultError::Config(e.to_string()))
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.backup_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// `TABVAULT_CONFIG` if set, else `tabvault.toml` in the OS config directory.
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("TABVAULT_CONFIG") {
        return Some(PathBuf::from(path));
    }
    ProjectDirs::from("org", "tabvault", "tabvault").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
