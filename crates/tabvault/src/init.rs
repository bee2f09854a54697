//! # Context Construction
//!
//! Clients call [`initialize`] once to get an [`EditorContext`]: the loaded
//! configuration, the resolved directories and an [`EditorApi`] over a
//! [`FileStore`].
//!
//! ## Data Directory Resolution
//!
//! First match wins:
//!
//! 1. `data_override` (the CLI's `--data`)
//! 2. `TABVAULT_DATA` environment variable, mostly for tests
//! 3. `data_dir` from [`EditorConfig`]
//! 4. The OS data directory via `directories`
//!
//! The directory is created lazily by the store on first write, so read-only
//! commands against a fresh location leave no trace.

use crate::api::EditorApi;
use crate::config::{default_config_path, EditorConfig};
use crate::error::{Result, TabvaultError};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

pub struct EditorContext {
    pub api: EditorApi<FileStore>,
    pub config: EditorConfig,
    pub data_dir: PathBuf,
    pub backup_dir: PathBuf,
}

pub fn initialize(data_override: Option<PathBuf>) -> Result<EditorContext> {
    let config_path = default_config_path();
    let config = EditorConfig::load(config_path.as_deref())?;

    let env_data = std::env::var("TABVAULT_DATA").ok().map(PathBuf::from);
    let data_dir = resolve_data_dir(data_override, env_data, &config)?;
    let backup_dir = config.backup_dir();
    debug!(
        data_dir = %data_dir.display(),
        backup_dir = %backup_dir.display(),
        "Initialized context"
    );

    let api = EditorApi::new(FileStore::new(data_dir.clone()));
    Ok(EditorContext {
        api,
        config,
        data_dir,
        backup_dir,
    })
}

fn resolve_data_dir(
    data_override: Option<PathBuf>,
    env_data: Option<PathBuf>,
    config: &EditorConfig,
) -> Result<PathBuf> {
    if let Some(dir) = data_override.or(env_data).or_else(|| config.data_dir.clone()) {
        return Ok(dir);
    }
    ProjectDirs::from("org", "tabvault", "tabvault")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| TabvaultError::Config("Could not determine data directory".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_data(dir: &str) -> EditorConfig {
        EditorConfig {
            data_dir: Some(PathBuf::from(dir)),
            ..Default::default()
        }
    }

    #[test]
    fn test_override_wins() {
        let dir = resolve_data_dir(
            Some(PathBuf::from("/cli")),
            Some(PathBuf::from("/env")),
            &config_with_data("/config"),
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("/cli"));
    }

    #[test]
    fn test_env_before_config() {
        let dir = resolve_data_dir(
            None,
            Some(PathBuf::from("/env")),
            &config_with_data("/config"),
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("/env"));
    }

    #[test]
    fn test_config_before_os_default() {
        let dir = resolve_data_dir(None, None, &config_with_data("/config")).unwrap();
        assert_eq!(dir, PathBuf::from("/config"));
    }
}
