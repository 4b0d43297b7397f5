//! OS-specific directories for config and log files.

use std::path::{Path, PathBuf};

use crate::error::AppError;

const APP_NAME: &str = "voxmesh";

/// Where `config.ron` and `voxmesh.log` live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Holds the JSON log file.
    pub log_dir: PathBuf,
}

impl AppDirs {
    /// Resolve directories, preferring `config_override` when given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NoConfigDir`] if no override is given and the OS
    /// does not expose a configuration directory.
    pub fn resolve(config_override: Option<&Path>) -> Result<Self, AppError> {
        match config_override {
            Some(dir) => Ok(Self::with_config_dir(dir.to_path_buf())),
            None => {
                let base = dirs::config_dir().ok_or(AppError::NoConfigDir)?;
                Ok(Self::resolve_with_root(&base))
            }
        }
    }

    /// Resolve directories under `root/voxmesh`. `root` is the OS config
    /// directory in normal runs.
    pub fn resolve_with_root(root: &Path) -> Self {
        Self::with_config_dir(root.join(APP_NAME))
    }

    fn with_config_dir(config_dir: PathBuf) -> Self {
        let log_dir = config_dir.join("logs");
        Self {
            config_dir,
            log_dir,
        }
    }
}
