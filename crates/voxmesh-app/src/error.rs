//! Application error type.

use std::path::PathBuf;

use voxmesh_config::ConfigError;
use voxmesh_format::FormatError;

/// Anything that stops a `voxmesh` run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,

    /// Loading or saving `config.ron` failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading or writing the voxel file failed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The atlas output directory could not be created.
    #[error("failed to create {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Encoding or writing an atlas image failed.
    #[error("failed to save atlas {}: {source}", path.display())]
    SaveAtlas {
        /// Image file being written.
        path: PathBuf,
        /// Underlying encoder or I/O error.
        #[source]
        source: image::ImageError,
    },
}
