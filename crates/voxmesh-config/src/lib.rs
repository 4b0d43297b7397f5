//! Configuration for the voxmesh tool.
//!
//! Settings persist to disk as `config.ron`. Missing sections and fields fall
//! back to defaults, unknown fields are ignored, and command-line flags
//! override whatever was loaded.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, MesherSettings, OutputSettings};
pub use error::ConfigError;
