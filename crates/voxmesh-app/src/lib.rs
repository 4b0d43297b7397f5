//! Library side of the `voxmesh` binary: directory resolution and the
//! load/mesh/export pipeline.

pub mod app_dirs;
pub mod error;
pub mod pipeline;

pub use app_dirs::AppDirs;
pub use error::AppError;
pub use pipeline::{ChunkReport, mesher_config, process_file};
