//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// voxmesh command-line arguments.
///
/// Flags override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "voxmesh", about = "Mesh palette-compressed voxel files")]
pub struct CliArgs {
    /// Voxel file to load.
    pub input: PathBuf,

    /// Directory to save per-chunk atlas images into.
    #[arg(long)]
    pub atlas_dir: Option<PathBuf>,

    /// Rewrite the input file in the current format version.
    #[arg(long)]
    pub write_back: bool,

    /// Atlas UV inset (0.0 - 1.0).
    #[arg(long)]
    pub uv_inset: Option<f32>,

    /// Drop geometry for voxels whose palette id has no payload.
    #[arg(long)]
    pub skip_unresolved: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    ///
    /// Switch flags only ever turn a setting on.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref dir) = args.atlas_dir {
            self.output.atlas_dir = Some(dir.clone());
        }
        if args.write_back {
            self.output.write_back = true;
        }
        if let Some(inset) = args.uv_inset {
            self.mesher.uv_inset = inset;
        }
        if args.skip_unresolved {
            self.mesher.skip_unresolved = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
