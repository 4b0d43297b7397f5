//! The `voxmesh` command-line entry point.

use std::process::ExitCode;

use clap::Parser;
use voxmesh_app::{AppDirs, AppError, process_file};
use voxmesh_config::{CliArgs, Config};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("voxmesh: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    let dirs = AppDirs::resolve(args.config.as_deref())?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);

    voxmesh_log::init_logging(Some(&dirs.log_dir), config.debug.json_log, Some(&config));
    tracing::debug!("Config directory: {}", dirs.config_dir.display());

    let reports = process_file(&args.input, &config)?;

    let triangles: usize = reports.iter().map(|r| r.triangles).sum();
    let unresolved: usize = reports.iter().map(|r| r.unresolved_voxels).sum();
    tracing::info!(
        "Meshed {} chunk(s) from {}: {} triangles",
        reports.len(),
        args.input.display(),
        triangles
    );
    if unresolved > 0 {
        tracing::warn!("{} voxel(s) reference palette ids with no payload", unresolved);
    }
    Ok(())
}
