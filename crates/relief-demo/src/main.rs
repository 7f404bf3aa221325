//! Command-line terrain generator.
//!
//! Loads `config.ron` (creating it on first run), applies CLI overrides,
//! generates a height field, builds the terrain mesh, and writes the
//! configured exports. Run with `cargo run -p relief-demo -- --seed 42`.

mod error;
mod export;
mod pipeline;

use std::process::ExitCode;

use clap::Parser;
use relief_config::{CliArgs, Config, default_config_dir};
use relief_mesh::BiomeColorizer;
use tracing::{error, info};

use crate::error::DemoError;

fn run(config: &Config) -> Result<(), DemoError> {
    config.validate()?;

    let seed = config.terrain.seed.unwrap_or_else(pipeline::clock_seed);
    let field = pipeline::generate(config, seed)?;
    let mesh = pipeline::build(config, &field)?;

    let export = &config.export;
    if let Some(path) = export.resolve(&export.heightmap_png) {
        export::write_heightmap_png(&field, &path)?;
    }
    if let Some(path) = export.resolve(&export.preview_png) {
        let colorizer = BiomeColorizer::new(config.biomes);
        export::write_preview_png(&field, &colorizer, &path)?;
    }
    if let Some(path) = export.resolve(&export.obj) {
        export::write_obj_file(&mesh.buffer, &path)?;
    }

    info!(
        seed,
        vertices = mesh.buffer.vertex_count(),
        triangles = mesh.buffer.triangle_count(),
        trees = mesh.tree_count,
        "Done"
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    relief_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Terrain pipeline failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_writes_all_exports() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.terrain.width = 24;
        config.terrain.height = 24;
        config.terrain.seed = Some(3);
        config.export.output_dir = dir.path().to_path_buf();

        run(&config).unwrap();
        for name in ["heightmap.png", "preview.png", "terrain.obj"] {
            assert!(dir.path().join(name).exists(), "{name} missing");
        }
    }

    #[test]
    fn test_run_skips_disabled_exports() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.terrain.width = 8;
        config.terrain.height = 8;
        config.terrain.seed = Some(1);
        config.export.output_dir = dir.path().to_path_buf();
        config.export.heightmap_png = None;
        config.export.obj = None;

        run(&config).unwrap();
        assert!(!dir.path().join("heightmap.png").exists());
        assert!(dir.path().join("preview.png").exists());
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let mut config = Config::default();
        config.terrain.height = 0;
        assert!(matches!(run(&config), Err(DemoError::Config(_))));
    }
}
