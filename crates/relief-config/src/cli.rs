//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Relief terrain generator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "relief", about = "Procedural terrain height fields and meshes")]
pub struct CliArgs {
    /// Grid width in samples.
    #[arg(long)]
    pub width: Option<usize>,

    /// Grid height in samples.
    #[arg(long)]
    pub height: Option<usize>,

    /// Generator seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Noise scale in grid cells per lattice unit.
    #[arg(long)]
    pub scale: Option<f64>,

    /// Number of fractal octaves.
    #[arg(long)]
    pub octaves: Option<u32>,

    /// Mesh level-of-detail step.
    #[arg(long)]
    pub lod_step: Option<u32>,

    /// Water level in normalized height.
    #[arg(long)]
    pub water_level: Option<f32>,

    /// Emit trees.
    #[arg(long)]
    pub trees: Option<bool>,

    /// Directory exports are written to.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.terrain.width = w;
        }
        if let Some(h) = args.height {
            self.terrain.height = h;
        }
        if let Some(seed) = args.seed {
            self.terrain.seed = Some(seed);
        }
        if let Some(scale) = args.scale {
            self.terrain.fractal.scale = scale;
        }
        if let Some(octaves) = args.octaves {
            self.terrain.fractal.octaves = octaves;
        }
        if let Some(lod) = args.lod_step {
            self.mesh.lod_step = lod;
        }
        if let Some(level) = args.water_level {
            self.shoreline.water_level = level;
        }
        if let Some(enabled) = args.trees {
            self.trees.enabled = enabled;
        }
        if let Some(ref dir) = args.output {
            self.export.output_dir = dir.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
