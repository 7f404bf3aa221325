//! Generation and meshing driven by a [`Config`].

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use relief_config::Config;
use relief_mesh::{TerrainMesh, TerrainMeshBuilder};
use relief_terrain::{HeightField, generate_heightfield};
use tracing::info;

use crate::error::DemoError;

/// Seed derived from the wall clock, for runs without a configured seed.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Generates the normalized height field for `seed`.
pub fn generate(config: &Config, seed: u64) -> Result<HeightField, DemoError> {
    let terrain = &config.terrain;
    let start = Instant::now();
    let field = generate_heightfield(terrain.width, terrain.height, &terrain.fractal, seed)?;
    let (min, max) = field.min_max();
    info!(
        width = field.width(),
        height = field.height(),
        seed,
        min,
        max,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Height field generated"
    );
    Ok(field)
}

/// Mesh builder carrying the config's mesh, shoreline, biome and tree settings.
pub fn mesh_builder(config: &Config) -> TerrainMeshBuilder {
    TerrainMeshBuilder::new(config.mesh)
        .with_shoreline(config.shoreline)
        .with_biomes(config.biomes)
        .with_trees(config.trees)
}

/// Builds (and optionally validates) the mesh for `field`.
pub fn build(config: &Config, field: &HeightField) -> Result<TerrainMesh, DemoError> {
    let start = Instant::now();
    let mesh = mesh_builder(config).build(field);
    if config.debug.validate_mesh {
        mesh.buffer.validate()?;
    }
    info!(
        terrain_triangles = mesh.terrain_triangle_count(),
        trees = mesh.tree_count,
        vertex_bytes = mesh.buffer.vertex_bytes().len(),
        index_bytes = mesh.buffer.index_bytes().len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Mesh built"
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.terrain.width = 33;
        config.terrain.height = 21;
        config
    }

    #[test]
    fn test_generation_is_seeded() {
        let config = small_config();
        let a = generate(&config, 5).unwrap();
        let b = generate(&config, 5).unwrap();
        let c = generate(&config, 6).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!((a.width(), a.height()), (33, 21));
    }

    #[test]
    fn test_build_validates() {
        let config = small_config();
        let field = generate(&config, 2).unwrap();
        let mesh = build(&config, &field).unwrap();
        assert_eq!(mesh.terrain_index_count, 6 * 32 * 20);
    }

    #[test]
    fn test_builder_carries_config() {
        let mut config = Config::default();
        config.trees.enabled = false;
        config.mesh.lod_step = 3;
        let builder = mesh_builder(&config);
        assert!(!builder.trees.enabled);
        assert_eq!(builder.mesh.lod_step, 3);
    }
}
