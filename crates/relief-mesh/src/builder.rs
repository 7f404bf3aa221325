//! Terrain mesh construction: level-of-detail grid walk, shoreline
//! flattening, per-triangle biome colour, and tree scattering.

use relief_terrain::HeightField;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::biome::{BiomeBands, BiomeColorizer};
use crate::mapping::WorldMapping;
use crate::mesh_buffer::MeshBuffer;
use crate::shoreline::ShorelineParams;
use crate::tree::{TREE_INDEX_COUNT, TREE_VERTEX_COUNT, TreeParams, TreeScatter};

/// Grid sampling and world scaling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshParams {
    /// Grid step between sampled vertices. Zero is treated as one. Default: 1.
    pub lod_step: u32,
    /// Half-extent of the mesh on x and z. Default: 5.0.
    pub horizontal_scale: f32,
    /// World height of a normalized height of 1. Default: 4.0.
    pub vertical_scale: f32,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            lod_step: 1,
            horizontal_scale: 5.0,
            vertical_scale: 4.0,
        }
    }
}

impl MeshParams {
    /// The step actually used, at least 1.
    pub fn effective_lod_step(&self) -> usize {
        self.lod_step.max(1) as usize
    }
}

/// Number of reduced cells along an axis of `samples` grid points.
///
/// The last cell is clamped to the final grid line, so every sample row and
/// column at the edge of the grid is covered.
pub fn reduced_cells(samples: usize, lod_step: usize) -> usize {
    if samples < 2 {
        return 0;
    }
    (samples - 1).div_ceil(lod_step.max(1))
}

/// Output of [`TerrainMeshBuilder::build`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TerrainMesh {
    /// Terrain triangles first, then tree geometry.
    pub buffer: MeshBuffer,
    /// Number of trees appended after the terrain.
    pub tree_count: usize,
    /// Indices belonging to the terrain surface; tree indices follow.
    pub terrain_index_count: usize,
}

impl TerrainMesh {
    /// Number of terrain triangles.
    pub fn terrain_triangle_count(&self) -> usize {
        self.terrain_index_count / 3
    }
}

/// Turns a [`HeightField`] into a coloured, flat-shaded triangle mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TerrainMeshBuilder {
    /// Grid sampling and world scale.
    pub mesh: MeshParams,
    /// Water flattening.
    pub shoreline: ShorelineParams,
    /// Colour bands; the grass and rock edges also bound tree placement.
    pub biomes: BiomeBands,
    /// Tree scattering.
    pub trees: TreeParams,
}

impl TerrainMeshBuilder {
    /// A builder with default shoreline, biome and tree settings.
    pub fn new(mesh: MeshParams) -> Self {
        Self {
            mesh,
            ..Default::default()
        }
    }

    /// Replaces the shoreline parameters.
    pub fn with_shoreline(mut self, shoreline: ShorelineParams) -> Self {
        self.shoreline = shoreline;
        self
    }

    /// Replaces the biome bands.
    pub fn with_biomes(mut self, biomes: BiomeBands) -> Self {
        self.biomes = biomes;
        self
    }

    /// Replaces the tree parameters.
    pub fn with_trees(mut self, trees: TreeParams) -> Self {
        self.trees = trees;
        self
    }

    /// Builds the mesh.
    ///
    /// Each reduced cell becomes two triangles with their own vertices. A
    /// triangle is coloured from the mean of its corners' raw heights, while
    /// vertex y uses the flattened height. Grids narrower than two samples on
    /// either axis produce no terrain.
    pub fn build(&self, field: &HeightField) -> TerrainMesh {
        let lod = self.mesh.effective_lod_step();
        let (width, height) = (field.width(), field.height());
        let cols = reduced_cells(width, lod);
        let rows = reduced_cells(height, lod);

        let mapping = WorldMapping::new(
            width,
            height,
            self.mesh.horizontal_scale,
            self.mesh.vertical_scale,
            self.shoreline,
        );
        let colorizer = BiomeColorizer::new(self.biomes);
        let trees = TreeScatter::new(self.trees).scatter(field, &self.biomes, &mapping);

        let terrain_vertices = cols * rows * 6;
        let mut buffer = MeshBuffer::with_capacity(
            terrain_vertices + trees.len() * TREE_VERTEX_COUNT,
            terrain_vertices + trees.len() * TREE_INDEX_COUNT,
        );

        for cz in 0..rows {
            let z0 = cz * lod;
            let z1 = (z0 + lod).min(height - 1);
            for cx in 0..cols {
                let x0 = cx * lod;
                let x1 = (x0 + lod).min(width - 1);

                let h_tl = field.sample(x0 as i64, z0 as i64);
                let h_tr = field.sample(x1 as i64, z0 as i64);
                let h_bl = field.sample(x0 as i64, z1 as i64);
                let h_br = field.sample(x1 as i64, z1 as i64);

                let tl = mapping.position(x0, z0, h_tl);
                let tr = mapping.position(x1, z0, h_tr);
                let bl = mapping.position(x0, z1, h_bl);
                let br = mapping.position(x1, z1, h_br);

                buffer.push_triangle(
                    [tl, bl, tr],
                    colorizer.colorize((h_tl + h_bl + h_tr) / 3.0),
                );
                buffer.push_triangle(
                    [tr, bl, br],
                    colorizer.colorize((h_tr + h_bl + h_br) / 3.0),
                );
            }
        }

        let terrain_index_count = buffer.index_count();
        debug!(
            width,
            height,
            lod,
            triangles = terrain_index_count / 3,
            "Built terrain surface"
        );

        for tree in &trees {
            tree.append_to(&mut buffer);
        }

        info!(
            vertices = buffer.vertex_count(),
            indices = buffer.index_count(),
            trees = trees.len(),
            "Terrain mesh ready"
        );

        TerrainMesh {
            buffer,
            tree_count: trees.len(),
            terrain_index_count,
        }
    }
}

/// Builds a mesh with default shoreline, biome and tree settings.
pub fn build_mesh(
    field: &HeightField,
    lod_step: u32,
    horizontal_scale: f32,
    vertical_scale: f32,
) -> TerrainMesh {
    TerrainMeshBuilder::new(MeshParams {
        lod_step,
        horizontal_scale,
        vertical_scale,
    })
    .build(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::DEEP_WATER;
    use relief_terrain::{FractalParams, generate_heightfield};

    fn no_trees() -> TreeParams {
        TreeParams {
            enabled: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_four_by_four_full_detail() {
        let field = generate_heightfield(4, 4, &FractalParams::default(), 1).unwrap();
        let mesh = build_mesh(&field, 1, 5.0, 4.0);
        assert_eq!(mesh.terrain_index_count, 54);
        assert_eq!(mesh.tree_count, 0);
        assert_eq!(mesh.buffer.index_count(), 54);
        assert_eq!(mesh.buffer.vertex_count(), 54);
        assert!(mesh.buffer.validate().is_ok());
    }

    #[test]
    fn test_reduced_cell_counts() {
        assert_eq!(reduced_cells(4, 1), 3);
        assert_eq!(reduced_cells(10, 4), 3);
        assert_eq!(reduced_cells(9, 4), 2);
        assert_eq!(reduced_cells(256, 2), 128);
        assert_eq!(reduced_cells(1, 1), 0);
        assert_eq!(reduced_cells(0, 3), 0);
    }

    #[test]
    fn test_lod_step_covers_edges() {
        let field = HeightField::filled(10, 10, 0.5).unwrap();
        let mesh = TerrainMeshBuilder::new(MeshParams {
            lod_step: 4,
            ..Default::default()
        })
        .with_trees(no_trees())
        .build(&field);
        assert_eq!(mesh.terrain_index_count, 6 * 3 * 3);

        let xs: Vec<f32> = mesh.buffer.vertices.iter().map(|v| v.position[0]).collect();
        assert!(xs.iter().any(|&x| x == 5.0), "last column must be reached");
        assert!(xs.iter().all(|&x| (-5.0..=5.0).contains(&x)));
    }

    #[test]
    fn test_zero_lod_step_is_full_detail() {
        let field = HeightField::filled(5, 5, 0.5).unwrap();
        assert_eq!(build_mesh(&field, 0, 5.0, 4.0).terrain_index_count, 96);
    }

    #[test]
    fn test_degenerate_grids_have_no_terrain() {
        for (w, h) in [(1, 1), (1, 8), (8, 1)] {
            let field = HeightField::filled(w, h, 0.5).unwrap();
            let mesh = build_mesh(&field, 1, 5.0, 4.0);
            assert_eq!(mesh.terrain_index_count, 0, "{w}x{h}");
            assert!(mesh.buffer.validate().is_ok());
        }
    }

    #[test]
    fn test_triangles_are_flat_shaded() {
        let field = generate_heightfield(12, 9, &FractalParams::default(), 3).unwrap();
        let mesh = TerrainMeshBuilder::default()
            .with_trees(no_trees())
            .build(&field);
        assert_eq!(mesh.buffer.indices.len(), mesh.buffer.vertices.len());
        for (i, [a, b, c]) in mesh.buffer.triangles().enumerate() {
            assert_eq!(a.color, b.color, "triangle {i}");
            assert_eq!(a.color, c.color, "triangle {i}");
        }
    }

    #[test]
    fn test_terrain_normals_face_up() {
        let field = generate_heightfield(16, 16, &FractalParams::default(), 5).unwrap();
        let mesh = TerrainMeshBuilder::default()
            .with_trees(no_trees())
            .build(&field);
        for [a, b, c] in mesh.buffer.triangles() {
            let normal = (b.position() - a.position()).cross(c.position() - a.position());
            assert!(normal.y > 0.0);
        }
    }

    #[test]
    fn test_underwater_is_flat_but_coloured_from_raw_height() {
        let field = HeightField::filled(6, 6, 0.05).unwrap();
        let mesh = TerrainMeshBuilder::default().build(&field);
        for v in &mesh.buffer.vertices {
            assert!((v.position[1] - 0.32).abs() < 1e-5);
            assert_eq!(v.color(), DEEP_WATER);
        }
    }

    #[test]
    fn test_trees_follow_terrain_indices() {
        let field = HeightField::filled(20, 20, 0.37).unwrap();
        let mesh = TerrainMeshBuilder::default()
            .with_trees(TreeParams {
                density: 1.0,
                ..Default::default()
            })
            .build(&field);
        assert_eq!(mesh.tree_count, 64);
        assert_eq!(mesh.terrain_index_count, 6 * 19 * 19);
        assert_eq!(
            mesh.buffer.index_count(),
            mesh.terrain_index_count + 64 * TREE_INDEX_COUNT
        );
        assert_eq!(mesh.buffer.vertex_count(), 6 * 19 * 19 + 64 * TREE_VERTEX_COUNT);
        assert!(mesh.buffer.validate().is_ok());
    }

    #[test]
    fn test_build_is_deterministic() {
        let field = generate_heightfield(48, 48, &FractalParams::default(), 9).unwrap();
        let builder = TerrainMeshBuilder::default();
        assert_eq!(builder.build(&field), builder.build(&field));
    }

    #[test]
    fn test_params_missing_fields_use_defaults() {
        let params: MeshParams = ron::from_str("(lod_step: 2)").unwrap();
        assert_eq!(params.lod_step, 2);
        assert_eq!(params.horizontal_scale, 5.0);
        let trees: TreeParams = ron::from_str("(density: 0.25)").unwrap();
        assert_eq!(trees.stride, 2);
        assert!(trees.enabled);
    }
}
