//! Low-poly trees scattered over the grass band.
//!
//! A tree is a square-prism trunk under three stacked square pyramids that
//! narrow toward the top. Geometry is indexed per tree and appended after
//! the terrain triangles.

use glam::Vec3;
use rand::Rng;
use relief_terrain::{HeightField, seeded_rng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::biome::BiomeBands;
use crate::mapping::WorldMapping;
use crate::mesh_buffer::MeshBuffer;
use crate::vertex::TerrainVertex;

/// Vertices in one trunk (two squares).
pub const TRUNK_VERTEX_COUNT: usize = 8;
/// Vertices in one foliage tier (square base plus apex).
pub const TIER_VERTEX_COUNT: usize = 5;
/// Foliage tiers per tree.
pub const FOLIAGE_TIERS: usize = 3;
/// Vertices appended per tree.
pub const TREE_VERTEX_COUNT: usize = TRUNK_VERTEX_COUNT + FOLIAGE_TIERS * TIER_VERTEX_COUNT;
/// Triangles appended per tree: eight trunk sides plus four per tier.
pub const TREE_TRIANGLE_COUNT: usize = 8 + FOLIAGE_TIERS * 4;
/// Indices appended per tree.
pub const TREE_INDEX_COUNT: usize = TREE_TRIANGLE_COUNT * 3;

const TRUNK_COLOR: Vec3 = Vec3::new(0.4, 0.26, 0.13);
const TIER_COLORS: [Vec3; FOLIAGE_TIERS] = [
    Vec3::new(0.05, 0.35, 0.05),
    Vec3::new(0.1, 0.45, 0.1),
    Vec3::new(0.15, 0.55, 0.15),
];

/// Trunk half-width in tree units.
const TRUNK_HALF_WIDTH: f32 = 0.15;
/// Trunk height in tree units.
const TRUNK_HEIGHT: f32 = 1.0;

/// Square corners in counter-clockwise order seen from above.
const SQUARE: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

/// Scatter parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeParams {
    /// Emit trees at all. Default: true.
    pub enabled: bool,
    /// Probability that an eligible cell gets a tree. Default: 0.9.
    pub density: f32,
    /// Seed for the placement stream. Default: 0.
    pub seed: u64,
    /// Grid stride between candidate cells. Default: 2.
    pub stride: usize,
    /// Cells skipped along every grid edge. Default: 2.
    pub border: usize,
    /// Size multiplier relative to one grid cell. Default: 1.0.
    pub size: f32,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            enabled: true,
            density: 0.9,
            seed: 0,
            stride: 2,
            border: 2,
            size: 1.0,
        }
    }
}

/// One pyramid of foliage, in tree units relative to the tree base.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoliageTier {
    /// Height of the square base above the tree base.
    pub base_y: f32,
    /// Half-width of the square base.
    pub half_width: f32,
    /// Apex height above `base_y`.
    pub height: f32,
    /// Flat colour of the tier.
    pub color: Vec3,
}

impl FoliageTier {
    /// The `i`-th tier counted from the bottom.
    pub fn nth(i: usize) -> Self {
        let i = i.min(FOLIAGE_TIERS - 1);
        let f = i as f32;
        Self {
            base_y: 0.8 + 0.7 * f,
            half_width: 0.9 - 0.25 * f,
            height: 1.2 - 0.2 * f,
            color: TIER_COLORS[i],
        }
    }
}

/// A placed tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeInstance {
    /// World position of the trunk base.
    pub position: Vec3,
    /// World units per tree unit.
    pub scale: f32,
    /// Foliage tiers, bottom first.
    pub tiers: [FoliageTier; FOLIAGE_TIERS],
}

impl TreeInstance {
    /// A tree with the standard three tiers.
    pub fn new(position: Vec3, scale: f32) -> Self {
        Self {
            position,
            scale,
            tiers: [FoliageTier::nth(0), FoliageTier::nth(1), FoliageTier::nth(2)],
        }
    }

    /// Appends [`TREE_VERTEX_COUNT`] vertices and [`TREE_INDEX_COUNT`]
    /// indices to `mesh`.
    pub fn append_to(&self, mesh: &mut MeshBuffer) {
        let mut vertices = Vec::with_capacity(TREE_VERTEX_COUNT);
        let mut indices = Vec::with_capacity(TREE_INDEX_COUNT);
        let at = |dx: f32, dy: f32, dz: f32| self.position + Vec3::new(dx, dy, dz) * self.scale;

        for y in [0.0, TRUNK_HEIGHT] {
            for (sx, sz) in SQUARE {
                vertices.push(TerrainVertex::new(
                    at(sx * TRUNK_HALF_WIDTH, y, sz * TRUNK_HALF_WIDTH),
                    TRUNK_COLOR,
                ));
            }
        }
        for i in 0..4u32 {
            let j = (i + 1) % 4;
            let (bi, bj, ti, tj) = (i, j, i + 4, j + 4);
            indices.extend_from_slice(&[bi, tj, bj, bi, ti, tj]);
        }

        for tier in &self.tiers {
            let base = vertices.len() as u32;
            for (sx, sz) in SQUARE {
                vertices.push(TerrainVertex::new(
                    at(sx * tier.half_width, tier.base_y, sz * tier.half_width),
                    tier.color,
                ));
            }
            vertices.push(TerrainVertex::new(
                at(0.0, tier.base_y + tier.height, 0.0),
                tier.color,
            ));
            let apex = base + 4;
            for i in 0..4u32 {
                let j = (i + 1) % 4;
                indices.extend_from_slice(&[base + j, base + i, apex]);
            }
        }

        mesh.append_indexed(&vertices, &indices);
    }
}

/// Deterministic tree placement over a height field.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeScatter {
    params: TreeParams,
}

impl TreeScatter {
    /// Creates a scatter with the given parameters.
    pub fn new(params: TreeParams) -> Self {
        Self { params }
    }

    /// Places trees on cells whose height lies in `[bands.grass, bands.rock)`.
    ///
    /// Candidates are visited row by row at `stride`, skipping `border` cells
    /// on each edge. Each eligible cell consumes exactly one draw from a
    /// generator seeded with `params.seed`; the tree is placed if the draw is
    /// below `density`, and the same draw sets its size jitter.
    pub fn scatter(
        &self,
        field: &HeightField,
        bands: &BiomeBands,
        mapping: &WorldMapping,
    ) -> Vec<TreeInstance> {
        let p = &self.params;
        if !p.enabled {
            return Vec::new();
        }
        let stride = p.stride.max(1);
        let cell = mapping.cell_size();
        let mut rng = seeded_rng(p.seed);
        let mut trees = Vec::new();
        let mut eligible = 0usize;

        for z in (p.border..field.height().saturating_sub(p.border)).step_by(stride) {
            for x in (p.border..field.width().saturating_sub(p.border)).step_by(stride) {
                let Some(h) = field.get(x, z) else {
                    continue;
                };
                if h < bands.grass || h >= bands.rock {
                    continue;
                }
                eligible += 1;
                let roll: f32 = rng.random();
                if roll < p.density {
                    let jitter = 0.8 + 0.4 * (roll / p.density).min(1.0);
                    trees.push(TreeInstance::new(
                        mapping.position(x, z, h),
                        p.size * cell * jitter,
                    ));
                }
            }
        }

        debug!(
            eligible,
            placed = trees.len(),
            seed = p.seed,
            "Scattered trees"
        );
        trees
    }
}
