//! Terrain meshing: flat-shaded LOD triangles with shoreline flattening,
//! biome colours, and scattered low-poly trees.

pub mod biome;
pub mod builder;
mod error;
pub mod mapping;
pub mod mesh_buffer;
pub mod shoreline;
pub mod tree;
pub mod vertex;

pub use biome::{BiomeBands, BiomeColorizer};
pub use builder::{MeshParams, TerrainMesh, TerrainMeshBuilder, build_mesh, reduced_cells};
pub use error::MeshError;
pub use mapping::WorldMapping;
pub use mesh_buffer::{MeshBuffer, VERTEX_STRIDE};
pub use shoreline::{ShorelineParams, smoothstep};
pub use tree::{
    FoliageTier, TREE_INDEX_COUNT, TREE_TRIANGLE_COUNT, TREE_VERTEX_COUNT, TreeInstance,
    TreeParams, TreeScatter,
};
pub use vertex::{COLOR_OFFSET, FLOATS_PER_VERTEX, TerrainVertex};
