//! Procedural height fields: seeded gradient noise, fractal summation, and a
//! normalizing grid generator that can be split by rows.

mod error;
mod fractal;
mod generator;
mod gradient;
mod heightfield;

pub mod debug_viz;
pub mod seed;

pub use error::TerrainError;
pub use fractal::{FractalParams, MIN_SCALE, OCTAVE_OFFSET_RANGE, OctaveOffset};
pub use generator::{DEGENERATE_HEIGHT, HeightFieldGenerator, RawRows, generate_heightfield};
pub use gradient::{GradientNoise, PERMUTATION_SIZE, PermutationTable, fade};
pub use heightfield::HeightField;
pub use seed::{TerrainRng, seeded_rng};
