//! Deterministic seeded generation utilities.
//!
//! Every random draw in the pipeline (permutation shuffle, octave offsets,
//! tree placement) comes from an explicitly seeded [`ChaCha8Rng`], and the
//! trigonometry used for shading goes through `libm` so results do not depend
//! on the platform libc.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The RNG type threaded through generation entry points.
pub type TerrainRng = ChaCha8Rng;

/// Create the deterministic RNG for a seed.
///
/// The returned RNG produces an identical sequence for the same seed,
/// regardless of thread or platform.
pub fn seeded_rng(seed: u64) -> TerrainRng {
    ChaCha8Rng::seed_from_u64(seed)
}

// ---------------------------------------------------------------------------
// Deterministic math (libm)
// ---------------------------------------------------------------------------

/// Deterministic single-precision sine using libm (not platform libc).
#[inline]
pub fn det_sinf(x: f32) -> f32 {
    libm::sinf(x)
}

/// Deterministic single-precision cosine using libm.
#[inline]
pub fn det_cosf(x: f32) -> f32 {
    libm::cosf(x)
}
