//! Classic gradient noise over a seeded permutation table.
//!
//! [`GradientNoise`] hashes the eight corners of the lattice cell containing a
//! point through a 512-entry [`PermutationTable`], takes a pseudo-gradient dot
//! product at each corner and blends them with quintic fade weights. Output is
//! approximately in `[-1, 1]` and is exactly `0.0` at every lattice point.

use noise::NoiseFn;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::fractal::{FractalParams, OctaveOffset};
use crate::seed::seeded_rng;

/// Number of distinct lattice hashes.
pub const PERMUTATION_SIZE: usize = 256;

/// A shuffled permutation of `0..=255`, stored twice so lookups of
/// `p[i + 1]` and `p[p[i] + j]` never need a modulo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationTable {
    entries: [u8; 2 * PERMUTATION_SIZE],
}

impl PermutationTable {
    /// Build a table by Fisher–Yates shuffling `0..=255` with `rng`.
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut base: [u8; PERMUTATION_SIZE] = std::array::from_fn(|i| i as u8);
        base.shuffle(rng);
        Self::from_base(&base)
    }

    /// Build a table from a dedicated RNG seeded with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self::from_rng(&mut seeded_rng(seed))
    }

    /// The unshuffled table (`p[i] = i`). Useful as a fixed reference.
    pub fn identity() -> Self {
        let base: [u8; PERMUTATION_SIZE] = std::array::from_fn(|i| i as u8);
        Self::from_base(&base)
    }

    fn from_base(base: &[u8; PERMUTATION_SIZE]) -> Self {
        let mut entries = [0u8; 2 * PERMUTATION_SIZE];
        entries[..PERMUTATION_SIZE].copy_from_slice(base);
        entries[PERMUTATION_SIZE..].copy_from_slice(base);
        Self { entries }
    }

    /// All 512 entries.
    pub fn as_slice(&self) -> &[u8] {
        &self.entries
    }

    #[inline]
    fn at(&self, index: usize) -> usize {
        self.entries[index] as usize
    }
}

/// Seeded 2D/3D gradient noise with fractal summation.
#[derive(Clone, Debug)]
pub struct GradientNoise {
    table: PermutationTable,
}

impl GradientNoise {
    /// Wrap an existing permutation table.
    pub fn new(table: PermutationTable) -> Self {
        Self { table }
    }

    /// Build the permutation table from `rng`.
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(PermutationTable::from_rng(rng))
    }

    /// Build the permutation table from a dedicated RNG seeded with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(PermutationTable::from_seed(seed))
    }

    /// The permutation table driving this noise.
    pub fn table(&self) -> &PermutationTable {
        &self.table
    }

    /// Sample 3D noise. Output is approximately in `[-1, 1]`.
    pub fn sample_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        let (x_floor, y_floor, z_floor) = (x.floor(), y.floor(), z.floor());

        // Unit cube containing the point.
        let xi = (x_floor as i64 & 255) as usize;
        let yi = (y_floor as i64 & 255) as usize;
        let zi = (z_floor as i64 & 255) as usize;

        // Position inside the cube.
        let x = x - x_floor;
        let y = y - y_floor;
        let z = z - z_floor;

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let p = &self.table;
        let a = p.at(xi) + yi;
        let aa = p.at(a) + zi;
        let ab = p.at(a + 1) + zi;
        let b = p.at(xi + 1) + yi;
        let ba = p.at(b) + zi;
        let bb = p.at(b + 1) + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p.at(aa), x, y, z), grad(p.at(ba), x - 1.0, y, z)),
                lerp(
                    u,
                    grad(p.at(ab), x, y - 1.0, z),
                    grad(p.at(bb), x - 1.0, y - 1.0, z),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(p.at(aa + 1), x, y, z - 1.0),
                    grad(p.at(ba + 1), x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad(p.at(ab + 1), x, y - 1.0, z - 1.0),
                    grad(p.at(bb + 1), x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }

    /// Sample 2D noise: the `z = 0` slice of [`Self::sample_3d`].
    #[inline]
    pub fn sample_2d(&self, x: f64, y: f64) -> f64 {
        self.sample_3d(x, y, 0.0)
    }

    /// Fractal sum without per-octave offsets.
    pub fn fractal(&self, x: f64, y: f64, params: &FractalParams) -> f64 {
        self.fractal_with_offsets(x, y, params, &[])
    }

    /// Fractal sum of `params.octaves` layers.
    ///
    /// Octave `i` samples at `coord / scale * frequency + offsets[i]` and
    /// contributes `amplitude * (2n - 1)`; amplitude then scales by
    /// `persistence` and frequency by `lacunarity`. Octaves beyond the end of
    /// `offsets` use a zero offset.
    pub fn fractal_with_offsets(
        &self,
        x: f64,
        y: f64,
        params: &FractalParams,
        offsets: &[OctaveOffset],
    ) -> f64 {
        let scale = params.effective_scale();
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut total = 0.0;

        for octave in 0..params.octaves as usize {
            let offset = offsets.get(octave).copied().unwrap_or_default();
            let sample_x = x / scale * frequency + offset.x;
            let sample_y = y / scale * frequency + offset.y;

            let value = self.sample_2d(sample_x, sample_y) * 2.0 - 1.0;
            total += value * amplitude;

            amplitude *= params.persistence;
            frequency *= params.lacunarity;
        }

        total
    }
}

impl NoiseFn<f64, 2> for GradientNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample_2d(point[0], point[1])
    }
}

impl NoiseFn<f64, 3> for GradientNoise {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.sample_3d(point[0], point[1], point[2])
    }
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product of `(x, y, z)` with one of 12 edge gradients picked by the
/// low four bits of `hash`.
#[inline]
fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}
