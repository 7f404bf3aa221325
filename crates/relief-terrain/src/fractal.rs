//! Multi-octave fractal parameters and per-octave sampling offsets.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Smallest usable noise scale. Non-positive scales are clamped to this.
pub const MIN_SCALE: f64 = 1e-4;

/// Half-width of the integer range octave offsets are drawn from.
pub const OCTAVE_OFFSET_RANGE: i32 = 50_000;

/// Configuration for fractal (multi-octave) noise summation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalParams {
    /// Grid cells per noise lattice unit at the first octave. Values `<= 0`
    /// are clamped to [`MIN_SCALE`]. Default: 50.0.
    pub scale: f64,
    /// Number of octaves to sum. Default: 4.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves. Default: 0.5.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves. Default: 2.0.
    pub lacunarity: f64,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            scale: 50.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

impl FractalParams {
    /// The scale actually used for sampling.
    pub fn effective_scale(&self) -> f64 {
        if self.scale <= 0.0 {
            MIN_SCALE
        } else {
            self.scale
        }
    }

    /// Sum of the absolute octave amplitudes (geometric series in `persistence`).
    pub fn amplitude_sum(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = 1.0_f64;
        for _ in 0..self.octaves {
            sum += amp.abs();
            amp *= self.persistence;
        }
        sum
    }

    /// Upper bound on the magnitude of a raw fractal sample.
    ///
    /// Each octave contributes `amplitude * (2n - 1)` with `n` in `[-1, 1]`,
    /// so a single term never exceeds `3 * amplitude`.
    pub fn raw_bound(&self) -> f64 {
        3.0 * self.amplitude_sum()
    }
}

/// Sampling offset applied to one octave so octaves decorrelate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OctaveOffset {
    /// Offset added to the x sample coordinate.
    pub x: f64,
    /// Offset added to the y sample coordinate.
    pub y: f64,
}

impl OctaveOffset {
    /// Draw one offset pair. Each component is an integer in
    /// `[-OCTAVE_OFFSET_RANGE, OCTAVE_OFFSET_RANGE)`, x first.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let x = rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE);
        let y = rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE);
        Self {
            x: f64::from(x),
            y: f64::from(y),
        }
    }

    /// Draw `octaves` offsets in octave order.
    pub fn draw_many<R: Rng + ?Sized>(rng: &mut R, octaves: u32) -> Vec<Self> {
        (0..octaves).map(|_| Self::draw(rng)).collect()
    }
}
