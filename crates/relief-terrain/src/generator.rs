//! Height field generation: fractal noise over a grid, normalized to `[0, 1]`.
//!
//! Generation runs in two passes. The first evaluates raw fractal noise for a
//! range of rows and records that range's min/max; ranges are independent of
//! each other, so callers may evaluate them on separate workers. The second
//! pass ([`HeightFieldGenerator::normalize`]) reassembles the ranges, folds the
//! global min/max across all of them and only then remaps every sample. Since
//! `min`/`max` folds are order-independent the normalized output is
//! bit-identical however the rows were split.

use std::ops::Range;

use rand::Rng;
use tracing::{debug, warn};

use crate::error::TerrainError;
use crate::fractal::{FractalParams, OctaveOffset};
use crate::gradient::GradientNoise;
use crate::heightfield::HeightField;
use crate::seed::seeded_rng;

/// Value every sample takes when the raw field is constant.
pub const DEGENERATE_HEIGHT: f32 = 0.5;

/// Raw (unnormalized) fractal samples for a contiguous range of rows.
#[derive(Clone, Debug)]
pub struct RawRows {
    start_row: usize,
    width: usize,
    values: Vec<f64>,
    min: f64,
    max: f64,
}

impl RawRows {
    /// Rows covered by this part.
    pub fn rows(&self) -> Range<usize> {
        let count = if self.width == 0 {
            0
        } else {
            self.values.len() / self.width
        };
        self.start_row..self.start_row + count
    }

    /// Raw samples, row-major within the range.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Smallest raw sample in the range (`+inf` when empty).
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest raw sample in the range (`-inf` when empty).
    pub fn max(&self) -> f64 {
        self.max
    }
}

/// Drives [`GradientNoise`] across a grid with one random offset per octave.
#[derive(Clone, Debug)]
pub struct HeightFieldGenerator {
    width: usize,
    height: usize,
    params: FractalParams,
    noise: GradientNoise,
    offsets: Vec<OctaveOffset>,
}

impl HeightFieldGenerator {
    /// Create a generator, drawing from `rng` first the permutation shuffle
    /// and then one `(x, y)` offset pair per octave.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::ZeroDimension`] if `width` or `height` is zero.
    pub fn new<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        params: FractalParams,
        rng: &mut R,
    ) -> Result<Self, TerrainError> {
        if width == 0 || height == 0 {
            return Err(TerrainError::ZeroDimension { width, height });
        }
        let noise = GradientNoise::from_rng(rng);
        let offsets = OctaveOffset::draw_many(rng, params.octaves);
        Ok(Self {
            width,
            height,
            params,
            noise,
            offsets,
        })
    }

    /// Create a generator whose RNG is seeded with `seed`.
    pub fn from_seed(
        width: usize,
        height: usize,
        params: FractalParams,
        seed: u64,
    ) -> Result<Self, TerrainError> {
        Self::new(width, height, params, &mut seeded_rng(seed))
    }

    /// Grid width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Fractal parameters.
    pub fn params(&self) -> &FractalParams {
        &self.params
    }

    /// The noise source.
    pub fn noise(&self) -> &GradientNoise {
        &self.noise
    }

    /// Per-octave offsets, in octave order.
    pub fn offsets(&self) -> &[OctaveOffset] {
        &self.offsets
    }

    /// Split `0..height` into at most `parts` contiguous ranges of near-equal size.
    pub fn row_ranges(&self, parts: usize) -> Vec<Range<usize>> {
        let parts = parts.clamp(1, self.height);
        let base = self.height / parts;
        let extra = self.height % parts;
        let mut start = 0;
        (0..parts)
            .map(|i| {
                let len = base + usize::from(i < extra);
                let range = start..start + len;
                start += len;
                range
            })
            .collect()
    }

    /// Evaluate raw fractal noise for `rows` (clamped to the grid).
    pub fn generate_rows(&self, rows: Range<usize>) -> RawRows {
        let end = rows.end.min(self.height);
        let start = rows.start.min(end);
        let mut values = Vec::with_capacity((end - start) * self.width);
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for y in start..end {
            for x in 0..self.width {
                let value =
                    self.noise
                        .fractal_with_offsets(x as f64, y as f64, &self.params, &self.offsets);
                min = min.min(value);
                max = max.max(value);
                values.push(value);
            }
        }

        RawRows {
            start_row: start,
            width: self.width,
            values,
            min,
            max,
        }
    }

    /// Reassemble row parts and remap them to `[0, 1]` using the global min/max.
    ///
    /// Parts may arrive in any order but must tile `0..height` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::RowGap`] if parts overlap or leave a gap and
    /// [`TerrainError::IncompleteRows`] if they stop short of the last row.
    pub fn normalize(&self, mut parts: Vec<RawRows>) -> Result<HeightField, TerrainError> {
        parts.sort_by_key(|part| part.start_row);

        let mut next_row = 0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut values = Vec::with_capacity(self.width * self.height);

        for part in parts.iter().filter(|part| !part.values.is_empty()) {
            if part.start_row != next_row || part.width != self.width {
                return Err(TerrainError::RowGap {
                    expected: next_row,
                    found: part.start_row,
                });
            }
            next_row = part.rows().end;
            min = min.min(part.min);
            max = max.max(part.max);
            values.extend_from_slice(&part.values);
        }

        if next_row != self.height {
            return Err(TerrainError::IncompleteRows {
                covered: next_row,
                expected: self.height,
            });
        }

        Ok(self.remap(values, min, max))
    }

    /// Generate the full field serially.
    pub fn generate(&self) -> HeightField {
        debug!(
            width = self.width,
            height = self.height,
            octaves = self.params.octaves,
            scale = self.params.effective_scale(),
            "generating height field"
        );
        let raw = self.generate_rows(0..self.height);
        let (min, max) = (raw.min, raw.max);
        self.remap(raw.values, min, max)
    }

    fn remap(&self, values: Vec<f64>, min: f64, max: f64) -> HeightField {
        let range = max - min;
        let samples = if range > 0.0 {
            debug!(min, max, "normalizing height field");
            values
                .into_iter()
                .map(|v| ((v - min) / range) as f32)
                .collect()
        } else {
            warn!(
                min,
                max, "raw height field is constant, filling with {DEGENERATE_HEIGHT}"
            );
            vec![DEGENERATE_HEIGHT; values.len()]
        };

        HeightField::from_validated(self.width, self.height, samples)
    }
}

/// Generate a normalized height field from a seed.
pub fn generate_heightfield(
    width: usize,
    height: usize,
    params: &FractalParams,
    seed: u64,
) -> Result<HeightField, TerrainError> {
    Ok(HeightFieldGenerator::from_seed(width, height, *params, seed)?.generate())
}
