//! Owned, row-major grid of normalized height samples.

use crate::error::TerrainError;

/// A `width x height` grid of height samples stored row-major.
///
/// Samples produced by [`crate::HeightFieldGenerator`] lie in `[0, 1]`.
/// Cloning copies the backing storage; two fields never alias.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    width: usize,
    height: usize,
    samples: Vec<f32>,
}

impl HeightField {
    /// Wrap a row-major sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::ZeroDimension`] if either dimension is zero and
    /// [`TerrainError::SampleCountMismatch`] if `samples.len() != width * height`.
    pub fn new(width: usize, height: usize, samples: Vec<f32>) -> Result<Self, TerrainError> {
        if width == 0 || height == 0 {
            return Err(TerrainError::ZeroDimension { width, height });
        }
        let expected = width * height;
        if samples.len() != expected {
            return Err(TerrainError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Wrap a buffer whose dimensions the caller has already checked.
    pub(crate) fn from_validated(width: usize, height: usize, samples: Vec<f32>) -> Self {
        debug_assert!(width > 0 && height > 0);
        debug_assert_eq!(samples.len(), width * height);
        Self {
            width,
            height,
            samples,
        }
    }

    /// A field with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: f32) -> Result<Self, TerrainError> {
        Self::new(width, height, vec![value; width * height])
    }

    /// Build a field by evaluating `f(x, y)` for every cell.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> f32,
    ) -> Result<Self, TerrainError> {
        let mut samples = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                samples.push(f(x, y));
            }
        }
        Self::new(width, height, samples)
    }

    /// Grid width (samples per row).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height (number of rows).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Height at `(x, y)`, or `0.0` for any coordinate outside the grid.
    pub fn sample(&self, x: i64, y: i64) -> f32 {
        if x < 0 || y < 0 {
            return 0.0;
        }
        self.get(x as usize, y as usize).unwrap_or(0.0)
    }

    /// Height at `(x, y)` if it lies inside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.samples[y * self.width + x])
    }

    /// All samples, row-major.
    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    /// Iterate rows from `y = 0` upward.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f32> {
        self.samples.chunks_exact(self.width)
    }

    /// Smallest and largest sample.
    pub fn min_max(&self) -> (f32, f32) {
        self.samples
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }

    /// Consume the field, returning its sample buffer.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: usize, height: usize) -> HeightField {
        HeightField::from_fn(width, height, |x, y| (y * width + x) as f32).unwrap()
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        assert_eq!(
            HeightField::new(0, 4, Vec::new()),
            Err(TerrainError::ZeroDimension {
                width: 0,
                height: 4
            })
        );
        assert!(HeightField::filled(3, 0, 0.5).is_err());
    }

    #[test]
    fn test_rejects_wrong_sample_count() {
        let result = HeightField::new(3, 3, vec![0.0; 8]);
        assert_eq!(
            result,
            Err(TerrainError::SampleCountMismatch {
                expected: 9,
                actual: 8
            })
        );
    }

    #[test]
    fn test_row_major_layout() {
        let field = ramp(4, 3);
        assert_eq!(field.sample(0, 0), 0.0);
        assert_eq!(field.sample(3, 0), 3.0);
        assert_eq!(field.sample(0, 1), 4.0);
        assert_eq!(field.sample(3, 2), 11.0);
        assert_eq!(field.rows().count(), 3);
        assert_eq!(field.rows().nth(1).unwrap(), &[4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_out_of_bounds_returns_zero() {
        let field = HeightField::filled(5, 2, 0.75).unwrap();
        for &(x, y) in &[(-1, 0), (0, -1), (5, 0), (0, 2), (100, 100), (i64::MIN, 0)] {
            assert_eq!(field.sample(x, y), 0.0, "({x}, {y}) should be outside");
        }
        assert_eq!(field.sample(4, 1), 0.75);
        assert_eq!(field.get(5, 1), None);
    }

    #[test]
    fn test_clone_has_independent_storage() {
        let original = ramp(3, 3);
        let copy = original.clone();
        let mut samples = copy.into_samples();
        samples[0] = 99.0;
        assert_eq!(original.sample(0, 0), 0.0);
        assert_ne!(samples.as_ptr(), original.as_slice().as_ptr());
    }

    #[test]
    fn test_min_max() {
        let field = ramp(2, 2);
        assert_eq!(field.min_max(), (0.0, 3.0));
    }
}
