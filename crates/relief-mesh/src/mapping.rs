//! Grid-to-world coordinate mapping shared by terrain and tree meshing.

use glam::Vec3;

use crate::shoreline::ShorelineParams;

/// Maps grid cells to world space.
///
/// The grid spans `[-horizontal_scale, horizontal_scale]` on both x and z.
/// World y is the shoreline-flattened height times `vertical_scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldMapping {
    width: usize,
    height: usize,
    horizontal_scale: f32,
    vertical_scale: f32,
    shoreline: ShorelineParams,
}

impl WorldMapping {
    /// Mapping for a `width x height` grid.
    pub fn new(
        width: usize,
        height: usize,
        horizontal_scale: f32,
        vertical_scale: f32,
        shoreline: ShorelineParams,
    ) -> Self {
        Self {
            width,
            height,
            horizontal_scale,
            vertical_scale,
            shoreline,
        }
    }

    fn axis(&self, i: usize, n: usize) -> f32 {
        if n < 2 {
            return 0.0;
        }
        (i as f32 / (n - 1) as f32 * 2.0 - 1.0) * self.horizontal_scale
    }

    /// World position of grid cell `(x, z)` with raw height `h`.
    pub fn position(&self, x: usize, z: usize, h: f32) -> Vec3 {
        Vec3::new(
            self.axis(x, self.width),
            self.shoreline.flatten(h) * self.vertical_scale,
            self.axis(z, self.height),
        )
    }

    /// World-space distance between adjacent grid columns.
    pub fn cell_size(&self) -> f32 {
        2.0 * self.horizontal_scale / self.width.saturating_sub(1).max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_span_horizontal_scale() {
        let m = WorldMapping::new(5, 3, 5.0, 4.0, ShorelineParams::default());
        assert_eq!(m.position(0, 0, 0.5), Vec3::new(-5.0, 2.0, -5.0));
        assert_eq!(m.position(4, 2, 0.5), Vec3::new(5.0, 2.0, 5.0));
        assert_eq!(m.position(2, 1, 0.5).x, 0.0);
        assert_eq!(m.cell_size(), 2.5);
    }

    #[test]
    fn test_height_is_flattened() {
        let m = WorldMapping::new(2, 2, 1.0, 10.0, ShorelineParams::default());
        assert!((m.position(0, 0, 0.0).y - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_single_column_sits_at_origin() {
        let m = WorldMapping::new(1, 1, 5.0, 1.0, ShorelineParams::default());
        let p = m.position(0, 0, 1.0);
        assert_eq!((p.x, p.z), (0.0, 0.0));
        assert_eq!(m.cell_size(), 10.0);
    }
}
