//! Interleaved terrain vertex format.
//!
//! [`TerrainVertex`] is six `f32`s: position xyz followed by colour rgb. The
//! external renderer uploads the buffer as-is with two `Float32x3`
//! attributes at byte offsets 0 and 12 and a 24-byte stride.

use glam::Vec3;

/// Number of `f32` components in one [`TerrainVertex`].
pub const FLOATS_PER_VERTEX: usize = 6;

/// Byte offset of the colour attribute inside a vertex.
pub const COLOR_OFFSET: usize = 3 * std::mem::size_of::<f32>();

/// A single mesh vertex: world-space position and linear RGB colour.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Linear RGB colour, each channel in `[0, 1]`.
    pub color: [f32; 3],
}

static_assertions::assert_eq_size!(TerrainVertex, [f32; FLOATS_PER_VERTEX]);

impl TerrainVertex {
    /// Construct a vertex from glam vectors.
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }

    /// Position as a [`Vec3`].
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Colour as a [`Vec3`].
    pub fn color(&self) -> Vec3 {
        Vec3::from_array(self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_six_floats() {
        assert_eq!(std::mem::size_of::<TerrainVertex>(), 24);
        assert_eq!(COLOR_OFFSET, 12);
    }

    #[test]
    fn test_cast_to_floats_is_interleaved() {
        let v = TerrainVertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.1, 0.2, 0.3));
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_accessors_roundtrip() {
        let v = TerrainVertex::new(Vec3::new(-4.0, 0.5, 9.0), Vec3::ONE);
        assert_eq!(v.position(), Vec3::new(-4.0, 0.5, 9.0));
        assert_eq!(v.color(), Vec3::ONE);
    }
}
