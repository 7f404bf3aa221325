//! Shoreline flattening: sinks everything below the water level to a flat
//! sea floor and eases the terrain back to its true height across a narrow
//! band above it.

use serde::{Deserialize, Serialize};

/// Hermite smoothstep on `t` clamped to `[0, 1]`.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Water flattening parameters, in normalized height units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShorelineParams {
    /// Heights below this are under water. Default: 0.1.
    pub water_level: f32,
    /// Depth of the flat sea floor below `water_level`. Default: 0.02.
    pub depth_offset: f32,
    /// Width of the easing band above `water_level`. A width of zero gives a
    /// hard step at the waterline. Default: 0.05.
    pub transition_width: f32,
}

impl Default for ShorelineParams {
    fn default() -> Self {
        Self {
            water_level: 0.1,
            depth_offset: 0.02,
            transition_width: 0.05,
        }
    }
}

impl ShorelineParams {
    /// Height of the flattened sea floor.
    pub fn floor(&self) -> f32 {
        self.water_level - self.depth_offset
    }

    /// Maps a raw height to its flattened height.
    ///
    /// Below the water level every height becomes [`Self::floor`]. Inside the
    /// band the result blends from the floor toward `h` with a smoothstep
    /// weight, reaching `h` exactly at the top of the band.
    pub fn flatten(&self, h: f32) -> f32 {
        let floor = self.floor();
        if h < self.water_level {
            return floor;
        }
        let width = self.transition_width;
        if width <= 0.0 || h >= self.water_level + width {
            return h;
        }
        let s = smoothstep((h - self.water_level) / width);
        floor + (h - floor) * s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
        assert_eq!(smoothstep(-3.0), 0.0);
        assert_eq!(smoothstep(7.0), 1.0);
    }

    #[test]
    fn test_underwater_is_flat() {
        let params = ShorelineParams::default();
        for h in [0.0, 0.03, 0.0999] {
            assert!((params.flatten(h) - 0.08).abs() < 1e-6, "h={h}");
        }
    }

    #[test]
    fn test_land_above_band_is_unchanged() {
        let params = ShorelineParams::default();
        for h in [0.15, 0.2, 0.5, 1.0] {
            assert_eq!(params.flatten(h), h);
        }
    }

    #[test]
    fn test_flatten_is_continuous_and_monotonic() {
        let params = ShorelineParams::default();
        let steps = 10_000;
        let mut prev = params.flatten(0.0);
        for i in 1..=steps {
            let h = i as f32 / steps as f32;
            let f = params.flatten(h);
            assert!(f + 1e-6 >= prev, "not monotonic at h={h}: {prev} -> {f}");
            assert!(
                (f - prev).abs() < 1e-3,
                "jump at h={h}: {prev} -> {f}"
            );
            prev = f;
        }
    }

    #[test]
    fn test_band_edges_meet() {
        let params = ShorelineParams::default();
        assert!((params.flatten(0.1) - params.floor()).abs() < 1e-6);
        let top = 0.15 - 1e-5;
        assert!((params.flatten(top) - top).abs() < 1e-4);
    }

    #[test]
    fn test_zero_width_is_hard_step() {
        let params = ShorelineParams {
            transition_width: 0.0,
            ..Default::default()
        };
        assert_eq!(params.flatten(0.09), params.floor());
        assert_eq!(params.flatten(0.1), 0.1);
    }
}
