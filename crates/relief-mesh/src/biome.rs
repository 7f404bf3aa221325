//! Height-banded biome colouring.
//!
//! Heights are split into water, shallows, sand, grass, rock and snow bands.
//! Each band has its own colour ramp; a short smoothstep cross-fade around
//! every band edge keeps the colour continuous in height.

use glam::Vec3;
use relief_terrain::seed::{det_cosf, det_sinf};
use serde::{Deserialize, Serialize};

use crate::shoreline::smoothstep;

/// Deep water, below [`BiomeBands::water`].
pub const DEEP_WATER: Vec3 = Vec3::new(0.0, 0.0, 0.5);
/// Shallow water at the bottom of its band.
pub const SHALLOW_LOW: Vec3 = Vec3::new(0.0, 0.0, 0.7);
/// Shallow water at the top of its band.
pub const SHALLOW_HIGH: Vec3 = Vec3::new(0.0, 0.3, 0.7);
/// Beach sand.
pub const SAND: Vec3 = Vec3::new(0.76, 0.7, 0.5);
/// Lowland grass.
pub const GRASS_LOW: Vec3 = Vec3::new(0.1, 0.6, 0.1);
/// Upland grass.
pub const GRASS_HIGH: Vec3 = Vec3::new(0.1, 0.4, 0.1);
/// Rock at the bottom of its band, before intensity modulation.
pub const ROCK_LOW: Vec3 = Vec3::new(0.5, 0.4, 0.3);
/// Rock at the top of its band, before intensity modulation.
pub const ROCK_HIGH: Vec3 = Vec3::new(0.5, 0.5, 0.5);
/// Snow at the snow line.
pub const SNOW_LOW: Vec3 = Vec3::new(0.7, 0.7, 0.7);
/// Fully saturated snow.
pub const SNOW_HIGH: Vec3 = Vec3::ONE;

/// Lower and upper clamp on the rock intensity multiplier.
const ROCK_INTENSITY_RANGE: (f32, f32) = (0.5, 1.0);

/// Band thresholds in normalized height, ascending.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeBands {
    /// Top of deep water. Default: 0.1.
    pub water: f32,
    /// Top of the shallows and start of sand. Default: 0.3.
    pub sand: f32,
    /// Start of grass. Default: 0.35.
    pub grass: f32,
    /// Start of rock. Default: 0.4.
    pub rock: f32,
    /// Start of snow. Default: 0.7.
    pub snow: f32,
    /// Half-width of the cross-fade around each band edge. Clamped to half
    /// the narrowest band. Default: 0.01.
    pub blend_width: f32,
}

impl Default for BiomeBands {
    fn default() -> Self {
        Self {
            water: 0.1,
            sand: 0.3,
            grass: 0.35,
            rock: 0.4,
            snow: 0.7,
            blend_width: 0.01,
        }
    }
}

impl BiomeBands {
    /// Band edges in ascending order.
    pub fn edges(&self) -> [f32; 5] {
        [self.water, self.sand, self.grass, self.rock, self.snow]
    }

    /// Returns `true` if the edges are non-decreasing.
    pub fn is_ordered(&self) -> bool {
        self.edges().windows(2).all(|w| w[0] <= w[1])
    }

    /// The cross-fade half-width actually applied.
    pub fn effective_blend_width(&self) -> f32 {
        let narrowest = self
            .edges()
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold(f32::INFINITY, f32::min);
        if narrowest <= 0.0 {
            return 0.0;
        }
        self.blend_width.clamp(0.0, narrowest * 0.5)
    }
}

/// Position of `h` inside `[lo, hi)`, clamped to `[0, 1]`.
fn ramp(h: f32, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        ((h - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Maps heights to vertex colours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeColorizer {
    bands: BiomeBands,
    blend: f32,
}

impl Default for BiomeColorizer {
    fn default() -> Self {
        Self::new(BiomeBands::default())
    }
}

impl BiomeColorizer {
    /// Creates a colorizer for the given bands.
    pub fn new(bands: BiomeBands) -> Self {
        Self {
            blend: bands.effective_blend_width(),
            bands,
        }
    }

    /// The band thresholds in use.
    pub fn bands(&self) -> &BiomeBands {
        &self.bands
    }

    /// Colour for a normalized height, each channel in `[0, 1]`.
    pub fn colorize(&self, h: f32) -> Vec3 {
        let w = self.blend;
        if w > 0.0 {
            for edge in self.bands.edges() {
                if (h - edge).abs() < w {
                    let below = self.band_color(edge - w);
                    let above = self.band_color(edge + w);
                    let t = smoothstep((h - (edge - w)) / (2.0 * w));
                    return below.lerp(above, t);
                }
            }
        }
        self.band_color(h)
    }

    /// Colour quantized to 8-bit sRGB-agnostic channels, for previews.
    pub fn colorize_rgb8(&self, h: f32) -> [u8; 3] {
        let c = self.colorize(h).clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
        [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8]
    }

    /// Colour of the band containing `h`, without edge blending.
    pub fn band_color(&self, h: f32) -> Vec3 {
        let b = &self.bands;
        if h < b.water {
            DEEP_WATER
        } else if h < b.sand {
            SHALLOW_LOW.lerp(SHALLOW_HIGH, ramp(h, b.water, b.sand))
        } else if h < b.grass {
            SAND
        } else if h < b.rock {
            GRASS_LOW.lerp(GRASS_HIGH, ramp(h, b.grass, b.rock))
        } else if h < b.snow {
            let t = ramp(h, b.rock, b.snow);
            ROCK_LOW.lerp(ROCK_HIGH, t) * rock_intensity(h, t)
        } else {
            let t = ((h - b.snow) * 2.0).min(1.0);
            SNOW_LOW.lerp(SNOW_HIGH, t)
        }
    }
}

/// Brightness multiplier that streaks the rock band.
fn rock_intensity(h: f32, t: f32) -> f32 {
    let (lo, hi) = ROCK_INTENSITY_RANGE;
    (0.6 + 0.4 * t + 0.15 * det_sinf(h * 20.0) + 0.15 * det_cosf(h * 15.0)).clamp(lo, hi)
}
