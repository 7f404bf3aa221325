//! Height field debug visualization: 2D image rendering of generated terrain.
//!
//! Provides [`PreviewImage`] and renderers that turn a [`crate::HeightField`]
//! into a grayscale elevation map or a colour map driven by a caller-supplied
//! palette, so downstream crates can plug their own biome colouring in.

mod image;
mod renderers;

pub use self::image::PreviewImage;
pub use renderers::{height_to_gray, render_heightfield_colored, render_heightfield_grayscale};
