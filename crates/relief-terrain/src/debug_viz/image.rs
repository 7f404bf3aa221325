//! Opaque RGBA pixel buffer for height field previews.

use std::collections::HashSet;

/// Row-major RGBA image. Every pixel is fully opaque.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PreviewImage {
    /// An opaque black image.
    pub fn new(width: u32, height: u32) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * 4);
        for _ in 0..count {
            pixels.extend_from_slice(&[0, 0, 0, 255]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * 4)
    }

    /// Sets the colour at `(x, y)`. Out-of-range coordinates are ignored.
    pub fn put(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i..i + 3].copy_from_slice(&rgb);
        }
    }

    /// RGBA value at `(x, y)`, if inside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// RGBA bytes, row-major.
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the image, returning its RGBA bytes.
    pub fn into_rgba(self) -> Vec<u8> {
        self.pixels
    }

    /// Number of distinct RGB colours.
    pub fn distinct_colors(&self) -> usize {
        self.pixels
            .chunks_exact(4)
            .map(|p| (p[0], p[1], p[2]))
            .collect::<HashSet<_>>()
            .len()
    }
}
