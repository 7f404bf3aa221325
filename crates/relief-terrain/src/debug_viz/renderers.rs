//! Height field renderers: grayscale elevation and palette-driven colour maps.

use super::image::PreviewImage;
use crate::heightfield::HeightField;

/// Map a normalized height to an 8-bit gray level. Values outside `[0, 1]`
/// are clamped.
pub fn height_to_gray(height: f32) -> u8 {
    (height.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Render one pixel per sample, black at `0.0` and white at `1.0`.
///
/// Row `y = 0` of the field becomes the top row of the image.
pub fn render_heightfield_grayscale(field: &HeightField) -> PreviewImage {
    render_heightfield_colored(field, |h| {
        let g = height_to_gray(h);
        [g, g, g]
    })
}

/// Render one pixel per sample using `palette` to colour each height.
pub fn render_heightfield_colored(
    field: &HeightField,
    palette: impl Fn(f32) -> [u8; 3],
) -> PreviewImage {
    let mut image = PreviewImage::new(field.width() as u32, field.height() as u32);

    for (y, row) in field.rows().enumerate() {
        for (x, &h) in row.iter().enumerate() {
            image.put(x as u32, y as u32, palette(h));
        }
    }

    image
}
