//! File exports: grayscale height map, biome preview, and coloured OBJ.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use relief_mesh::{BiomeColorizer, MeshBuffer};
use relief_terrain::HeightField;
use relief_terrain::debug_viz::{
    PreviewImage, render_heightfield_colored, render_heightfield_grayscale,
};
use tracing::info;

use crate::error::DemoError;

fn create_parent(path: &Path) -> Result<(), DemoError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DemoError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

fn save_image(image: PreviewImage, path: &Path) -> Result<(), DemoError> {
    let (width, height) = image.dimensions();
    let rgba = image::RgbaImage::from_raw(width, height, image.into_rgba()).ok_or(
        DemoError::ImageSize {
            width: width as usize,
            height: height as usize,
        },
    )?;
    create_parent(path)?;
    rgba.save(path).map_err(|source| DemoError::Image {
        path: path.to_path_buf(),
        source,
    })
}

fn check_image_size(field: &HeightField) -> Result<(), DemoError> {
    if u32::try_from(field.width()).is_err() || u32::try_from(field.height()).is_err() {
        return Err(DemoError::ImageSize {
            width: field.width(),
            height: field.height(),
        });
    }
    Ok(())
}

/// Writes the height field as a grayscale PNG, one pixel per sample.
pub fn write_heightmap_png(field: &HeightField, path: &Path) -> Result<(), DemoError> {
    check_image_size(field)?;
    save_image(render_heightfield_grayscale(field), path)?;
    info!(path = %path.display(), "Wrote height map");
    Ok(())
}

/// Writes a top-down biome colour preview PNG.
pub fn write_preview_png(
    field: &HeightField,
    colorizer: &BiomeColorizer,
    path: &Path,
) -> Result<(), DemoError> {
    check_image_size(field)?;
    let image = render_heightfield_colored(field, |h| colorizer.colorize_rgb8(h));
    save_image(image, path)?;
    info!(path = %path.display(), "Wrote biome preview");
    Ok(())
}

/// Serializes a mesh as Wavefront OBJ with `v x y z r g b` vertex colours.
pub fn write_obj<W: Write>(mesh: &MeshBuffer, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "# relief terrain mesh")?;
    writeln!(
        out,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;
    for v in &mesh.vertices {
        let [x, y, z] = v.position;
        let [r, g, b] = v.color;
        writeln!(out, "v {x} {y} {z} {r} {g} {b}")?;
    }
    for tri in mesh.indices.chunks_exact(3) {
        writeln!(out, "f {} {} {}", tri[0] + 1, tri[1] + 1, tri[2] + 1)?;
    }
    Ok(())
}

/// Writes a mesh to an OBJ file.
pub fn write_obj_file(mesh: &MeshBuffer, path: &Path) -> Result<(), DemoError> {
    let io_err = |source| DemoError::Io {
        path: path.to_path_buf(),
        source,
    };
    create_parent(path)?;
    let mut out = BufWriter::new(File::create(path).map_err(io_err)?);
    write_obj(mesh, &mut out).map_err(io_err)?;
    out.flush().map_err(io_err)?;
    info!(path = %path.display(), triangles = mesh.triangle_count(), "Wrote OBJ");
    Ok(())
}
