//! Errors surfaced by the demo pipeline.

use std::path::PathBuf;

use relief_config::ConfigError;
use relief_mesh::MeshError;
use relief_terrain::TerrainError;

/// Anything that stops a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// Configuration could not be used.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Height field generation failed.
    #[error(transparent)]
    Terrain(#[from] TerrainError),

    /// The built mesh failed validation.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// Writing an export file failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Target file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Encoding an image failed.
    #[error("failed to encode {}: {source}", path.display())]
    Image {
        /// Target file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: image::ImageError,
    },

    /// The grid is too large for an image.
    #[error("{width}x{height} grid does not fit in an image")]
    ImageSize {
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
}
