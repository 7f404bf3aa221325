//! Terrain generation error types.

/// Errors raised when constructing or assembling a [`crate::HeightField`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TerrainError {
    /// Width or height was zero.
    #[error("height field dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// The sample buffer does not hold exactly `width * height` values.
    #[error("expected {expected} height samples, got {actual}")]
    SampleCountMismatch {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },

    /// Row parts passed to normalization leave a gap or overlap.
    #[error("row parts are not contiguous: expected row {expected}, found row {found}")]
    RowGap {
        /// The next row that should have been covered.
        expected: usize,
        /// The first row of the offending part.
        found: usize,
    },

    /// Row parts passed to normalization stop before the last row.
    #[error("row parts cover {covered} of {expected} rows")]
    IncompleteRows {
        /// Rows covered by the supplied parts.
        covered: usize,
        /// Rows in the grid.
        expected: usize,
    },
}
