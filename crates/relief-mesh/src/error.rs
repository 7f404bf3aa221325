//! Mesh buffer error types.

/// Violations of the index-buffer invariants checked by
/// [`crate::MeshBuffer::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    /// The index count is not a multiple of three.
    #[error("index count {index_count} is not a multiple of 3")]
    IncompleteTriangle {
        /// Number of indices in the buffer.
        index_count: usize,
    },

    /// An index points past the end of the vertex buffer.
    #[error("index {index} at position {position} exceeds vertex count {vertex_count}")]
    IndexOutOfRange {
        /// Position of the offending entry in the index buffer.
        position: usize,
        /// The offending index value.
        index: u32,
        /// Number of vertices in the buffer.
        vertex_count: usize,
    },
}
