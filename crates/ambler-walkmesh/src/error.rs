/// Reasons a walk mesh cannot be built. Construction is all-or-nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalkMeshError {
    /// A triangle corner references a raw vertex past the end of the vertex list.
    OutOfRange { corner: usize, index: u32, len: usize },
    /// A triangle corner did not resolve to a deduplicated vertex.
    UnmappedIndex { corner: usize, index: u32 },
    /// The corner list is not made of whole triangles.
    RaggedTriangles { corners: usize },
    /// Position and normal arrays are not co-indexed.
    NormalCountMismatch { vertices: usize, normals: usize },
}

impl std::fmt::Display for WalkMeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalkMeshError::OutOfRange { corner, index, len } => write!(
                f,
                "triangle corner {} references vertex {} but only {} exist",
                corner, index, len
            ),
            WalkMeshError::UnmappedIndex { corner, index } => {
                write!(f, "triangle corner {} (vertex {}) is not mapped to an index", corner, index)
            }
            WalkMeshError::RaggedTriangles { corners } => {
                write!(f, "{} triangle corners is not a multiple of three", corners)
            }
            WalkMeshError::NormalCountMismatch { vertices, normals } => {
                write!(f, "{} vertices but {} normals", vertices, normals)
            }
        }
    }
}

impl std::error::Error for WalkMeshError {}
