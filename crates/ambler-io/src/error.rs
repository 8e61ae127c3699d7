use ambler_walkmesh::WalkMeshError;

fn tag(magic: &[u8; 4]) -> String {
    String::from_utf8_lossy(magic).into_owned()
}

#[derive(Debug)]
pub enum ChunkError {
    Io(std::io::Error),
    BadMagic { expected: [u8; 4], found: [u8; 4] },
    /// Payload length is not a whole number of records.
    BadSize { magic: [u8; 4], len: u32, record: usize },
    /// The stream ended inside the header or payload.
    Truncated { magic: [u8; 4], expected: u64, got: u64 },
}

impl std::fmt::Display for ChunkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkError::Io(e) => write!(f, "chunk read failed: {}", e),
            ChunkError::BadMagic { expected, found } => write!(
                f,
                "expected chunk '{}' but found '{}'",
                tag(expected),
                tag(found)
            ),
            ChunkError::BadSize { magic, len, record } => write!(
                f,
                "chunk '{}' holds {} bytes, not a multiple of the {}-byte record",
                tag(magic),
                len,
                record
            ),
            ChunkError::Truncated { magic, expected, got } => write!(
                f,
                "chunk '{}' truncated: wanted {} bytes, got {}",
                tag(magic),
                expected,
                got
            ),
        }
    }
}

impl std::error::Error for ChunkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChunkError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ChunkError {
    fn from(e: std::io::Error) -> Self {
        ChunkError::Io(e)
    }
}

/// Everything that can go wrong turning a file into a `WalkMesh`.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Chunk(ChunkError),
    Mesh(WalkMeshError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "walk mesh io: {}", e),
            LoadError::Chunk(e) => write!(f, "walk mesh format: {}", e),
            LoadError::Mesh(e) => write!(f, "walk mesh data: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Chunk(e) => Some(e),
            LoadError::Mesh(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<ChunkError> for LoadError {
    fn from(e: ChunkError) -> Self {
        LoadError::Chunk(e)
    }
}

impl From<WalkMeshError> for LoadError {
    fn from(e: WalkMeshError) -> Self {
        LoadError::Mesh(e)
    }
}
