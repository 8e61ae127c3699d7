//! Binary walk-mesh assets: little-endian chunk framing plus the packed
//! position/normal/color vertex record.
#![forbid(unsafe_code)]

pub mod chunk;
pub mod error;
pub mod mesh_asset;

pub use chunk::{read_chunk, write_chunk};
pub use error::{ChunkError, LoadError};
pub use mesh_asset::{PncVertex, load_walk_mesh, read_walk_mesh, write_walk_mesh};
