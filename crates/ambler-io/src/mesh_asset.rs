use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use ambler_geom::Vec3;
use ambler_walkmesh::{RawVertex, WalkMesh};
use bytemuck::{Pod, Zeroable};

use crate::chunk::{read_chunk, write_chunk};
use crate::error::LoadError;

pub const VERTEX_MAGIC: &[u8; 4] = b"pnc.";
pub const STRINGS_MAGIC: &[u8; 4] = b"str0";
pub const INDEX_MAGIC: &[u8; 4] = b"idx0";
pub const TRIANGLE_MAGIC: &[u8; 4] = b"tri0";

/// Position, normal, color: 28 bytes, no padding.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PncVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [u8; 4],
}

const _: () = assert!(std::mem::size_of::<PncVertex>() == 28);

impl From<PncVertex> for RawVertex {
    fn from(v: PncVertex) -> Self {
        RawVertex {
            position: Vec3::from_array(v.position),
            normal: Vec3::from_array(v.normal),
            color: v.color,
        }
    }
}

impl From<&RawVertex> for PncVertex {
    fn from(v: &RawVertex) -> Self {
        PncVertex {
            position: v.position.to_array(),
            normal: v.normal.to_array(),
            color: v.color,
        }
    }
}

/// Parse a walk-mesh asset: `pnc.` vertices, `str0` and `idx0` (skipped),
/// then `tri0` corner indices into the vertex chunk.
pub fn read_walk_mesh<R: Read>(reader: &mut R) -> Result<WalkMesh, LoadError> {
    let vertices: Vec<PncVertex> = read_chunk(reader, VERTEX_MAGIC)?;
    let _strings: Vec<u8> = read_chunk(reader, STRINGS_MAGIC)?;
    let _index: Vec<u8> = read_chunk(reader, INDEX_MAGIC)?;
    let corners: Vec<u32> = read_chunk(reader, TRIANGLE_MAGIC)?;

    let mut extra = [0u8; 1];
    if reader.read(&mut extra)? != 0 {
        log::warn!("walk mesh: ignoring trailing data after '{}' chunk", String::from_utf8_lossy(TRIANGLE_MAGIC));
    }

    let raw: Vec<RawVertex> = vertices.into_iter().map(RawVertex::from).collect();
    Ok(WalkMesh::from_raw(&raw, &corners)?)
}

pub fn load_walk_mesh(path: impl AsRef<Path>) -> Result<WalkMesh, LoadError> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let mesh = read_walk_mesh(&mut reader)?;
    let stats = mesh.stats();
    log::info!(
        "loaded walk mesh {}: {} vertices, {} triangles, {} boundary edges",
        path.display(),
        stats.vertices,
        stats.triangles,
        stats.boundary_edges
    );
    Ok(mesh)
}

/// Write `vertices` and `corners` (raw-vertex index triples) as an asset
/// `read_walk_mesh` accepts. The string and index chunks are left empty.
pub fn write_walk_mesh<W: Write>(writer: &mut W, vertices: &[RawVertex], corners: &[u32]) -> std::io::Result<()> {
    let packed: Vec<PncVertex> = vertices.iter().map(PncVertex::from).collect();
    write_chunk(writer, VERTEX_MAGIC, &packed)?;
    write_chunk::<u8, _>(writer, STRINGS_MAGIC, &[])?;
    write_chunk::<u8, _>(writer, INDEX_MAGIC, &[])?;
    write_chunk(writer, TRIANGLE_MAGIC, corners)
}
