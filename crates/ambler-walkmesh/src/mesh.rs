use ambler_geom::{Aabb, Vec3};
use hashbrown::HashMap;
use serde::Deserialize;

use crate::error::WalkMeshError;

/// Squared sine of the corner angle below which a triangle counts as degenerate.
const SLIVER_SIN2: f32 = 1e-12;

/// One packed vertex record as stored in a mesh asset. Color is carried
/// through but never read by the walk mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub color: [u8; 4],
}

/// Tuning for step integration.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct WalkParams {
    /// Upper bound on planar segments (and so triangle crossings) per `walk` call.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Weight moved off a corner before stepping from a vertex.
    #[serde(default = "default_vertex_offset")]
    pub vertex_offset: f32,
}

fn default_max_iterations() -> u32 {
    6
}
fn default_vertex_offset() -> f32 {
    0.001
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            vertex_offset: default_vertex_offset(),
        }
    }
}

/// Counts reported after load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    pub vertices: usize,
    pub triangles: usize,
    /// Directed edges whose reverse is not in the mesh.
    pub boundary_edges: usize,
    /// Directed edges claimed by more than one triangle.
    pub duplicate_edges: usize,
}

/// Immutable walkable surface: deduplicated vertices, co-indexed normals,
/// CCW triangles and the directed-edge adjacency index.
#[derive(Clone, Debug)]
pub struct WalkMesh {
    vertices: Vec<Vec3>,
    vertex_normals: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    // (a, b) -> c for every triangle (a, b, c) and its rotations
    next_vertex: HashMap<(u32, u32), u32>,
    duplicate_edges: usize,
    pub(crate) params: WalkParams,
}

// -0.0 and 0.0 compare equal, so they must hash equal.
#[inline]
fn position_key(p: Vec3) -> [u32; 3] {
    let bits = |v: f32| if v == 0.0 { 0u32 } else { v.to_bits() };
    [bits(p.x), bits(p.y), bits(p.z)]
}

impl WalkMesh {
    /// Build from raw asset records. Vertices sharing an exact position are
    /// merged (the first record's normal is kept) and `corners` is read as
    /// consecutive triples of raw-vertex indices.
    pub fn from_raw(raw: &[RawVertex], corners: &[u32]) -> Result<Self, WalkMeshError> {
        if corners.len() % 3 != 0 {
            return Err(WalkMeshError::RaggedTriangles {
                corners: corners.len(),
            });
        }

        let mut vertices: Vec<Vec3> = Vec::new();
        let mut vertex_normals: Vec<Vec3> = Vec::new();
        let mut seen: HashMap<[u32; 3], u32> = HashMap::with_capacity(raw.len());
        let mut ref_to_index: Vec<u32> = Vec::with_capacity(raw.len());
        for v in raw {
            let idx = *seen.entry(position_key(v.position)).or_insert_with(|| {
                vertices.push(v.position);
                vertex_normals.push(v.normal);
                (vertices.len() - 1) as u32
            });
            ref_to_index.push(idx);
        }

        let mut triangles = Vec::with_capacity(corners.len() / 3);
        for (t, tri) in corners.chunks_exact(3).enumerate() {
            let mut resolved = [0u32; 3];
            for (k, &r) in tri.iter().enumerate() {
                let corner = t * 3 + k;
                resolved[k] = *ref_to_index.get(r as usize).ok_or(WalkMeshError::OutOfRange {
                    corner,
                    index: r,
                    len: raw.len(),
                })?;
            }
            triangles.push(resolved);
        }

        let merged = raw.len() - vertices.len();
        if merged > 0 {
            log::debug!("walk mesh: merged {} duplicate vertex position(s)", merged);
        }
        Self::new(vertices, vertex_normals, triangles)
    }

    /// Build from already-deduplicated data.
    pub fn new(
        vertices: Vec<Vec3>,
        vertex_normals: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
    ) -> Result<Self, WalkMeshError> {
        if vertices.len() != vertex_normals.len() {
            return Err(WalkMeshError::NormalCountMismatch {
                vertices: vertices.len(),
                normals: vertex_normals.len(),
            });
        }

        let mut next_vertex = HashMap::with_capacity(triangles.len() * 3);
        let mut duplicate_edges = 0usize;
        for (t, &[a, b, c]) in triangles.iter().enumerate() {
            for (k, &i) in [a, b, c].iter().enumerate() {
                if i as usize >= vertices.len() {
                    return Err(WalkMeshError::UnmappedIndex {
                        corner: t * 3 + k,
                        index: i,
                    });
                }
            }
            for (from, to, opposite) in [(a, b, c), (b, c, a), (c, a, b)] {
                if next_vertex.insert((from, to), opposite).is_some() {
                    duplicate_edges += 1;
                }
            }
        }
        if duplicate_edges > 0 {
            log::warn!(
                "walk mesh: {} directed edge(s) shared by more than one triangle; mesh is non-manifold or inconsistently wound",
                duplicate_edges
            );
        }

        Ok(Self {
            vertices,
            vertex_normals,
            triangles,
            next_vertex,
            duplicate_edges,
            params: WalkParams::default(),
        })
    }

    pub fn with_params(mut self, params: WalkParams) -> Self {
        self.params = params;
        self
    }

    #[inline]
    pub fn params(&self) -> &WalkParams {
        &self.params
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    #[inline]
    pub fn vertex_normals(&self) -> &[Vec3] {
        &self.vertex_normals
    }

    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Third vertex of the triangle holding directed edge `a -> b`.
    #[inline]
    pub fn next_vertex(&self, a: u32, b: u32) -> Option<u32> {
        self.next_vertex.get(&(a, b)).copied()
    }

    #[inline]
    pub(crate) fn corners(&self, tri: [u32; 3]) -> [Vec3; 3] {
        tri.map(|i| self.vertices[i as usize])
    }

    #[inline]
    pub(crate) fn corner_normals(&self, tri: [u32; 3]) -> [Vec3; 3] {
        tri.map(|i| self.vertex_normals[i as usize])
    }

    /// True when the triangle has no usable area: repeated corners, or
    /// edges from the first corner within ~1e-6 rad of collinear.
    #[inline]
    pub(crate) fn is_degenerate(&self, tri: [u32; 3]) -> bool {
        let [x, y, z] = self.corners(tri);
        let (e0, e1) = (y - x, z - x);
        let area2 = e0.cross(e1).length_squared();
        !(area2 > SLIVER_SIN2 * e0.length_squared() * e1.length_squared())
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().copied())
    }

    pub fn stats(&self) -> MeshStats {
        let boundary_edges = self
            .next_vertex
            .keys()
            .filter(|&&(a, b)| !self.next_vertex.contains_key(&(b, a)))
            .count();
        MeshStats {
            vertices: self.vertices.len(),
            triangles: self.triangles.len(),
            boundary_edges,
            duplicate_edges: self.duplicate_edges,
        }
    }
}
