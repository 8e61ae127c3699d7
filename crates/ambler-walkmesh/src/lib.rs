//! Walkable-surface mesh: constrains an agent to a triangulated manifold.
//!
//! A [`WalkMesh`] is built once from vertex/triangle data and then shared
//! read-only. Each agent owns a [`WalkPoint`] that is placed with
//! [`WalkMesh::start`], advanced with [`WalkMesh::walk`] and read back with
//! [`WalkMesh::world_point`] / [`WalkMesh::world_normal`].
#![forbid(unsafe_code)]

pub mod error;
mod locate;
pub mod mesh;
pub mod point;
pub mod triangle;
mod walk;

pub use error::WalkMeshError;
pub use mesh::{MeshStats, RawVertex, WalkMesh, WalkParams};
pub use point::{BARY_EPS, Barycentric, WalkPoint};
pub use triangle::{barycentric_to_world, closest_point_on_triangle, face_normal, world_to_barycentric};
