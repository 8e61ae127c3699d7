use ambler_geom::Vec3;

use crate::mesh::WalkMesh;
use crate::point::WalkPoint;
use crate::triangle::{barycentric_to_world, closest_point_on_triangle, world_to_barycentric};

impl WalkMesh {
    /// Snap an arbitrary world point to the closest point on the surface.
    ///
    /// Brute-force over every triangle with nonzero area. Exact ties keep the
    /// triangle that comes first in mesh order. A mesh with no such triangle
    /// returns the sentinel `WalkPoint::default()`.
    pub fn start(&self, world_point: Vec3) -> WalkPoint {
        let mut walk_point = WalkPoint::default();
        let mut distance = f32::MAX;

        for &tri in self.triangles() {
            if self.is_degenerate(tri) {
                continue;
            }
            let [x, y, z] = self.corners(tri);
            let closest = closest_point_on_triangle(x, y, z, world_point);
            let dist = (world_point - closest).length();
            if dist < distance {
                distance = dist;
                walk_point.triangle = tri;
                walk_point.weights = world_to_barycentric(x, y, z, closest);
            }
        }

        if walk_point.is_valid() {
            walk_point.weights.settle();
        } else {
            log::warn!("walk mesh: start({:?}) found no triangle", world_point);
        }
        walk_point
    }

    /// World-space position of `wp`.
    #[inline]
    pub fn world_point(&self, wp: &WalkPoint) -> Vec3 {
        let [x, y, z] = self.corners(wp.triangle);
        barycentric_to_world(x, y, z, &wp.weights)
    }

    /// Smooth surface normal at `wp`: the normalized blend of the corner normals.
    #[inline]
    pub fn world_normal(&self, wp: &WalkPoint) -> Vec3 {
        let [x, y, z] = self.corner_normals(wp.triangle);
        barycentric_to_world(x, y, z, &wp.weights).normalized()
    }
}
