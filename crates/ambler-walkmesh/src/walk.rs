//! Step integration: advance a `WalkPoint` along the surface by a world-space
//! displacement, crossing shared edges and sliding along open ones.
//!
//! Each iteration moves in the plane of the current triangle until either the
//! displacement is used up or a barycentric weight reaches zero. A zero weight
//! means the point is on the edge opposite that corner; the adjacency index
//! says whether a neighbour owns the reverse of that edge. If so the point and
//! the leftover displacement are carried over (the leftover is folded about the
//! shared edge into the neighbour's plane). If not, the leftover is turned to
//! run along the blocking edge.

use ambler_geom::{Quat, Vec3};

use crate::mesh::WalkMesh;
use crate::point::{BARY_EPS, Barycentric, WalkPoint};
use crate::triangle::{barycentric_to_world, face_normal, world_to_barycentric};

/// Leftover displacements within this cosine of perpendicular to a blocking
/// edge stop instead of sliding; the slide direction would be arbitrary.
const HEAD_ON_COS: f32 = 1e-4;

/// Corners spanning the edge opposite each axis, ordered as the neighbouring
/// triangle winds them. Axis 0 of `(a, b, c)` faces edge `b -> c`, so the
/// neighbour across it holds `c -> b`.
const OPPOSITE_EDGE: [[usize; 2]; 3] = [[2, 1], [0, 2], [1, 0]];

impl WalkMesh {
    /// Move `wp` along the surface by `step` (world space).
    ///
    /// The point never leaves the mesh. Motion that cannot be completed
    /// (mesh boundary hit head-on, a degenerate triangle, a numerically
    /// invalid advance, or the iteration cap) is dropped and `wp` keeps its
    /// last consistent state.
    pub fn walk(&self, wp: &mut WalkPoint, step: Vec3) {
        if !wp.is_valid() {
            log::warn!("walk mesh: walk() called with an unplaced walk point");
            return;
        }
        if !step.is_finite() {
            log::warn!("walk mesh: ignoring non-finite step {:?}", step);
            return;
        }
        if step.length_squared() == 0.0 {
            return;
        }

        let mut leftover = step;
        let mut remaining = 1.0f32;

        for iteration in 0..self.params.max_iterations {
            nudge_off_vertex(&mut wp.weights, self.params.vertex_offset);

            let corners = self.corners(wp.triangle);
            let [x, y, z] = corners;
            let here = barycentric_to_world(x, y, z, &wp.weights);
            let target = world_to_barycentric(x, y, z, here + leftover);
            if !target.is_finite() {
                log::debug!("walk: degenerate triangle {:?}; stopping", wp.triangle);
                return;
            }

            let mut delta = target.sub(&wp.weights);
            // Motion along an edge the point already sits on keeps that weight at zero.
            for i in 0..3 {
                if wp.weights[i] == 0.0 && delta[i].abs() < BARY_EPS {
                    delta[i] = 0.0;
                }
            }

            let t_axis: [f32; 3] = core::array::from_fn(|i| crossing_parameter(wp.weights[i], delta[i]));
            let mut t_final = t_axis.iter().copied().fold(1.0f32, f32::min);
            // Already on an edge and pushing further out: resolve at the current position.
            if (0..3).any(|i| wp.weights[i] == 0.0 && delta[i] < 0.0) {
                t_final = 0.0;
            }

            let mut end = wp.weights.add_scaled(&delta, t_final);
            for i in 0..3 {
                if t_axis[i] == t_final || end[i].abs() < BARY_EPS {
                    end[i] = 0.0;
                }
            }
            remaining *= 1.0 - t_final;

            log::trace!(
                "walk[{}] tri={:?} w={:?} delta={:?} t={} remaining={}",
                iteration,
                wp.triangle,
                wp.weights.0,
                delta.0,
                t_final,
                remaining
            );

            if end.any_negative() {
                log::debug!("walk: negative weights {:?} after advance; stopping", end.0);
                return;
            }
            if t_final >= 1.0 {
                end.settle();
                wp.weights = end;
                return;
            }

            let hit: [bool; 3] = core::array::from_fn(|i| end[i] == 0.0 && delta[i] < 0.0);
            end.settle();
            let Some(first_hit) = hit.iter().position(|&h| h) else {
                wp.weights = end;
                return;
            };
            let left_world = barycentric_to_world(x, y, z, &target.sub(&end));

            // Cross into the first hit edge whose neighbour has area. A
            // zero-area neighbour is treated as an open edge.
            let crossing = (0..3).filter(|&axis| hit[axis]).find_map(|axis| {
                let [i, j] = OPPOSITE_EDGE[axis];
                let (a, b) = (wp.triangle[i], wp.triangle[j]);
                let c = self.next_vertex(a, b)?;
                if self.is_degenerate([a, b, c]) {
                    log::debug!("walk: neighbour {:?} has no area; treating edge as open", [a, b, c]);
                    return None;
                }
                Some(([a, b, c], Barycentric::new(end[i], end[j], 0.0)))
            });

            if let Some((next_tri, next_weights)) = crossing {
                let [na, nb, nc] = self.corners(next_tri);
                leftover = match fold_across(
                    face_normal(x, y, z),
                    face_normal(na, nb, nc),
                    nb - na,
                    left_world,
                ) {
                    Some(v) => v,
                    None => {
                        log::debug!("walk: no fold between {:?} and {:?}; carrying step unrotated", wp.triangle, next_tri);
                        left_world
                    }
                };
                wp.triangle = next_tri;
                wp.weights = next_weights;
                continue;
            }

            // Mesh boundary: slide along the blocking edge.
            wp.weights = end;
            if end.vertex_axis().is_some() {
                return;
            }
            let [i, j] = OPPOSITE_EDGE[first_hit];
            match slide_along(left_world, corners[j] - corners[i]) {
                Some(v) => leftover = v,
                None => return,
            }
        }

        log::debug!(
            "walk: iteration cap ({}) reached with {:.3} of the step unspent",
            self.params.max_iterations,
            remaining
        );
    }
}

/// Step parameter at which a weight `w` moving by `d` reaches zero, or
/// infinity if it never does going forward.
#[inline]
fn crossing_parameter(w: f32, d: f32) -> f32 {
    if d < 0.0 {
        let t = -w / d;
        if t > 0.0 {
            return t;
        }
    }
    f32::INFINITY
}

/// Shift a point sitting exactly on a corner a little toward the next corner,
/// so the edge it leaves through is unambiguous.
fn nudge_off_vertex(w: &mut Barycentric, offset: f32) {
    if let Some(i) = w.vertex_axis() {
        w[i] -= offset;
        w[(i + 1) % 3] += offset;
    }
}

/// Rotate `v` about the shared edge by the dihedral angle taking
/// `from_normal` onto `to_normal`.
fn fold_across(from_normal: Vec3, to_normal: Vec3, edge: Vec3, v: Vec3) -> Option<Vec3> {
    if from_normal == Vec3::ZERO || to_normal == Vec3::ZERO || edge.length_squared() == 0.0 {
        return None;
    }
    let axis = edge.normalized();
    let angle = from_normal.cross(to_normal).dot(axis).atan2(from_normal.dot(to_normal));
    let out = Quat::from_axis_angle(axis, angle) * v;
    out.is_finite().then_some(out)
}

/// Turn `v` onto whichever direction of `edge` it leans toward, keeping its length.
fn slide_along(v: Vec3, edge: Vec3) -> Option<Vec3> {
    let from = v.normalized();
    let along = edge.normalized();
    let cos = from.dot(along);
    if !cos.is_finite() || cos.abs() < HEAD_ON_COS {
        return None;
    }
    let to = if cos > 0.0 { along } else { -along };
    let out = Quat::from_rotation_arc(from, to)? * v;
    out.is_finite().then_some(out)
}
