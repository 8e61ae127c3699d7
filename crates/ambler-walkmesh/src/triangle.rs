//! Closed-form triangle queries shared by point location and the integrator.

use ambler_geom::Vec3;

use crate::point::Barycentric;

/// Closest point to `p` on triangle `(x, y, z)`, interior and boundary included.
///
/// Minimizes `|x + s*(y-x) + t*(z-x) - p|` over the triangle `s, t >= 0,
/// s + t <= 1`, classifying the unconstrained minimum into one of the six
/// regions around the triangle and clamping onto the matching edge or vertex.
pub fn closest_point_on_triangle(x: Vec3, y: Vec3, z: Vec3, p: Vec3) -> Vec3 {
    let edge0 = y - x;
    let edge1 = z - x;
    let v0 = x - p;

    let a = edge0.dot(edge0);
    let b = edge0.dot(edge1);
    let c = edge1.dot(edge1);
    let d = edge0.dot(v0);
    let e = edge1.dot(v0);

    let det = a * c - b * b;
    let mut s = b * e - c * d;
    let mut t = b * d - a * e;

    if s + t < det {
        if s < 0.0 {
            if t < 0.0 {
                // region 4
                if d < 0.0 {
                    s = clamp01(-d / a);
                    t = 0.0;
                } else {
                    s = 0.0;
                    t = clamp01(-e / c);
                }
            } else {
                // region 3
                s = 0.0;
                t = clamp01(-e / c);
            }
        } else if t < 0.0 {
            // region 5
            s = clamp01(-d / a);
            t = 0.0;
        } else {
            // region 0: interior
            let inv_det = 1.0 / det;
            s *= inv_det;
            t *= inv_det;
        }
    } else if s < 0.0 {
        // region 2
        let tmp0 = b + d;
        let tmp1 = c + e;
        if tmp1 > tmp0 {
            let numer = tmp1 - tmp0;
            let denom = a - 2.0 * b + c;
            s = clamp01(numer / denom);
            t = 1.0 - s;
        } else {
            s = 0.0;
            t = clamp01(-e / c);
        }
    } else if t < 0.0 {
        // region 6
        if a + d > b + e {
            let numer = c + e - b - d;
            let denom = a - 2.0 * b + c;
            s = clamp01(numer / denom);
            t = 1.0 - s;
        } else {
            s = clamp01(-d / a);
            t = 0.0;
        }
    } else {
        // region 1
        let numer = c + e - b - d;
        let denom = a - 2.0 * b + c;
        s = clamp01(numer / denom);
        t = 1.0 - s;
    }

    x + edge0 * s + edge1 * t
}

// NaN passes through f32::clamp; a zero-length edge makes the ratio NaN.
#[inline]
fn clamp01(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Barycentric weights of `p` projected onto the plane of `(x, y, z)`.
///
/// Degenerate (zero-area) triangles yield non-finite weights.
pub fn world_to_barycentric(x: Vec3, y: Vec3, z: Vec3, p: Vec3) -> Barycentric {
    let edge0 = y - x;
    let edge1 = z - x;
    let v0 = x - p;
    let a = edge0.dot(edge0);
    let b = edge0.dot(edge1);
    let c = edge1.dot(edge1);
    let d = v0.dot(edge0);
    let e = v0.dot(edge1);
    let inv_denom = 1.0 / (a * c - b * b);
    let v = (b * e - c * d) * inv_denom;
    let w = (b * d - a * e) * inv_denom;
    Barycentric::new(1.0 - v - w, v, w)
}

/// Weighted sum of the corners. With weights summing to zero this maps a
/// barycentric displacement to a world-space vector.
#[inline]
pub fn barycentric_to_world(x: Vec3, y: Vec3, z: Vec3, w: &Barycentric) -> Vec3 {
    x * w[0] + y * w[1] + z * w[2]
}

/// Unit normal of a CCW triangle; zero for a degenerate one.
#[inline]
pub fn face_normal(x: Vec3, y: Vec3, z: Vec3) -> Vec3 {
    (y - x).cross(z - x).normalized()
}
