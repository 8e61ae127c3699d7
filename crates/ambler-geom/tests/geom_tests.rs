use ambler_geom::{Aabb, Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_neg_and_left_scalar_mul() {
    let v = Vec3::new(1.0, -2.0, 3.0);
    assert!(vec3_approx_eq(-v, Vec3::new(-1.0, 2.0, -3.0), 1e-6));
    assert!(vec3_approx_eq(2.0 * v, v * 2.0, 1e-6));
    assert!(approx_eq(v.length_squared(), 14.0, 1e-6));
}

#[test]
fn vec3_normalized_zero_is_unchanged() {
    let zn = Vec3::ZERO.normalized();
    assert!(vec3_approx_eq(zn, Vec3::ZERO, 1e-6));
    assert!(zn.is_finite());
}

#[test]
fn vec3_cross_basis() {
    let i = Vec3::new(1.0, 0.0, 0.0);
    let j = Vec3::new(0.0, 1.0, 0.0);
    let k = Vec3::new(0.0, 0.0, 1.0);
    assert!(vec3_approx_eq(i.cross(j), k, 1e-6));
    assert!(vec3_approx_eq(j.cross(k), i, 1e-6));
    assert!(vec3_approx_eq(k.cross(i), j, 1e-6));
}

#[test]
fn quat_axis_angle_quarter_turns() {
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 1.0, 0.0);
    let z = Vec3::new(0.0, 0.0, 1.0);

    // Right-handed: +90° about x takes +y to +z and +z to -y
    let q = Quat::from_axis_angle(x, FRAC_PI_2);
    assert!(vec3_approx_eq(q * y, z, 1e-6));
    assert!(vec3_approx_eq(q * z, -y, 1e-6));
    assert!(vec3_approx_eq(q * x, x, 1e-6));

    // Axis length does not matter
    let q2 = Quat::from_axis_angle(x * 7.5, FRAC_PI_2);
    assert!(vec3_approx_eq(q2 * y, z, 1e-6));
}

#[test]
fn quat_composition_applies_right_first() {
    let z = Vec3::new(0.0, 0.0, 1.0);
    let a = Quat::from_axis_angle(z, FRAC_PI_2);
    let b = Quat::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), FRAC_PI_2);
    let v = Vec3::new(1.0, 0.0, 0.0);
    // b leaves +x alone, then a turns it to +y
    assert!(vec3_approx_eq((a * b) * v, a * (b * v), 1e-6));
    assert!(vec3_approx_eq((a * b) * v, Vec3::new(0.0, 1.0, 0.0), 1e-6));
}

#[test]
fn quat_rotation_arc_cases() {
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 2.0, 0.0);

    let q = Quat::from_rotation_arc(x, y).expect("orthogonal arc");
    assert!(vec3_approx_eq(q * x, Vec3::new(0.0, 1.0, 0.0), 1e-6));

    assert_eq!(Quat::from_rotation_arc(x, x * 3.0), Some(Quat::IDENTITY));
    assert_eq!(Quat::from_rotation_arc(x, -x), None);
    assert_eq!(Quat::from_rotation_arc(Vec3::ZERO, x), None);
    assert_eq!(Quat::from_rotation_arc(x, Vec3::ZERO), None);
}

#[test]
fn quat_normalized_handles_zero() {
    let q = Quat { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };
    assert_eq!(q.normalized(), Quat::IDENTITY);
    let s = Quat { x: 0.0, y: 0.0, z: 0.0, w: 2.0 }.normalized();
    assert!(approx_eq(s.w, 1.0, 1e-6));
}

#[test]
fn aabb_from_points_and_queries() {
    assert_eq!(Aabb::from_points(std::iter::empty()), None);

    let pts = [
        Vec3::new(1.0, 2.0, 3.0),
        Vec3::new(-1.0, 4.0, 0.0),
        Vec3::new(0.5, -2.0, 5.0),
    ];
    let b = Aabb::from_points(pts).expect("non-empty");
    assert!(vec3_approx_eq(b.min, Vec3::new(-1.0, -2.0, 0.0), 1e-6));
    assert!(vec3_approx_eq(b.max, Vec3::new(1.0, 4.0, 5.0), 1e-6));
    assert!(vec3_approx_eq(b.center(), Vec3::new(0.0, 1.0, 2.5), 1e-6));
    assert!(vec3_approx_eq(b.size(), Vec3::new(2.0, 6.0, 5.0), 1e-6));
    for p in pts {
        assert!(b.contains(p));
    }
    assert!(!b.contains(Vec3::new(2.0, 0.0, 0.0)));
}
