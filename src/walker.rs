use ambler_geom::{Quat, Vec3};
use ambler_walkmesh::{WalkMesh, WalkPoint};

/// Movement keys held during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveInput {
    /// Parse a key string such as `"f"`, `"fl"` or `""` (`f`/`b`/`l`/`r`).
    pub fn parse(keys: &str) -> Result<Self, String> {
        let mut input = MoveInput::default();
        for c in keys.chars() {
            match c.to_ascii_lowercase() {
                'f' => input.forward = true,
                'b' => input.backward = true,
                'l' => input.left = true,
                'r' => input.right = true,
                other => return Err(format!("unknown movement key '{}' (expected f, b, l, r)", other)),
            }
        }
        Ok(input)
    }

    #[inline]
    fn axis(pos: bool, neg: bool) -> f32 {
        (pos as i32 - neg as i32) as f32
    }
}

/// An agent glued to a walk mesh. `forward`, `right` and `up` stay an
/// orthonormal frame with `up` following the surface normal.
#[derive(Clone, Debug)]
pub struct Walker {
    pub at: WalkPoint,
    pub pos: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub speed: f32, // units/s
}

impl Walker {
    /// Place a walker at the surface point closest to `at`. `None` on an empty mesh.
    pub fn spawn(mesh: &WalkMesh, at: Vec3, forward_hint: Vec3, speed: f32) -> Option<Self> {
        let wp = mesh.start(at);
        if !wp.is_valid() {
            return None;
        }
        let up = surface_up(mesh.world_normal(&wp), Vec3::UP);
        let forward = tangent(forward_hint, up);
        let pos = mesh.world_point(&wp);
        log::info!(target: "walker", "spawned at ({:.3}, {:.3}, {:.3}) on {:?}", pos.x, pos.y, pos.z, wp.triangle);
        Some(Self {
            at: wp,
            pos,
            up,
            forward,
            right: forward.cross(up),
            speed,
        })
    }

    /// Rotate the heading about `up` (radians, counter-clockwise seen from above).
    pub fn turn(&mut self, yaw: f32) {
        if yaw == 0.0 {
            return;
        }
        self.forward = tangent(Quat::from_axis_angle(self.up, yaw) * self.forward, self.up);
        self.right = self.forward.cross(self.up);
    }

    pub fn update(&mut self, mesh: &WalkMesh, input: MoveInput, dt: f32) {
        let wish = self.forward * MoveInput::axis(input.forward, input.backward)
            + self.right * MoveInput::axis(input.right, input.left);
        if wish.length_squared() == 0.0 {
            return;
        }
        let step = wish.normalized() * (self.speed * dt);
        mesh.walk(&mut self.at, step);
        self.pos = mesh.world_point(&self.at);

        // Carry the heading over the change in surface orientation.
        let up = surface_up(mesh.world_normal(&self.at), self.up);
        if let Some(q) = Quat::from_rotation_arc(self.up, up) {
            self.forward = q * self.forward;
        }
        self.up = up;
        self.forward = tangent(self.forward, up);
        self.right = self.forward.cross(up);

        log::debug!(
            target: "walker",
            "pos=({:.3}, {:.3}, {:.3}) up=({:.2}, {:.2}, {:.2}) tri={:?}",
            self.pos.x,
            self.pos.y,
            self.pos.z,
            up.x,
            up.y,
            up.z,
            self.at.triangle
        );
    }
}

// Blended normals can cancel on sharp creases; keep the previous up then.
fn surface_up(normal: Vec3, fallback: Vec3) -> Vec3 {
    if normal.length_squared() > 1e-12 { normal } else { fallback }
}

/// `v` with its `up` component removed, normalized. Falls back to any
/// direction perpendicular to `up` when `v` is (nearly) parallel to it.
fn tangent(v: Vec3, up: Vec3) -> Vec3 {
    let t = v - up * v.dot(up);
    if t.length_squared() > 1e-8 {
        return t.normalized();
    }
    let seed = if up.x.abs() < 0.9 { Vec3::new(1.0, 0.0, 0.0) } else { Vec3::new(0.0, 1.0, 0.0) };
    up.cross(seed).normalized()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    fn assert_frame(w: &Walker) {
        assert!((w.up.length() - 1.0).abs() < 1e-4);
        assert!((w.forward.length() - 1.0).abs() < 1e-4);
        assert!((w.right.length() - 1.0).abs() < 1e-4);
        assert!(w.forward.dot(w.up).abs() < 1e-4);
        assert!(w.right.dot(w.up).abs() < 1e-4);
        assert!(w.right.dot(w.forward).abs() < 1e-4);
    }

    fn floor() -> WalkMesh {
        let vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(4.0, 4.0, 0.0),
            Vec3::new(0.0, 4.0, 0.0),
        ];
        WalkMesh::new(vertices, vec![Vec3::UP; 4], vec![[0, 1, 2], [0, 2, 3]]).unwrap()
    }

    fn hinge() -> WalkMesh {
        let h = 0.5f32.sqrt();
        let vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(1.0, -2.0, 0.0),
            Vec3::new(1.0, 0.0, 2.0),
        ];
        let normals = vec![
            Vec3::new(0.0, -h, h),
            Vec3::new(0.0, -h, h),
            Vec3::UP,
            Vec3::new(0.0, -1.0, 0.0),
        ];
        WalkMesh::new(vertices, normals, vec![[0, 2, 1], [0, 1, 3]]).unwrap()
    }

    #[test]
    fn parse_keys() {
        let input = MoveInput::parse("fR").unwrap();
        assert!(input.forward && input.right && !input.backward && !input.left);
        assert_eq!(MoveInput::parse("").unwrap(), MoveInput::default());
        assert!(MoveInput::parse("fx").is_err());
    }

    #[test]
    fn spawn_snaps_and_builds_frame() {
        let mesh = floor();
        let w = Walker::spawn(&mesh, Vec3::new(1.0, 1.5, 3.0), Vec3::new(0.0, 2.0, 1.0), 2.0).unwrap();
        assert!(near(w.pos, Vec3::new(1.0, 1.5, 0.0)));
        assert!(near(w.up, Vec3::UP));
        assert!(near(w.forward, Vec3::new(0.0, 1.0, 0.0)));
        assert!(near(w.right, Vec3::new(1.0, 0.0, 0.0)));
        assert_frame(&w);

        // Hint straight along up still yields a usable heading.
        let w = Walker::spawn(&mesh, Vec3::new(1.0, 1.5, 0.0), Vec3::UP, 2.0).unwrap();
        assert_frame(&w);
    }

    #[test]
    fn spawn_on_empty_mesh_fails() {
        let mesh = WalkMesh::new(Vec::new(), Vec::new(), Vec::new()).unwrap();
        assert!(Walker::spawn(&mesh, Vec3::ZERO, Vec3::UP, 1.0).is_none());
    }

    #[test]
    fn moves_at_speed_and_cancels_opposed_keys() {
        let mesh = floor();
        let mut w = Walker::spawn(&mesh, Vec3::new(1.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 2.0).unwrap();
        w.update(&mesh, MoveInput { forward: true, ..Default::default() }, 0.25);
        assert!(near(w.pos, Vec3::new(1.0, 1.5, 0.0)));

        w.update(&mesh, MoveInput { forward: true, backward: true, ..Default::default() }, 0.25);
        assert!(near(w.pos, Vec3::new(1.0, 1.5, 0.0)));

        // Diagonal input is normalized to the same speed.
        w.update(&mesh, MoveInput { forward: true, right: true, ..Default::default() }, 0.5);
        let d = 0.5f32.sqrt();
        assert!(near(w.pos, Vec3::new(1.0 + d, 1.5 + d, 0.0)));
        assert_frame(&w);
    }

    #[test]
    fn turn_rotates_heading_about_up() {
        let mesh = floor();
        let mut w = Walker::spawn(&mesh, Vec3::new(2.0, 2.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 1.0).unwrap();
        w.turn(std::f32::consts::FRAC_PI_2);
        assert!(near(w.forward, Vec3::new(-1.0, 0.0, 0.0)));
        assert!(near(w.right, Vec3::new(0.0, 1.0, 0.0)));
        w.update(&mesh, MoveInput { forward: true, ..Default::default() }, 1.0);
        assert!(near(w.pos, Vec3::new(1.0, 2.0, 0.0)));
    }

    #[test]
    fn frame_follows_surface_over_a_crease() {
        let mesh = hinge();
        let mut w = Walker::spawn(&mesh, Vec3::new(1.0, -0.5, 0.0), Vec3::new(0.0, 1.0, 0.0), 1.0).unwrap();
        assert!(w.up.z > w.up.y.abs());
        assert!(w.forward.y > 0.0);

        w.update(&mesh, MoveInput { forward: true, ..Default::default() }, 1.0);
        assert_eq!(w.at.triangle, [0, 1, 3]);
        assert!(w.pos.z > 0.0 && w.pos.y.abs() < 1e-4);
        assert!(w.up.y < 0.0 && w.up.y.abs() > w.up.z);
        // Heading now climbs the wall.
        assert!(w.forward.z > 0.0);
        assert_frame(&w);
    }

    fn rolling_hills() -> WalkMesh {
        let n = 6u32;
        let height = |x: f32, y: f32| 0.4 * (x * 0.9).sin() * (y * 0.7).cos();
        let idx = |i: u32, j: u32| j * (n + 1) + i;
        let mut vertices = Vec::new();
        let mut normals = Vec::new();
        for j in 0..=n {
            for i in 0..=n {
                let (x, y) = (i as f32, j as f32);
                vertices.push(Vec3::new(x, y, height(x, y)));
                let dx = 0.36 * (x * 0.9).cos() * (y * 0.7).cos();
                let dy = -0.28 * (x * 0.9).sin() * (y * 0.7).sin();
                normals.push(Vec3::new(-dx, -dy, 1.0).normalized());
            }
        }
        let mut triangles = Vec::new();
        for j in 0..n {
            for i in 0..n {
                triangles.push([idx(i, j), idx(i + 1, j), idx(i + 1, j + 1)]);
                triangles.push([idx(i, j), idx(i + 1, j + 1), idx(i, j + 1)]);
            }
        }
        WalkMesh::new(vertices, normals, triangles).unwrap()
    }

    proptest::proptest! {
        #[test]
        fn frame_stays_orthonormal_while_roaming(
            keys in proptest::collection::vec(0u8..16, 1..60),
            yaw in -0.2f32..0.2,
            sx in 0.5f32..5.5,
            sy in 0.5f32..5.5,
        ) {
            let mesh = rolling_hills();
            let mut w = Walker::spawn(&mesh, Vec3::new(sx, sy, 1.0), Vec3::new(1.0, 0.3, 0.0), 3.0).unwrap();
            for k in keys {
                let input = MoveInput {
                    forward: k & 1 != 0,
                    backward: k & 2 != 0,
                    left: k & 4 != 0,
                    right: k & 8 != 0,
                };
                w.turn(yaw);
                w.update(&mesh, input, 1.0 / 30.0);
                proptest::prop_assert!(w.at.is_valid());
                proptest::prop_assert!(w.forward.dot(w.up).abs() < 1e-3);
                proptest::prop_assert!((w.forward.length() - 1.0).abs() < 1e-3);
                proptest::prop_assert!((w.up.length() - 1.0).abs() < 1e-3);
                proptest::prop_assert!((w.right.length() - 1.0).abs() < 1e-3);
            }
        }
    }
}
