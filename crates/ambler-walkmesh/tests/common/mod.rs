#![allow(dead_code)]

use ambler_geom::Vec3;
use ambler_walkmesh::WalkMesh;

pub const UP: Vec3 = Vec3::new(0.0, 0.0, 1.0);

pub fn near(a: Vec3, b: Vec3, eps: f32) -> bool {
    (a - b).length() <= eps
}

/// Unit square in z = 0 split along the 0-2 diagonal:
/// triangle 0 = (0,1,2) below the diagonal, triangle 1 = (0,2,3) above it.
pub fn square() -> WalkMesh {
    let vertices = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    WalkMesh::new(vertices, vec![UP; 4], vec![[0, 1, 2], [0, 2, 3]]).unwrap()
}

/// Triangle (0,1,2) of the unit square plus a zero-area neighbour (0,2,3)
/// across the diagonal, with v3 at the diagonal's midpoint.
pub fn square_with_sliver() -> WalkMesh {
    let vertices = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.5, 0.5, 0.0),
    ];
    WalkMesh::new(vertices, vec![UP; 4], vec![[0, 1, 2], [0, 2, 3]]).unwrap()
}

/// A floor (z = 0, y < 0) meeting a wall (y = 0, z > 0) along the x axis
/// from (0,0,0) to (2,0,0). The walkable side of the wall faces -y.
pub fn hinge() -> WalkMesh {
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
        UP,
        Vec3::new(0.0, -1.0, 0.0),
    ];
    WalkMesh::new(vertices, normals, vec![[0, 2, 1], [0, 1, 3]]).unwrap()
}

/// `nx` by `ny` unit quads over the xy plane with heights from `height`.
/// Each quad (i, j) contributes (v00, v10, v11) then (v00, v11, v01).
pub fn grid(nx: u32, ny: u32, height: impl Fn(f32, f32) -> f32) -> WalkMesh {
    let idx = |i: u32, j: u32| j * (nx + 1) + i;
    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    for j in 0..=ny {
        for i in 0..=nx {
            let (x, y) = (i as f32, j as f32);
            let z = height(x, y);
            vertices.push(Vec3::new(x, y, z));
            // Central differences of the height field.
            let dx = (height(x + 0.01, y) - height(x - 0.01, y)) / 0.02;
            let dy = (height(x, y + 0.01) - height(x, y - 0.01)) / 0.02;
            normals.push(Vec3::new(-dx, -dy, 1.0).normalized());
        }
    }
    let mut triangles = Vec::new();
    for j in 0..ny {
        for i in 0..nx {
            let (v00, v10, v11, v01) = (idx(i, j), idx(i + 1, j), idx(i + 1, j + 1), idx(i, j + 1));
            triangles.push([v00, v10, v11]);
            triangles.push([v00, v11, v01]);
        }
    }
    WalkMesh::new(vertices, normals, triangles).unwrap()
}

pub fn bumpy(x: f32, y: f32) -> f32 {
    0.25 * x.sin() * y.cos()
}

/// True when `tri` is a cyclic rotation of one of the mesh's triangles.
pub fn is_mesh_triangle(mesh: &WalkMesh, tri: [u32; 3]) -> bool {
    let [a, b, c] = tri;
    mesh.triangles()
        .iter()
        .any(|t| *t == [a, b, c] || *t == [b, c, a] || *t == [c, a, b])
}
